//! Rendered card images, indexed by card id

use crate::layout::BackImages;
use crate::types::{FaceType, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Recognised image extensions, most preferred first
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Lookup from card id (image file stem) to image file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageCatalog {
    images: BTreeMap<String, PathBuf>,
}

impl ImageCatalog {
    /// Build a catalog from explicit (id, path) pairs
    pub fn from_entries<I, S, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, P)>,
        S: Into<String>,
        P: Into<PathBuf>,
    {
        Self {
            images: entries
                .into_iter()
                .map(|(id, path)| (id.into(), path.into()))
                .collect(),
        }
    }

    /// Index every image file directly inside `dir`.
    ///
    /// When several files share a stem (`a.png`, `a.jpg`) the PNG wins.
    pub async fn scan(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut catalog = Self::default();
        let mut entries = tokio::fs::read_dir(dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let path = entry.path();
            let Some(rank) = extension_rank(&path) else {
                continue;
            };
            let Some(stem) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
            else {
                continue;
            };

            let replace = catalog
                .images
                .get(&stem)
                .and_then(|existing| extension_rank(existing))
                .is_none_or(|existing_rank| rank < existing_rank);
            if replace {
                catalog.images.insert(stem, path);
            }
        }

        log::info!("Found {} card images in {}", catalog.len(), dir.display());
        Ok(catalog)
    }

    pub fn get(&self, id: &str) -> Option<&Path> {
        self.images.get(id).map(PathBuf::as_path)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.images.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Back images found under their conventional stems
    /// (`back_action`, `back_event`).
    pub fn back_images(&self) -> BackImages {
        let mut backs = BackImages::new();
        for face_type in FaceType::ALL {
            if let Some(path) = self.get(face_type.back_image_stem()) {
                backs.insert(face_type, path);
            }
        }
        backs
    }
}

fn extension_rank(path: &Path) -> Option<usize> {
    let ext = path.extension()?.to_str()?;
    IMAGE_EXTENSIONS
        .iter()
        .position(|known| known.eq_ignore_ascii_case(ext))
}
