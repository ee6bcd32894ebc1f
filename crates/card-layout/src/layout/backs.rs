//! Back page resolution
//!
//! Every front placement gets exactly one back placement on the same page
//! and slot, so the back sheets line up with the fronts when printed
//! duplex or stacked.

use super::{BackPlacement, Placement, Positioned};
use crate::types::{FaceType, LayoutError, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Table of shared back images, one per face type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackImages {
    images: BTreeMap<FaceType, PathBuf>,
}

impl BackImages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the back image for a face type
    pub fn insert(&mut self, face_type: FaceType, image: impl Into<PathBuf>) {
        self.images.insert(face_type, image.into());
    }

    pub fn with(mut self, face_type: FaceType, image: impl Into<PathBuf>) -> Self {
        self.insert(face_type, image);
        self
    }

    pub fn get(&self, face_type: FaceType) -> Option<&Path> {
        self.images.get(&face_type).map(PathBuf::as_path)
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FaceType, &Path)> {
        self.images.iter().map(|(face, path)| (*face, path.as_path()))
    }

    /// Apply explicit overrides on top of this table
    pub fn merge(&mut self, overrides: &BTreeMap<FaceType, PathBuf>) {
        for (face_type, image) in overrides {
            self.insert(*face_type, image.clone());
        }
    }
}

/// Resolve the back image for every front placement.
///
/// # Errors
/// `LayoutError::MissingBackImage` if any placed card's face type has no
/// registered back. The error carries the front placements so they can
/// still be reported.
pub fn resolve_backs(fronts: &[Placement], backs: &BackImages) -> Result<Vec<BackPlacement>> {
    let mut resolved = Vec::with_capacity(fronts.len());

    for front in fronts {
        let face_type = front.card.face_type;
        let Some(image) = backs.get(face_type) else {
            return Err(LayoutError::MissingBackImage {
                face_type,
                fronts: fronts.to_vec(),
            });
        };

        resolved.push(BackPlacement {
            page_index: front.page_index,
            slot_index: front.slot_index,
            face_type,
            image: image.to_path_buf(),
        });
    }

    Ok(resolved)
}

/// True when both sequences occupy exactly the same (page, slot) positions
/// in the same order.
pub fn is_congruent<F: Positioned, B: Positioned>(fronts: &[F], backs: &[B]) -> bool {
    fronts.len() == backs.len()
        && fronts.iter().zip(backs).all(|(f, b)| {
            f.page_index() == b.page_index() && f.slot_index() == b.slot_index()
        })
}
