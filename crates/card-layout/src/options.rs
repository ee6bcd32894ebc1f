use crate::layout::{SlotGrid, compute_grid};
use crate::types::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Page and card geometry plus output arrangement for one layout run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutOptions {
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    pub card_width_mm: f32,
    pub card_height_mm: f32,
    /// Uniform margin on all four sides of the page
    pub margin_mm: f32,
    pub page_order: PageOrder,
    /// Draw backs at the mirrored column for long-edge duplex
    pub mirror_backs: bool,
    /// Draw crop marks around every placed card
    pub cut_marks: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            card_width_mm: 69.0,
            card_height_mm: 94.0,
            margin_mm: 5.0,
            page_order: PageOrder::Sequential,
            mirror_backs: false,
            cut_marks: false,
        }
    }
}

impl LayoutOptions {
    /// Page size with orientation applied
    pub fn page_dimensions_mm(&self) -> (f32, f32) {
        self.paper_size.dimensions_with_orientation(self.orientation)
    }

    /// Slot grid for these options
    pub fn grid(&self) -> Result<SlotGrid> {
        let (page_width_mm, page_height_mm) = self.page_dimensions_mm();
        compute_grid(
            page_width_mm,
            page_height_mm,
            self.card_width_mm,
            self.card_height_mm,
            self.margin_mm,
        )
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        let (page_width_mm, page_height_mm) = self.page_dimensions_mm();
        if page_width_mm.is_nan()
            || page_height_mm.is_nan()
            || page_width_mm <= 0.0
            || page_height_mm <= 0.0
        {
            return Err(LayoutError::Config(
                "Page dimensions must be positive".to_string(),
            ));
        }
        if self.card_width_mm.is_nan()
            || self.card_height_mm.is_nan()
            || self.card_width_mm <= 0.0
            || self.card_height_mm <= 0.0
        {
            return Err(LayoutError::Config(
                "Card dimensions must be positive".to_string(),
            ));
        }
        if self.margin_mm.is_nan() || self.margin_mm < 0.0 {
            return Err(LayoutError::Config(
                "Margin must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Headless browser used by the card renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Browser {
    #[default]
    Firefox,
    Chrome,
    Edge,
}

/// Everything a print run needs, in one place
///
/// `template_path`, `styles` and `browser` are passed through to the card
/// renderer that produces the images in `image_dir`; the layout engine
/// itself only reads the manifest, the images and `layout`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProjectConfig {
    /// Card manifest (CSV with `id`, `count` and optional `type` columns)
    pub manifest_path: PathBuf,
    /// Directory of rendered card images, named by card id
    pub image_dir: PathBuf,
    pub output_path: PathBuf,
    /// HTML template used to render each card
    pub template_path: Option<PathBuf>,
    /// Primary stylesheet, optionally followed by one supplementary sheet
    pub styles: Vec<PathBuf>,
    pub browser: Browser,
    /// Back images that replace the ones found in `image_dir`
    pub back_images: BTreeMap<FaceType, PathBuf>,
    pub layout: LayoutOptions,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            manifest_path: PathBuf::from("cards.csv"),
            image_dir: PathBuf::from("cards"),
            output_path: PathBuf::from("print_layout.pdf"),
            template_path: None,
            styles: Vec::new(),
            browser: Browser::Firefox,
            back_images: BTreeMap::new(),
            layout: LayoutOptions::default(),
        }
    }
}

impl ProjectConfig {
    /// Conventional layout of a game directory: `cards.csv` next to a
    /// `cards/` folder of rendered images.
    pub fn for_game_dir(game_dir: impl AsRef<Path>) -> Self {
        let game_dir = game_dir.as_ref();
        Self {
            manifest_path: game_dir.join("cards.csv"),
            image_dir: game_dir.join("cards"),
            ..Default::default()
        }
    }

    /// Load configuration from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let config = serde_json::from_slice(&bytes)
            .map_err(|e| LayoutError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Save configuration to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| LayoutError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.manifest_path.as_os_str().is_empty() {
            return Err(LayoutError::Config("No manifest specified".to_string()));
        }
        if self.styles.len() > 2 {
            return Err(LayoutError::Config(format!(
                "At most two stylesheets (primary and supplementary) are supported, got {}",
                self.styles.len()
            )));
        }
        self.layout.validate()
    }
}
