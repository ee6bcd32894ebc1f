use crate::layout::Placement;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error(
        "Card {card_width_mm}x{card_height_mm}mm does not fit on a {page_width_mm}x{page_height_mm}mm page with {margin_mm}mm margins"
    )]
    NoFit {
        page_width_mm: f32,
        page_height_mm: f32,
        card_width_mm: f32,
        card_height_mm: f32,
        margin_mm: f32,
    },
    /// Fatal for the run. Carries the front placements computed before the
    /// back table was consulted.
    #[error("No back image registered for face type '{face_type}'")]
    MissingBackImage {
        face_type: FaceType,
        fronts: Vec<Placement>,
    },
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, LayoutError>;

/// Coarse card category; selects which shared back image is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FaceType {
    Action,
    Event,
}

impl FaceType {
    pub const ALL: [FaceType; 2] = [FaceType::Action, FaceType::Event];

    pub fn name(self) -> &'static str {
        match self {
            FaceType::Action => "action",
            FaceType::Event => "event",
        }
    }

    /// Derive the face type from a card id such as `action_ambush`.
    pub fn from_id_prefix(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|face| id.strip_prefix(face.name()).is_some_and(|rest| rest.starts_with('_')))
    }

    /// File stem of the shared back image in a rendered card directory
    pub fn back_image_stem(self) -> &'static str {
        match self {
            FaceType::Action => "back_action",
            FaceType::Event => "back_event",
        }
    }
}

impl fmt::Display for FaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FaceType {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|face| face.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LayoutError::Config(format!("Unknown face type: {}", s)))
    }
}

/// One row of the card manifest: a distinct card and how many copies to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardManifestEntry {
    pub id: String,
    pub face_type: FaceType,
    pub count: i64,
}

impl CardManifestEntry {
    pub fn new(id: impl Into<String>, face_type: FaceType, count: i64) -> Self {
        Self {
            id: id.into(),
            face_type,
            count,
        }
    }
}

/// One physical copy of a card to be placed on a sheet
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardInstance {
    pub id: String,
    pub face_type: FaceType,
}

/// A recoverable problem: the affected card or row is left out and the run continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skip {
    /// No rendered image exists for this card id; every copy is omitted.
    MissingFrontImage { id: String },
    /// A manifest row with a missing id, unknown face type, or malformed count.
    InvalidManifestRow {
        line: Option<u64>,
        id: Option<String>,
        reason: String,
    },
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Skip::MissingFrontImage { id } => write!(f, "no front image for card '{}'", id),
            Skip::InvalidManifestRow { line, id, reason } => {
                f.write_str("manifest row")?;
                if let Some(line) = line {
                    write!(f, " {}", line)?;
                }
                if let Some(id) = id {
                    write!(f, " ('{}')", id)?;
                }
                write!(f, ": {}", reason)
            }
        }
    }
}

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Get base dimensions (always portrait: width < height for standard sizes)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Tabloid => (279.4, 431.8),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

/// How front and back page streams are combined in the output document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageOrder {
    /// All front pages, then all back pages
    #[default]
    Sequential,
    /// Front 0, back 0, front 1, back 1, ... for duplex printers
    Interleaved,
}
