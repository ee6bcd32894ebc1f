mod catalog;
pub mod layout;
mod manifest;
mod options;
mod plan;
mod stats;
mod types;

pub use catalog::ImageCatalog;
pub use layout::{BackImages, BackPlacement, Placement, Slot, SlotGrid};
pub use manifest::{ManifestLoad, load_manifest, parse_manifest};
pub use options::*;
pub use plan::{LayoutPlan, plan_layout};
pub use stats::{LayoutSummary, summarize};
pub use types::*;
