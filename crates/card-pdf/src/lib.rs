mod constants;
mod images;
mod marks;
mod types;
mod writer;

pub use constants::{POINTS_PER_MM, mm_to_pt};
pub use images::ImageStore;
pub use marks::{CardRect, generate_crop_marks};
pub use types::*;
pub use writer::{render_document, write_pdf};
