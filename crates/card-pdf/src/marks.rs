//! Crop marks around placed cards
//!
//! Each card gets two short strokes at every corner, pointing away from
//! the card along its edges, so the sheet can be cut card by card.

use crate::constants::{CROP_MARK_GAP, CROP_MARK_LENGTH, CROP_MARK_WIDTH};

/// A card rectangle on the page, in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CardRect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }
}

/// Generate crop marks for every card as PDF content stream operations
pub fn generate_crop_marks(cards: &[CardRect]) -> String {
    if cards.is_empty() {
        return String::new();
    }

    let mut ops = String::new();
    ops.push_str("q\n");
    ops.push_str("0 0 0 RG\n");
    ops.push_str(&format!("{} w\n", CROP_MARK_WIDTH));
    ops.push_str("[] 0 d\n");

    for card in cards {
        for (x, y, dx, dy) in [
            (card.x, card.y, -1.0, -1.0),
            (card.right(), card.y, 1.0, -1.0),
            (card.x, card.top(), -1.0, 1.0),
            (card.right(), card.top(), 1.0, 1.0),
        ] {
            ops.push_str(&corner_mark(x, y, dx, dy));
        }
    }

    ops.push_str("Q\n");
    ops
}

/// Horizontal and vertical stroke for one corner; `dx`/`dy` point away
/// from the card.
fn corner_mark(x: f32, y: f32, dx: f32, dy: f32) -> String {
    let near = CROP_MARK_GAP;
    let far = CROP_MARK_GAP + CROP_MARK_LENGTH;
    format!(
        "{} {} m {} {} l S\n{} {} m {} {} l S\n",
        x + dx * near,
        y,
        x + dx * far,
        y,
        x,
        y + dy * near,
        x,
        y + dy * far
    )
}
