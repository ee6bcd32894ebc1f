//! Layout data types
//!
//! These types describe where cards land on printed sheets. They are
//! produced once per layout run and never mutated afterwards.

use crate::types::{CardInstance, FaceType};
use std::path::PathBuf;

/// Lower-left corner of one card rectangle, in millimetres from the
/// bottom-left corner of the page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Slot {
    pub x_mm: f32,
    pub y_mm: f32,
}

impl Slot {
    pub fn new(x_mm: f32, y_mm: f32) -> Self {
        Self { x_mm, y_mm }
    }
}

/// Evenly spaced grid of card slots shared by every page of a run
///
/// Slots are stored in reading order: rows top to bottom, columns left
/// to right within a row.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotGrid {
    /// Page the grid was computed for
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    /// Number of cards in one row
    pub cards_across: usize,
    /// Number of rows on a page
    pub cards_down: usize,
    pub card_width_mm: f32,
    pub card_height_mm: f32,
    /// Gutter between adjacent columns
    pub spacing_x_mm: f32,
    /// Gutter between adjacent rows
    pub spacing_y_mm: f32,
    pub slots: Vec<Slot>,
}

impl SlotGrid {
    /// Number of cards on one full page
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn slot(&self, slot_index: usize) -> Option<&Slot> {
        self.slots.get(slot_index)
    }

    /// Slot reflected across the page's vertical centre line.
    ///
    /// A back drawn here lines up with its front when the sheet is flipped
    /// on its long edge, whatever the number of columns.
    pub fn mirrored_slot(&self, slot_index: usize) -> Option<Slot> {
        let slot = self.slot(slot_index)?;
        Some(Slot::new(
            self.page_width_mm - slot.x_mm - self.card_width_mm,
            slot.y_mm,
        ))
    }
}

/// Anything assigned to a (page, slot) position
pub trait Positioned {
    fn page_index(&self) -> usize;
    fn slot_index(&self) -> usize;
}

/// A front card assigned to a slot on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub page_index: usize,
    pub slot_index: usize,
    pub card: CardInstance,
}

/// The shared back image printed behind a front placement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackPlacement {
    pub page_index: usize,
    pub slot_index: usize,
    pub face_type: FaceType,
    pub image: PathBuf,
}

impl Positioned for Placement {
    fn page_index(&self) -> usize {
        self.page_index
    }

    fn slot_index(&self) -> usize {
        self.slot_index
    }
}

impl Positioned for BackPlacement {
    fn page_index(&self) -> usize {
        self.page_index
    }

    fn slot_index(&self) -> usize {
        self.slot_index
    }
}
