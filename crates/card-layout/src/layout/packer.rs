//! Sheet packing
//!
//! Cards are dealt into slots strictly in sequence: slot 0 of page 0 first,
//! then across the grid, opening a new page when the current one is full.
//! Nothing is reordered, so a printed sheet reads in manifest order.

use super::{Placement, Positioned, SlotGrid};
use crate::types::CardInstance;

/// Assign each card to a (page, slot) position in order.
///
/// Produces `ceil(n / capacity)` pages; only the last may be partial.
/// An empty input, or a grid with no slots, yields no placements.
pub fn pack(instances: &[CardInstance], grid: &SlotGrid) -> Vec<Placement> {
    let capacity = grid.capacity();
    if capacity == 0 {
        return Vec::new();
    }

    let mut placements = Vec::with_capacity(instances.len());
    let mut page_index = 0;
    let mut slot_index = 0;

    for card in instances {
        placements.push(Placement {
            page_index,
            slot_index,
            card: card.clone(),
        });

        slot_index += 1;
        if slot_index == capacity {
            slot_index = 0;
            page_index += 1;
        }
    }

    placements
}

/// Number of pages spanned by a placement sequence
pub fn page_count<P: Positioned>(placements: &[P]) -> usize {
    placements.last().map_or(0, |p| p.page_index() + 1)
}

/// Split a placement sequence into its pages
pub fn pages<P: Positioned>(placements: &[P]) -> impl Iterator<Item = &[P]> {
    placements.chunk_by(|a, b| a.page_index() == b.page_index())
}
