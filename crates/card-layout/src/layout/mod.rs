//! Layout calculation modules
//!
//! This module holds the geometric and sequencing core of a print run:
//! - Slot grid (how many cards fit and where)
//! - Deck expansion (manifest rows to card copies)
//! - Packing (card copies to page/slot positions)
//! - Back resolution (matching back placements for every front)

mod backs;
mod deck;
mod grid;
mod packer;
mod types;

pub use backs::*;
pub use deck::*;
pub use grid::*;
pub use packer::*;
pub use types::*;
