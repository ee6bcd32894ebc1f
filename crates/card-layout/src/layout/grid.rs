//! Slot grid calculation
//!
//! Fits as many cards as possible inside the page margins and spreads the
//! leftover space evenly between them, so the outer cards touch the margins
//! and every gutter has the same width.

use crate::types::{LayoutError, Result};

use super::{Slot, SlotGrid};

/// Compute the slot grid for one page.
///
/// # Arguments
/// * `page_width_mm` / `page_height_mm` - Page size
/// * `card_width_mm` / `card_height_mm` - Size of every card
/// * `margin_mm` - Uniform margin kept clear on all four sides
///
/// # Errors
/// `LayoutError::NoFit` when not even one card fits inside the margins, or
/// when any dimension is not a positive finite number.
pub fn compute_grid(
    page_width_mm: f32,
    page_height_mm: f32,
    card_width_mm: f32,
    card_height_mm: f32,
    margin_mm: f32,
) -> Result<SlotGrid> {
    let no_fit = || LayoutError::NoFit {
        page_width_mm,
        page_height_mm,
        card_width_mm,
        card_height_mm,
        margin_mm,
    };

    let sizes_valid = [page_width_mm, page_height_mm, card_width_mm, card_height_mm]
        .iter()
        .all(|d| d.is_finite() && *d > 0.0);
    if !sizes_valid || !margin_mm.is_finite() || margin_mm < 0.0 {
        return Err(no_fit());
    }

    let printable_width = page_width_mm - 2.0 * margin_mm;
    let printable_height = page_height_mm - 2.0 * margin_mm;
    if printable_width <= 0.0 || printable_height <= 0.0 {
        return Err(no_fit());
    }

    let cards_across = (printable_width / card_width_mm).floor() as usize;
    let cards_down = (printable_height / card_height_mm).floor() as usize;
    if cards_across == 0 || cards_down == 0 {
        return Err(no_fit());
    }

    let spacing_x_mm = even_spacing(printable_width, card_width_mm, cards_across);
    let spacing_y_mm = even_spacing(printable_height, card_height_mm, cards_down);

    // Row 0 is at the top of the page, PDF y grows upwards
    let top_row_y = page_height_mm - margin_mm - card_height_mm;
    let slots = (0..cards_down)
        .flat_map(|row| {
            (0..cards_across).map(move |col| {
                Slot::new(
                    margin_mm + col as f32 * (card_width_mm + spacing_x_mm),
                    top_row_y - row as f32 * (card_height_mm + spacing_y_mm),
                )
            })
        })
        .collect();

    Ok(SlotGrid {
        page_width_mm,
        page_height_mm,
        cards_across,
        cards_down,
        card_width_mm,
        card_height_mm,
        spacing_x_mm,
        spacing_y_mm,
        slots,
    })
}

/// Gutter width that spreads the residual space between `count` cards.
fn even_spacing(printable_mm: f32, card_mm: f32, count: usize) -> f32 {
    if count > 1 {
        (printable_mm - count as f32 * card_mm) / (count - 1) as f32
    } else {
        0.0
    }
}
