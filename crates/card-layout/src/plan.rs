//! One complete layout run: grid, expansion, packing and backs

use crate::catalog::ImageCatalog;
use crate::layout::{
    BackImages, BackPlacement, Placement, SlotGrid, expand, pack, page_count, resolve_backs,
};
use crate::options::LayoutOptions;
use crate::types::{CardInstance, CardManifestEntry, Result, Skip};
use std::collections::BTreeSet;

/// Everything the document writer needs to draw a deck
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan {
    pub grid: SlotGrid,
    pub fronts: Vec<Placement>,
    /// Same (page, slot) positions as `fronts`, in the same order
    pub backs: Vec<BackPlacement>,
    /// Recoverable problems met along the way
    pub skips: Vec<Skip>,
}

impl LayoutPlan {
    /// Pages in each of the front and back streams
    pub fn page_count(&self) -> usize {
        page_count(&self.fronts)
    }

    /// Put skips found before planning (e.g. while reading the manifest)
    /// ahead of the plan's own.
    pub fn prepend_skips(&mut self, earlier: Vec<Skip>) {
        self.skips.splice(0..0, earlier);
    }
}

/// Lay out a deck.
///
/// Cards without a rendered front image are left out entirely (one skip
/// per card id) before packing, so the back pages stay congruent with the
/// fronts.
///
/// # Errors
/// * `LayoutError::NoFit` if the card does not fit on the page
/// * `LayoutError::MissingBackImage` if a placed face type has no back
pub fn plan_layout(
    manifest: &[CardManifestEntry],
    catalog: &ImageCatalog,
    backs: &BackImages,
    options: &LayoutOptions,
) -> Result<LayoutPlan> {
    let grid = options.grid()?;
    log::debug!(
        "Grid {}x{} ({} cards per page)",
        grid.cards_across,
        grid.cards_down,
        grid.capacity()
    );

    let expansion = expand(manifest);
    let mut skips = expansion.skips;
    let instances = retain_with_images(expansion.instances, catalog, &mut skips);

    let fronts = pack(&instances, &grid);
    let back_placements = resolve_backs(&fronts, backs)?;

    log::info!(
        "Placed {} cards on {} pages ({} skipped)",
        fronts.len(),
        page_count(&fronts),
        skips.len()
    );

    Ok(LayoutPlan {
        grid,
        fronts,
        backs: back_placements,
        skips,
    })
}

fn retain_with_images(
    instances: Vec<CardInstance>,
    catalog: &ImageCatalog,
    skips: &mut Vec<Skip>,
) -> Vec<CardInstance> {
    let mut missing = BTreeSet::new();

    instances
        .into_iter()
        .filter(|card| {
            if catalog.contains(&card.id) {
                return true;
            }
            if missing.insert(card.id.clone()) {
                log::warn!("No image for card '{}', leaving it out", card.id);
                skips.push(Skip::MissingFrontImage {
                    id: card.id.clone(),
                });
            }
            false
        })
        .collect()
}
