//! Deck expansion: manifest entries to individual card copies

use crate::types::{CardInstance, CardManifestEntry, Skip};

/// Largest number of copies a single manifest entry may ask for
pub const MAX_COPIES_PER_CARD: usize = 10_000;

/// Result of expanding a manifest
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expansion {
    /// One entry per physical card, in manifest order
    pub instances: Vec<CardInstance>,
    /// Entries that were left out
    pub skips: Vec<Skip>,
}

/// Expand manifest entries into a flat sequence of card copies.
///
/// Each entry contributes `count` contiguous copies, in manifest order.
/// A zero count contributes nothing. A negative count, or one above
/// `MAX_COPIES_PER_CARD`, is recorded as a skip and the entry is ignored;
/// it never aborts the expansion.
pub fn expand(manifest: &[CardManifestEntry]) -> Expansion {
    let mut expansion = Expansion::default();

    for entry in manifest {
        let Ok(count) = usize::try_from(entry.count) else {
            log::warn!(
                "Skipping card '{}': negative count {}",
                entry.id,
                entry.count
            );
            expansion.skips.push(Skip::InvalidManifestRow {
                line: None,
                id: Some(entry.id.clone()),
                reason: format!("negative count {}", entry.count),
            });
            continue;
        };
        if count > MAX_COPIES_PER_CARD {
            log::warn!(
                "Skipping card '{}': count {} exceeds {} copies",
                entry.id,
                count,
                MAX_COPIES_PER_CARD
            );
            expansion.skips.push(Skip::InvalidManifestRow {
                line: None,
                id: Some(entry.id.clone()),
                reason: format!(
                    "count {} exceeds {} copies",
                    entry.count, MAX_COPIES_PER_CARD
                ),
            });
            continue;
        }

        let instance = CardInstance {
            id: entry.id.clone(),
            face_type: entry.face_type,
        };
        expansion
            .instances
            .extend(std::iter::repeat_n(instance, count));
    }

    expansion
}
