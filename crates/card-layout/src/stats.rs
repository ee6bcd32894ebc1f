use crate::layout::page_count;
use crate::plan::LayoutPlan;
use crate::types::FaceType;
use std::collections::BTreeMap;

/// Totals for checking a print run against the manifest
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutSummary {
    /// Card copies placed on front pages
    pub instances_placed: usize,
    pub front_pages: usize,
    pub back_pages: usize,
    /// Placed copies per face type
    pub per_face_type: BTreeMap<FaceType, usize>,
    /// Number of recoverable skips
    pub skipped: usize,
}

impl LayoutSummary {
    /// Pages in the output document
    pub fn total_pages(&self) -> usize {
        self.front_pages + self.back_pages
    }
}

/// Summarize a layout plan
pub fn summarize(plan: &LayoutPlan) -> LayoutSummary {
    let mut per_face_type = BTreeMap::new();
    for placement in &plan.fronts {
        *per_face_type.entry(placement.card.face_type).or_insert(0) += 1;
    }

    LayoutSummary {
        instances_placed: plan.fronts.len(),
        front_pages: page_count(&plan.fronts),
        back_pages: page_count(&plan.backs),
        per_face_type,
        skipped: plan.skips.len(),
    }
}
