use card_layout::layout::{is_congruent, page_count, pages};
use card_layout::*;

fn catalog_for(ids: &[&str]) -> ImageCatalog {
    ImageCatalog::from_entries(
        ids.iter()
            .map(|id| (id.to_string(), format!("cards/{}.png", id))),
    )
}

fn both_backs() -> BackImages {
    BackImages::new()
        .with(FaceType::Action, "cards/back_action.png")
        .with(FaceType::Event, "cards/back_event.png")
}

/// 2 slots per page
fn two_up_options() -> LayoutOptions {
    LayoutOptions {
        paper_size: PaperSize::Custom {
            width_mm: 150.0,
            height_mm: 100.0,
        },
        margin_mm: 2.0,
        ..Default::default()
    }
}

#[test]
fn test_plan_small_deck() {
    let manifest = vec![
        CardManifestEntry::new("a", FaceType::Action, 2),
        CardManifestEntry::new("b", FaceType::Event, 1),
    ];

    let plan = plan_layout(
        &manifest,
        &catalog_for(&["a", "b"]),
        &both_backs(),
        &two_up_options(),
    )
    .unwrap();

    let fronts: Vec<_> = plan
        .fronts
        .iter()
        .map(|p| (p.page_index, p.slot_index, p.card.id.as_str()))
        .collect();
    assert_eq!(fronts, vec![(0, 0, "a"), (0, 1, "a"), (1, 0, "b")]);
    assert_eq!(plan.page_count(), 2);
    assert!(is_congruent(&plan.fronts, &plan.backs));
    assert!(plan.skips.is_empty());
}

#[test]
fn test_plan_default_a4_grid() {
    let plan = plan_layout(&[], &ImageCatalog::default(), &both_backs(), &LayoutOptions::default())
        .unwrap();

    assert_eq!(plan.grid.cards_across, 2);
    assert_eq!(plan.grid.cards_down, 3);
    assert_eq!(plan.grid.capacity(), 6);
    assert_eq!(plan.page_count(), 0);
    assert!(plan.backs.is_empty());
}

#[test]
fn test_plan_zero_count_entry() {
    let manifest = vec![
        CardManifestEntry::new("a", FaceType::Action, 0),
        CardManifestEntry::new("b", FaceType::Action, 1),
    ];

    let plan = plan_layout(
        &manifest,
        &catalog_for(&["a", "b"]),
        &both_backs(),
        &two_up_options(),
    )
    .unwrap();

    assert_eq!(plan.fronts.len(), 1);
    assert_eq!(plan.fronts[0].card.id, "b");
    assert!(plan.skips.is_empty());
}

#[test]
fn test_missing_front_image_is_skipped_on_both_sides() {
    let manifest = vec![
        CardManifestEntry::new("a", FaceType::Action, 1),
        CardManifestEntry::new("ghost", FaceType::Event, 3),
        CardManifestEntry::new("b", FaceType::Event, 2),
    ];

    let plan = plan_layout(
        &manifest,
        &catalog_for(&["a", "b"]),
        &both_backs(),
        &two_up_options(),
    )
    .unwrap();

    let ids: Vec<_> = plan.fronts.iter().map(|p| p.card.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "b"]);
    assert_eq!(plan.backs.len(), 3);
    assert!(is_congruent(&plan.fronts, &plan.backs));
    assert_eq!(
        plan.skips,
        vec![Skip::MissingFrontImage {
            id: "ghost".to_string()
        }]
    );
}

#[test]
fn test_missing_back_image_is_fatal() {
    let manifest = vec![
        CardManifestEntry::new("a", FaceType::Action, 3),
        CardManifestEntry::new("b", FaceType::Event, 1),
    ];
    let backs = BackImages::new().with(FaceType::Action, "cards/back_action.png");

    let result = plan_layout(
        &manifest,
        &catalog_for(&["a", "b"]),
        &backs,
        &two_up_options(),
    );

    match result {
        Err(LayoutError::MissingBackImage { face_type, fronts }) => {
            assert_eq!(face_type, FaceType::Event);
            // The fronts were computed before the backs failed
            assert_eq!(fronts.len(), 4);
            assert_eq!(page_count(&fronts), 2);
        }
        other => panic!("Expected MissingBackImage, got {:?}", other),
    }
}

#[test]
fn test_card_too_large() {
    let options = LayoutOptions {
        card_width_mm: 250.0,
        ..Default::default()
    };

    let result = plan_layout(&[], &ImageCatalog::default(), &both_backs(), &options);
    assert!(matches!(result, Err(LayoutError::NoFit { .. })));
}

#[test]
fn test_plan_is_deterministic() {
    let manifest: Vec<_> = (0..15)
        .map(|i| {
            let face = if i % 2 == 0 {
                FaceType::Action
            } else {
                FaceType::Event
            };
            CardManifestEntry::new(format!("card_{}", i), face, (i % 4) as i64)
        })
        .collect();
    let ids: Vec<String> = manifest.iter().map(|e| e.id.clone()).collect();
    let catalog = catalog_for(&ids.iter().map(String::as_str).collect::<Vec<_>>());
    let options = LayoutOptions::default();

    let first = plan_layout(&manifest, &catalog, &both_backs(), &options).unwrap();
    let second = plan_layout(&manifest, &catalog, &both_backs(), &options).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_back_pages_match_front_pages() {
    let manifest = vec![
        CardManifestEntry::new("a", FaceType::Action, 7),
        CardManifestEntry::new("b", FaceType::Event, 6),
    ];

    let plan = plan_layout(
        &manifest,
        &catalog_for(&["a", "b"]),
        &both_backs(),
        &LayoutOptions::default(),
    )
    .unwrap();

    let front_pages: Vec<usize> = pages(&plan.fronts).map(|p| p.len()).collect();
    let back_pages: Vec<usize> = pages(&plan.backs).map(|p| p.len()).collect();
    assert_eq!(front_pages, vec![6, 6, 1]);
    assert_eq!(front_pages, back_pages);
}

#[test]
fn test_summary_counts() {
    let manifest = vec![
        CardManifestEntry::new("a", FaceType::Action, 4),
        CardManifestEntry::new("b", FaceType::Event, 3),
        CardManifestEntry::new("c", FaceType::Event, -1),
    ];

    let mut plan = plan_layout(
        &manifest,
        &catalog_for(&["a", "b"]),
        &both_backs(),
        &LayoutOptions::default(),
    )
    .unwrap();
    plan.prepend_skips(vec![Skip::InvalidManifestRow {
        line: Some(2),
        id: None,
        reason: "missing id".to_string(),
    }]);

    let summary = summarize(&plan);

    assert_eq!(summary.instances_placed, 7);
    assert_eq!(summary.front_pages, 2);
    assert_eq!(summary.back_pages, 2);
    assert_eq!(summary.total_pages(), 4);
    assert_eq!(summary.per_face_type.get(&FaceType::Action), Some(&4));
    assert_eq!(summary.per_face_type.get(&FaceType::Event), Some(&3));
    assert_eq!(summary.skipped, 2);
    assert!(matches!(
        plan.skips[0],
        Skip::InvalidManifestRow { line: Some(2), .. }
    ));
}
