use card_layout::*;
use std::path::{Path, PathBuf};

#[tokio::test]
async fn test_load_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cards.csv");
    std::fs::write(
        &path,
        "id,name,count\naction_ambush,Ambush,2\nevent_storm,Storm,\ncover,Cover,1\n",
    )
    .unwrap();

    let load = load_manifest(&path).await.unwrap();

    assert_eq!(
        load.entries,
        vec![CardManifestEntry::new("action_ambush", FaceType::Action, 2)]
    );
    assert_eq!(load.skips.len(), 2);
}

#[tokio::test]
async fn test_load_manifest_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_manifest(dir.path().join("nope.csv")).await;
    assert!(matches!(result, Err(LayoutError::Io(_))));
}

#[tokio::test]
async fn test_scan_image_catalog() {
    let dir = tempfile::tempdir().unwrap();
    for name in [
        "action_a.png",
        "action_b.jpg",
        "action_b.png",
        "back_action.png",
        "back_event.jpeg",
        "notes.txt",
    ] {
        std::fs::write(dir.path().join(name), b"").unwrap();
    }
    std::fs::create_dir(dir.path().join("event_dir.png")).unwrap();

    let catalog = ImageCatalog::scan(dir.path()).await.unwrap();

    assert_eq!(catalog.len(), 4);
    assert!(catalog.contains("action_a"));
    assert!(!catalog.contains("notes"));
    assert!(!catalog.contains("event_dir"));
    assert_eq!(
        catalog.get("action_b"),
        Some(dir.path().join("action_b.png").as_path())
    );

    let backs = catalog.back_images();
    assert_eq!(
        backs.get(FaceType::Event),
        Some(dir.path().join("back_event.jpeg").as_path())
    );
}

#[test]
fn test_config_validation() {
    let mut config = ProjectConfig::for_game_dir("decks/raid");
    assert_eq!(config.manifest_path, Path::new("decks/raid/cards.csv"));
    assert_eq!(config.image_dir, Path::new("decks/raid/cards"));
    assert!(config.validate().is_ok());

    config.styles = vec!["base.css".into(), "print.css".into(), "extra.css".into()];
    assert!(matches!(config.validate(), Err(LayoutError::Config(_))));

    config.styles.truncate(2);
    config.layout.card_width_mm = 0.0;
    assert!(matches!(config.validate(), Err(LayoutError::Config(_))));

    config.layout.card_width_mm = 63.0;
    config.layout.margin_mm = -1.0;
    match config.validate() {
        Err(LayoutError::Config(msg)) => assert!(msg.contains("Margin")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_config() {
    use tempfile::NamedTempFile;

    let mut config = ProjectConfig::for_game_dir("game");
    config.template_path = Some(PathBuf::from("card_template.html"));
    config.styles = vec![PathBuf::from("base.css"), PathBuf::from("styles.css")];
    config.browser = Browser::Chrome;
    config
        .back_images
        .insert(FaceType::Event, PathBuf::from("art/event_back.png"));
    config.layout.paper_size = PaperSize::Letter;
    config.layout.page_order = PageOrder::Interleaved;
    config.layout.mirror_backs = true;

    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    config.save(path).await.unwrap();
    let loaded = ProjectConfig::load(path).await.unwrap();

    assert_eq!(loaded, config);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_partial_config_uses_defaults() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(
        temp_file.path(),
        r#"{ "manifest_path": "deck.csv", "layout": { "margin_mm": 8.0 } }"#,
    )
    .unwrap();

    let loaded = ProjectConfig::load(temp_file.path()).await.unwrap();

    assert_eq!(loaded.manifest_path, PathBuf::from("deck.csv"));
    assert_eq!(loaded.image_dir, PathBuf::from("cards"));
    assert_eq!(loaded.layout.margin_mm, 8.0);
    assert_eq!(loaded.layout.card_width_mm, 69.0);
    assert_eq!(loaded.layout.paper_size, PaperSize::A4);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_invalid_config() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), "not json").unwrap();

    let result = ProjectConfig::load(temp_file.path()).await;
    assert!(matches!(result, Err(LayoutError::Config(_))));
}
