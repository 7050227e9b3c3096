use report_compose::*;

#[tokio::test]
async fn test_options_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("options.json");

    let mut options = ReportOptions::default();
    options.paper_size = PaperSize::Custom {
        width_mm: 200.0,
        height_mm: 280.0,
    };
    options.pagination.continuation_page = 900;
    options.save(&path).await.unwrap();

    let loaded = ReportOptions::load(&path).await.unwrap();
    assert_eq!(loaded, options);
}

#[tokio::test]
async fn test_partial_options_use_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("options.json");
    tokio::fs::write(&path, r#"{ "paper_size": "Letter", "image_spacing": 5.0 }"#)
        .await
        .unwrap();

    let options = ReportOptions::load(&path).await.unwrap();
    assert_eq!(options.paper_size, PaperSize::Letter);
    assert_eq!(options.image_spacing, 5.0);
    assert_eq!(options.page_start_x, 10.0);
    assert_eq!(options.map.thumbnails_per_page, 9);
}

#[tokio::test]
async fn test_malformed_options_are_config_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("options.json");
    tokio::fs::write(&path, "{ not json").await.unwrap();

    match ReportOptions::load(&path).await {
        Err(ReportError::Config(msg)) => assert!(msg.contains("Failed to parse options")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[test]
fn test_validation_rejects_zero_counts() {
    let mut options = ReportOptions::default();
    options.map.thumbnail_columns = 0;
    assert!(matches!(options.validate(), Err(ReportError::Config(_))));

    let mut options = ReportOptions::default();
    options.pagination.single_page = 0;
    assert!(options.validate().is_err());

    let mut options = ReportOptions::default();
    options.image_oversample = 0;
    assert!(options.validate().is_err());
}

#[test]
fn test_validation_rejects_huge_oversample() {
    let mut options = ReportOptions::default();
    options.image_oversample = 8;
    assert!(options.validate().is_ok());

    options.image_oversample = 3_000_000_000;
    assert!(matches!(options.validate(), Err(ReportError::Config(_))));
}

#[tokio::test]
async fn test_report_spec_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    let json = r#"{
        "title": "Portfolio",
        "company": { "name": "Studio North", "logo": "logo.png" },
        "projects": [
            { "id": 2, "name": "Mill", "latitude": 0, "longitude": 0 },
            { "id": 1, "name": "Harbour", "latitude": 51.5, "longitude": -0.1 }
        ],
        "selected_projects": [2, 1],
        "add_map": true
    }"#;
    tokio::fs::write(&path, json).await.unwrap();

    let spec = ReportSpec::load(&path).await.unwrap();
    assert!(spec.add_map);
    assert_eq!(spec.cover_image(), Some("logo.png"));

    let selected = spec.selected_projects();
    assert_eq!(selected[0].name, "Harbour");
    assert_eq!(selected[1].coordinates(), None);
    assert_eq!(total_steps(&spec), 7);
}
