//! End-to-end detection over page files on disk.
//!
//! These tests run the full pipeline: input expansion, decoding, color
//! extraction, matching and classification.

mod common;

use common::fixtures::{blank_image, color_bar_image, gradient_image, small_config, with_alpha};
use common::PageDir;
use pretty_assertions::assert_eq;
use rainbow_scan::models::DetectConfig;
use rainbow_scan::services::ScanPipeline;

#[test]
fn test_jet_page_flagged_viridis_page_not() {
    let pages = PageDir::new();
    pages.write_rgb("doc-1.png", &gradient_image("jet"));
    pages.write_rgb("doc-2.png", &gradient_image("viridis"));

    let pipeline = ScanPipeline::new(small_config()).unwrap();
    let report = pipeline
        .run(&[pages.input("doc-1.png"), pages.input("doc-2.png")])
        .unwrap();

    assert!(report.is_flagged("doc-1"), "{:?}", report.statistics);
    assert!(!report.is_flagged("doc-2"));
    assert_eq!(report.flagged.len(), 1);
    assert_eq!(report.flagged[0].page_number, Some(1));
    assert!(report.failures.is_empty());
}

#[test]
fn test_color_bars_at_default_samples() {
    let pages = PageDir::new();
    pages.write_rgb("jet.png", &color_bar_image("jet"));
    pages.write_rgb("viridis.png", &color_bar_image("viridis"));

    let pipeline = ScanPipeline::new(DetectConfig::default()).unwrap();
    let report = pipeline
        .run(&[pages.input("jet.png"), pages.input("viridis.png")])
        .unwrap();

    assert!(report.is_flagged("jet"));
    assert!(!report.is_flagged("viridis"));

    let best = report
        .statistics
        .iter()
        .find(|row| row.page == "viridis")
        .unwrap();
    assert_eq!(best.colormap, "viridis");
    assert!(best.pct_cm > 0.5, "{best:?}");
}

#[test]
fn test_blank_page_not_flagged_and_not_an_error() {
    let pages = PageDir::new();
    pages.write_rgb("blank-3.png", &blank_image());

    let pipeline = ScanPipeline::new(small_config()).unwrap();
    let report = pipeline.run(&[pages.input("blank-3.png")]).unwrap();

    assert!(report.flagged.is_empty());
    assert!(report.statistics.is_empty());
    assert!(report.failures.is_empty());
    assert_eq!(report.blank, vec!["blank-3".to_string()]);
}

#[test]
fn test_opaque_rgba_page_matches_rgb_page() {
    let pages = PageDir::new();
    let jet = gradient_image("jet");
    pages.write_rgb("rgb.png", &jet);
    pages.write_rgba("rgba.png", &with_alpha(&jet, 255));

    let pipeline = ScanPipeline::new(small_config()).unwrap();
    let report = pipeline
        .run(&[pages.input("rgb.png"), pages.input("rgba.png")])
        .unwrap();

    assert!(report.is_flagged("rgb"));
    assert!(report.is_flagged("rgba"));

    let rows = |page: &str| -> Vec<(String, f64, f64)> {
        report
            .statistics
            .iter()
            .filter(|row| row.page == page)
            .map(|row| (row.colormap.clone(), row.pct_cm, row.pct_page))
            .collect()
    };
    assert_eq!(rows("rgb"), rows("rgba"));
}

#[test]
fn test_transparent_page_is_blank() {
    let pages = PageDir::new();
    pages.write_rgba("clear.png", &with_alpha(&gradient_image("jet"), 0));

    let pipeline = ScanPipeline::new(small_config()).unwrap();
    let report = pipeline.run(&[pages.input("clear.png")]).unwrap();

    assert_eq!(report.blank, vec!["clear".to_string()]);
}

#[test]
fn test_bad_inputs_do_not_stop_the_run() {
    let pages = PageDir::new();
    pages.write_rgb("doc-1.png", &gradient_image("jet"));
    let broken = pages.write_bytes("doc-2.png", b"definitely not a png");
    let missing = pages.path().join("doc-3.png");

    let pipeline = ScanPipeline::new(small_config()).unwrap();
    let report = pipeline
        .run(&[
            pages.input("doc-1.png"),
            broken.display().to_string(),
            missing.display().to_string(),
        ])
        .unwrap();

    assert!(report.is_flagged("doc-1"));
    let sources: Vec<&str> = report.failures.iter().map(|f| f.source.as_str()).collect();
    assert_eq!(
        sources,
        vec![
            broken.display().to_string().as_str(),
            missing.display().to_string().as_str(),
        ]
    );
    assert!(report.failures[0].reason.starts_with("Failed to decode"));
    assert!(report.failures[1].reason.starts_with("Failed to read"));
}

#[test]
fn test_glob_input() {
    let pages = PageDir::new();
    pages.write_rgb("scan-2.png", &gradient_image("viridis"));
    pages.write_rgb("scan-1.png", &gradient_image("jet"));
    pages.write_bytes("notes.txt", b"ignored");

    let pipeline = ScanPipeline::new(small_config()).unwrap();
    let report = pipeline
        .run(&[format!("{}/scan-*.png", pages.path().display())])
        .unwrap();

    assert_eq!(report.page_count(), 2);
    assert_eq!(report.colors[0].page_id, "scan-1");
    assert_eq!(report.colors[1].page_id, "scan-2");
    assert!(report.is_flagged("scan-1"));
    assert!(!report.is_flagged("scan-2"));
}

#[test]
fn test_json_report() {
    let pages = PageDir::new();
    pages.write_rgb("doc-7.png", &gradient_image("jet"));

    let pipeline = ScanPipeline::new(small_config()).unwrap();
    let report = pipeline.run(&[pages.input("doc-7.png")]).unwrap();
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    assert_eq!(json["flagged"][0]["page_id"], "doc-7");
    assert_eq!(json["flagged"][0]["page_number"], 7);
    assert!(json["statistics"].as_array().unwrap().len() > 1);
}
