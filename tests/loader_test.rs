//! Loading pages from files and URLs.

mod common;

use common::fixtures::{gradient_image, png_bytes, small_config};
use common::{MockHttpServer, PageDir};
use image::DynamicImage;
use pretty_assertions::assert_eq;
use rainbow_scan::error::LoadError;
use rainbow_scan::services::{Input, PageLoader, ScanPipeline};

#[test]
fn test_page_id_from_file_stem() {
    let pages = PageDir::new();
    let path = pages.write_rgb("report-12.png", &gradient_image("jet"));

    let (page_id, image) = PageLoader::default().load(&Input::Path(path)).unwrap();
    assert_eq!(page_id, "report-12");
    assert_eq!((image.width(), image.height()), (2, 2));
}

#[test]
fn test_undecodable_file_reports_path() {
    let pages = PageDir::new();
    let path = pages.write_bytes("scan.png", &[0x89, b'P', b'N', b'G']);

    let err = PageLoader::default().load(&Input::Path(path.clone())).unwrap_err();
    assert!(matches!(err, LoadError::Decode { .. }), "{err}");
    assert_eq!(err.source_id(), path.display().to_string());
    assert!(err.to_string().contains(&path.display().to_string()));
}

#[test]
fn test_load_all_keeps_input_order() {
    let pages = PageDir::new();
    pages.write_rgb("b.png", &gradient_image("jet"));
    pages.write_rgb("a.png", &gradient_image("viridis"));

    let results = PageLoader::default().load_all(&[pages.input("b.png"), pages.input("a.png")]);
    let ids: Vec<String> = results.into_iter().map(|r| r.unwrap().0).collect();
    assert_eq!(ids, vec!["b".to_string(), "a".to_string()]);
}

#[test]
fn test_same_stem_in_two_directories_gets_distinct_ids() {
    let pages = PageDir::new();
    for dir in ["a", "b"] {
        std::fs::create_dir_all(pages.path().join(dir)).unwrap();
    }
    pages.write_rgb("a/doc-1.png", &gradient_image("jet"));
    pages.write_rgb("b/doc-1.png", &gradient_image("viridis"));
    pages.write_rgb("b/doc-2.png", &gradient_image("viridis"));

    let results = PageLoader::default().load_all(&[
        pages.input("a/doc-1.png"),
        pages.input("b/doc-1.png"),
        pages.input("b/doc-2.png"),
    ]);
    let ids: Vec<String> = results.into_iter().map(|r| r.unwrap().0).collect();
    assert_eq!(ids, vec!["a/doc-1", "b/doc-1", "doc-2"]);
}

#[tokio::test]
async fn test_url_page_loads() {
    let server = MockHttpServer::start().await;
    server
        .mock_get_png(
            "/pages/fig-4.png",
            png_bytes(DynamicImage::ImageRgb8(gradient_image("jet"))),
        )
        .await;
    let url = server.url_for("/pages/fig-4.png");

    let result = tokio::task::spawn_blocking(move || {
        PageLoader::default().load(&Input::Url(url))
    })
    .await
    .unwrap();

    let (page_id, image) = result.unwrap();
    assert_eq!(page_id, "fig-4");
    assert_eq!(image.pixel_count(), 4);
}

#[tokio::test]
async fn test_http_404_reports_url_and_others_still_classified() {
    let server = MockHttpServer::start().await;
    server
        .mock_get_png(
            "/doc-1.png",
            png_bytes(DynamicImage::ImageRgb8(gradient_image("jet"))),
        )
        .await;
    server.mock_get_status("/doc-2.png", 404).await;
    let good = server.url_for("/doc-1.png");
    let missing = server.url_for("/doc-2.png");

    let inputs = vec![good, missing.clone()];
    let report = tokio::task::spawn_blocking(move || {
        ScanPipeline::new(small_config()).unwrap().run(inputs.as_slice())
    })
    .await
    .unwrap()
    .unwrap();

    assert!(report.is_flagged("doc-1"));
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].source, missing);
    assert_eq!(
        report.failures[0].reason,
        format!("Failed to fetch {missing}: HTTP 404")
    );
}
