use std::time::Duration;

use colormap_match::{
    extract_colors, Catalog, MatchError, PageImage, RainbowDetector, ReferenceLibrary,
};

use crate::error::LoadError;
use crate::models::{DetectConfig, DetectionReport, PageFailure};
use crate::services::loader::PageLoader;

/// Scan pipeline that orchestrates load → extract → match → classify
pub struct ScanPipeline {
    config: DetectConfig,
    catalog: Catalog,
    library: ReferenceLibrary,
    loader: PageLoader,
}

impl ScanPipeline {
    /// Build the reference library once for the whole run.
    pub fn new(config: DetectConfig) -> Result<Self, MatchError> {
        let catalog = Catalog::matplotlib();
        let library = ReferenceLibrary::build(&catalog, config.samples)?;
        let loader = PageLoader::new(Duration::from_secs(config.fetch_timeout_secs));

        tracing::debug!(
            colormaps = library.len(),
            samples = config.samples,
            "Reference library ready"
        );

        Ok(Self {
            config,
            catalog,
            library,
            loader,
        })
    }

    pub fn config(&self) -> &DetectConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn library(&self) -> &ReferenceLibrary {
        &self.library
    }

    /// Load every input and classify the pages that loaded.
    pub fn run<S: AsRef<str> + Sync>(&self, inputs: &[S]) -> Result<DetectionReport, MatchError> {
        let pages = self.loader.load_all(inputs);
        self.classify_pages(pages)
    }

    /// Classify already loaded pages. Failed loads are recorded in the
    /// report and do not stop the others.
    pub fn classify_pages(
        &self,
        pages: Vec<Result<(String, PageImage), LoadError>>,
    ) -> Result<DetectionReport, MatchError> {
        let mut colors = Vec::new();
        let mut failures = Vec::new();
        let mut blank = Vec::new();

        for page in pages {
            match page {
                Ok((page_id, image)) => match extract_colors(&image, &page_id) {
                    Some(table) => colors.push(table),
                    None => blank.push(page_id),
                },
                Err(e) => {
                    tracing::warn!(source = %e.source_id(), error = %e, "Skipping page");
                    failures.push(PageFailure::from(&e));
                }
            }
        }

        let classification = RainbowDetector::new(&self.library, &self.catalog)
            .max_diff(self.config.max_diff)
            .cm_thresh(self.config.cm_thresh)
            .separator(self.config.page_separator)
            .detect(colors.clone())?;

        tracing::info!(
            pages = colors.len(),
            flagged = classification.flagged.len(),
            failed = failures.len(),
            "Detection finished"
        );

        Ok(DetectionReport::new(classification, colors, failures, blank))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn small_config() -> DetectConfig {
        DetectConfig {
            samples: 4,
            ..DetectConfig::default()
        }
    }

    fn jet_page() -> PageImage {
        let data: Vec<u8> = colormap_match::reference::gradient("jet")
            .unwrap()
            .sample(4)
            .into_iter()
            .flat_map(|rgb| rgb.map(|c| (c * 255.0).round() as u8))
            .collect();
        PageImage::from_rgb(2, 2, data).unwrap()
    }

    #[test]
    fn test_library_uses_configured_samples() {
        let pipeline = ScanPipeline::new(small_config()).unwrap();
        assert_eq!(pipeline.library().sample_count(), 4);
        assert_eq!(pipeline.config().samples, 4);
    }

    #[test]
    fn test_classify_pages_collects_everything() {
        let pipeline = ScanPipeline::new(small_config()).unwrap();
        let pages = vec![
            Ok(("doc-1".to_string(), jet_page())),
            Err(LoadError::HttpStatus {
                source_id: "http://host/doc-2.png".to_string(),
                status: 404,
            }),
            Ok((
                "doc-3".to_string(),
                PageImage::from_rgb(1, 1, vec![255, 255, 255]).unwrap(),
            )),
        ];

        let report = pipeline.classify_pages(pages).unwrap();

        assert!(report.is_flagged("doc-1"));
        assert_eq!(report.flagged[0].page_number, Some(1));
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].source, "http://host/doc-2.png");
        assert_eq!(report.blank, vec!["doc-3".to_string()]);
        assert_eq!(report.page_count(), 1);
        assert!(report.statistics.iter().all(|s| s.page == "doc-1"));
    }

    #[test]
    fn test_no_pages() {
        let pipeline = ScanPipeline::new(small_config()).unwrap();
        let report = pipeline.classify_pages(Vec::new()).unwrap();
        assert!(report.flagged.is_empty());
        assert!(report.statistics.is_empty());
    }
}
