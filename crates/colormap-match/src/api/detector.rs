//! RainbowDetector builder, the main entry point for the crate.

use crate::api::MatchError;
use crate::classify::{Classification, RainbowClassifier, DEFAULT_CM_THRESH};
use crate::extract::{extract_colors, PageImage};
use crate::matcher::{ColormapMatcher, DEFAULT_MAX_DIFF};
use crate::reference::{Catalog, ReferenceLibrary};
use crate::table::{convert_tables, ColorTable};

/// Full pipeline from page color tables to flagged pages.
///
/// - Constructor takes the library by reference; the library is built once
///   and shared by every detector and thread
/// - Configuration methods consume and return `self`
/// - [`detect()`](Self::detect) takes `&self` so a detector can be reused
///
/// # Example
///
/// ```
/// use colormap_match::{Catalog, ColorSample, ColorTable, RainbowDetector, ReferenceLibrary};
///
/// let catalog = Catalog::matplotlib();
/// let library = ReferenceLibrary::build(&catalog, 16).unwrap();
/// let detector = RainbowDetector::new(&library, &catalog).max_diff(1.0).cm_thresh(0.5);
///
/// let table = ColorTable::new("page-1", vec![ColorSample { rgb: [12, 34, 56], count: 1 }]);
/// let result = detector.detect(vec![table]).unwrap();
/// assert!(result.flagged.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct RainbowDetector<'a> {
    library: &'a ReferenceLibrary,
    classifier: RainbowClassifier,
    max_diff: f64,
}

impl<'a> RainbowDetector<'a> {
    /// Detector with default thresholds for the rainbow family of `catalog`.
    pub fn new(library: &'a ReferenceLibrary, catalog: &Catalog) -> Self {
        Self {
            library,
            classifier: RainbowClassifier::from_catalog(catalog).with_threshold(DEFAULT_CM_THRESH),
            max_diff: DEFAULT_MAX_DIFF,
        }
    }

    /// Maximum CAM02-UCS distance for a match (exclusive).
    #[inline]
    pub fn max_diff(mut self, max_diff: f64) -> Self {
        self.max_diff = max_diff;
        self
    }

    /// Minimum rainbow `pct_cm` to flag a page (exclusive).
    #[inline]
    pub fn cm_thresh(mut self, cm_thresh: f64) -> Self {
        self.classifier = self.classifier.with_threshold(cm_thresh);
        self
    }

    /// Separator before the page number in page ids.
    #[inline]
    pub fn separator(mut self, separator: char) -> Self {
        self.classifier = self.classifier.with_separator(separator);
        self
    }

    pub fn library(&self) -> &ReferenceLibrary {
        self.library
    }

    /// Convert, match and classify a batch of pages.
    pub fn detect(&self, tables: Vec<ColorTable>) -> Result<Classification, MatchError> {
        let pages = convert_tables(tables)?;
        let statistics = ColormapMatcher::new(self.library)
            .with_max_diff(self.max_diff)
            .match_pages(&pages);
        tracing::debug!(
            pages = pages.len(),
            statistics = statistics.len(),
            "Matched pages"
        );
        Ok(self.classifier.classify(statistics))
    }

    /// Extract colors from decoded pages, then [`detect`](Self::detect).
    ///
    /// Pages with only background pixels contribute nothing.
    pub fn detect_images(&self, pages: &[(String, PageImage)]) -> Result<Classification, MatchError> {
        let tables = pages
            .iter()
            .filter_map(|(id, image)| extract_colors(image, id))
            .collect();
        self.detect(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::Category;
    use crate::table::ColorSample;

    fn two_map_library() -> (Catalog, ReferenceLibrary) {
        let catalog = Catalog::new(
            vec![(Category::Miscellaneous, vec!["stripes".into(), "ramp".into()])],
            vec![],
            vec!["stripes".into()],
        );
        let library = ReferenceLibrary::from_colormaps(
            2,
            vec![
                (
                    "stripes".into(),
                    Category::Miscellaneous,
                    vec![[1.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
                ),
                (
                    "ramp".into(),
                    Category::Miscellaneous,
                    vec![[0.2, 0.2, 0.2], [0.6, 0.6, 0.6]],
                ),
            ],
        )
        .unwrap();
        (catalog, library)
    }

    #[test]
    fn test_detect_flags_rainbow_page() {
        let (catalog, library) = two_map_library();
        let detector = RainbowDetector::new(&library, &catalog);
        let tables = vec![
            ColorTable::new(
                "doc-1",
                vec![
                    ColorSample { rgb: [255, 0, 0], count: 10 },
                    ColorSample { rgb: [0, 0, 255], count: 3 },
                ],
            ),
            ColorTable::new("doc-2", vec![ColorSample { rgb: [51, 51, 51], count: 1 }]),
        ];
        let result = detector.detect(tables).unwrap();
        assert_eq!(result.flagged.len(), 1);
        assert_eq!(result.flagged[0].page_id, "doc-1");
        assert_eq!(result.flagged[0].page_number, Some(1));
        assert_eq!(result.statistics.len(), 4);
    }

    #[test]
    fn test_threshold_override() {
        let (catalog, library) = two_map_library();
        let table = ColorTable::new("p", vec![ColorSample { rgb: [255, 0, 0], count: 1 }]);

        // Half the stripes samples: 0.5 is not above the default threshold
        let default = RainbowDetector::new(&library, &catalog)
            .detect(vec![table.clone()])
            .unwrap();
        assert!(default.flagged.is_empty());

        let lowered = RainbowDetector::new(&library, &catalog)
            .cm_thresh(0.4)
            .detect(vec![table])
            .unwrap();
        assert_eq!(lowered.flagged.len(), 1);
    }

    #[test]
    fn test_detect_images_skips_blank_pages() {
        let (catalog, library) = two_map_library();
        let blank = PageImage::from_rgb(1, 1, vec![255, 255, 255]).unwrap();
        let result = RainbowDetector::new(&library, &catalog)
            .detect_images(&[("blank".to_string(), blank)])
            .unwrap();
        assert!(result.flagged.is_empty());
        assert!(result.statistics.is_empty());
    }
}
