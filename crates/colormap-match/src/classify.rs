//! Rainbow classification of match statistics

use std::collections::HashSet;

use crate::matcher::MatchStatistic;
use crate::reference::Catalog;

/// Default minimum `pct_cm` (exclusive) for a rainbow colormap to flag a page.
pub const DEFAULT_CM_THRESH: f64 = 0.5;

/// A page flagged as using a rainbow colormap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlaggedPage {
    pub page_id: String,
    /// Number after the last separator in the id, when there is one
    pub page_number: Option<u32>,
}

/// Flagged pages plus every statistic they were derived from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub flagged: Vec<FlaggedPage>,
    /// Full, unfiltered statistics
    pub statistics: Vec<MatchStatistic>,
}

impl Classification {
    pub fn is_flagged(&self, page_id: &str) -> bool {
        self.flagged.iter().any(|p| p.page_id == page_id)
    }
}

/// Parse the number after the last `separator` in `page_id`.
///
/// ```
/// use colormap_match::parse_page_number;
///
/// assert_eq!(parse_page_number("doc-7", '-'), Some(7));
/// assert_eq!(parse_page_number("my-doc-012", '-'), Some(12));
/// assert_eq!(parse_page_number("scan", '-'), None);
/// assert_eq!(parse_page_number("a-b", '-'), None);
/// ```
pub fn parse_page_number(page_id: &str, separator: char) -> Option<u32> {
    let (_, tail) = page_id.rsplit_once(separator)?;
    if tail.is_empty() || !tail.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    tail.parse().ok()
}

/// Flags pages where a rainbow colormap covers more than `threshold`.
#[derive(Debug, Clone)]
pub struct RainbowClassifier {
    rainbow: HashSet<String>,
    threshold: f64,
    separator: char,
}

impl RainbowClassifier {
    pub fn new<I, S>(rainbow: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rainbow: rainbow.into_iter().map(Into::into).collect(),
            threshold: DEFAULT_CM_THRESH,
            separator: '-',
        }
    }

    /// Classifier for the rainbow family of `catalog`.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self::new(catalog.rainbow().iter().cloned())
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn classify(&self, statistics: Vec<MatchStatistic>) -> Classification {
        let mut seen: HashSet<String> = HashSet::new();
        let mut flagged = Vec::new();

        for row in &statistics {
            if row.pct_cm <= self.threshold || !self.rainbow.contains(&row.colormap) {
                continue;
            }
            if seen.insert(row.page_id.clone()) {
                tracing::info!(
                    page = %row.page_id,
                    colormap = %row.colormap,
                    pct_cm = row.pct_cm,
                    "Rainbow colormap detected"
                );
                flagged.push(FlaggedPage {
                    page_id: row.page_id.clone(),
                    page_number: parse_page_number(&row.page_id, self.separator),
                });
            }
        }

        Classification {
            flagged,
            statistics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stat(page: &str, colormap: &str, pct_cm: f64) -> MatchStatistic {
        MatchStatistic {
            page_id: page.into(),
            colormap: colormap.into(),
            pct_cm,
            pct_page: 0.0,
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        let classifier = RainbowClassifier::new(["jet"]).with_threshold(0.5);
        let result = classifier.classify(vec![stat("a", "jet", 0.5), stat("b", "jet", 0.5 + 1e-9)]);
        assert_eq!(
            result.flagged,
            vec![FlaggedPage {
                page_id: "b".into(),
                page_number: None
            }]
        );
    }

    #[test]
    fn test_only_rainbow_family_flags() {
        let classifier = RainbowClassifier::new(["jet"]);
        let result = classifier.classify(vec![stat("a", "viridis", 0.9)]);
        assert!(result.flagged.is_empty());
        assert_eq!(result.statistics.len(), 1);
    }

    #[test]
    fn test_distinct_pages_in_first_appearance_order() {
        let classifier = RainbowClassifier::new(["jet", "hsv"]);
        let result = classifier.classify(vec![
            stat("doc-2", "jet", 0.8),
            stat("doc-1", "hsv", 0.7),
            stat("doc-2", "hsv", 0.6),
        ]);
        let ids: Vec<&str> = result.flagged.iter().map(|p| p.page_id.as_str()).collect();
        assert_eq!(ids, vec!["doc-2", "doc-1"]);
        assert_eq!(result.flagged[0].page_number, Some(2));
        assert!(result.is_flagged("doc-1"));
        assert!(!result.is_flagged("doc-3"));
    }

    #[test]
    fn test_statistics_are_unfiltered() {
        let rows = vec![stat("a", "jet", 0.1), stat("a", "viridis", 0.9)];
        let result = RainbowClassifier::new(["jet"]).classify(rows.clone());
        assert_eq!(result.statistics, rows);
    }

    #[test]
    fn test_custom_separator() {
        let classifier = RainbowClassifier::new(["jet"]).with_separator('_');
        let result = classifier.classify(vec![stat("report_p_12", "jet", 1.0)]);
        assert_eq!(result.flagged[0].page_number, Some(12));
    }

    #[test]
    fn test_page_number_parsing() {
        assert_eq!(parse_page_number("doc-7", '-'), Some(7));
        assert_eq!(parse_page_number("scan", '-'), None);
        assert_eq!(parse_page_number("a-b", '-'), None);
        assert_eq!(parse_page_number("a-", '-'), None);
        assert_eq!(parse_page_number("a--3", '-'), Some(3));
        assert_eq!(parse_page_number("a-+3", '-'), None);
        assert_eq!(parse_page_number("a-99999999999", '-'), None);
    }

    #[test]
    fn test_from_catalog() {
        let classifier = RainbowClassifier::from_catalog(&Catalog::matplotlib());
        let result = classifier.classify(vec![stat("p", "gist_ncar", 0.75)]);
        assert_eq!(result.flagged.len(), 1);
    }
}
