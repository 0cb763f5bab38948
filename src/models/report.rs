use colormap_match::{Classification, ColorTable, FlaggedPage, MatchStatistic};
use serde::Serialize;

use crate::error::LoadError;

/// A page that was flagged as using a rainbow colormap
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FlaggedEntry {
    pub page_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
}

impl From<FlaggedPage> for FlaggedEntry {
    fn from(page: FlaggedPage) -> Self {
        Self {
            page_id: page.page_id,
            page_number: page.page_number,
        }
    }
}

/// One row of the coverage table
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatisticEntry {
    pub page: String,
    pub colormap: String,
    pub pct_cm: f64,
    pub pct_page: f64,
}

impl From<MatchStatistic> for StatisticEntry {
    fn from(row: MatchStatistic) -> Self {
        Self {
            page: row.page_id,
            colormap: row.colormap,
            pct_cm: row.pct_cm,
            pct_page: row.pct_page,
        }
    }
}

/// An input that never became a page
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageFailure {
    pub source: String,
    pub reason: String,
}

impl From<&LoadError> for PageFailure {
    fn from(error: &LoadError) -> Self {
        Self {
            source: error.source_id().to_string(),
            reason: error.to_string(),
        }
    }
}

/// Everything one detection run produced.
///
/// `colors` holds the per-page color tables for debug export and is left
/// out of the JSON output.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DetectionReport {
    pub flagged: Vec<FlaggedEntry>,
    pub statistics: Vec<StatisticEntry>,
    pub failures: Vec<PageFailure>,
    /// Pages that loaded but held only background colors
    pub blank: Vec<String>,
    #[serde(skip)]
    pub colors: Vec<ColorTable>,
}

impl DetectionReport {
    pub fn new(
        classification: Classification,
        colors: Vec<ColorTable>,
        failures: Vec<PageFailure>,
        blank: Vec<String>,
    ) -> Self {
        Self {
            flagged: classification.flagged.into_iter().map(Into::into).collect(),
            statistics: classification.statistics.into_iter().map(Into::into).collect(),
            failures,
            blank,
            colors,
        }
    }

    pub fn is_flagged(&self, page_id: &str) -> bool {
        self.flagged.iter().any(|f| f.page_id == page_id)
    }

    /// Number of pages that reached the matcher.
    pub fn page_count(&self) -> usize {
        self.colors.len()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
