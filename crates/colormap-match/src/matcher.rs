//! Coverage statistics between pages and reference colormaps

use std::collections::HashSet;

use rayon::prelude::*;

use crate::reference::ReferenceLibrary;
use crate::table::PerceptualTable;

/// Default maximum CAM02-UCS distance for a page color to count as a match.
pub const DEFAULT_MAX_DIFF: f64 = 1.0;

/// Coverage of one reference colormap on one page.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchStatistic {
    pub page_id: String,
    pub colormap: String,
    /// Share of the colormap's samples matched by at least one page color
    pub pct_cm: f64,
    /// Share of the page's distinct colors that matched the colormap
    pub pct_page: f64,
}

/// Matches perceptual page tables against a reference library.
#[derive(Debug, Clone, Copy)]
pub struct ColormapMatcher<'a> {
    library: &'a ReferenceLibrary,
    max_diff: f64,
}

impl<'a> ColormapMatcher<'a> {
    pub fn new(library: &'a ReferenceLibrary) -> Self {
        Self {
            library,
            max_diff: DEFAULT_MAX_DIFF,
        }
    }

    /// Set the match distance. Matches must be strictly closer than this.
    pub fn with_max_diff(mut self, max_diff: f64) -> Self {
        self.max_diff = max_diff;
        self
    }

    pub fn max_diff(&self) -> f64 {
        self.max_diff
    }

    /// One statistic per colormap, sorted by `pct_cm` descending.
    ///
    /// Colormaps with equal `pct_cm` keep library order. An empty page
    /// produces no rows.
    pub fn match_page(&self, page: &PerceptualTable) -> Vec<MatchStatistic> {
        if page.is_empty() {
            return Vec::new();
        }

        let points = page.points();
        let n_rows = points.len() as f64;
        let n_samples = self.library.sample_count().max(1) as f64;

        let mut rows: Vec<MatchStatistic> = self
            .library
            .iter()
            .map(|colormap| {
                let mut matched_samples = HashSet::new();
                let mut matched_rows = 0usize;
                for neighbor in colormap.query(&points) {
                    if neighbor.distance < self.max_diff {
                        matched_samples.insert(neighbor.index);
                        matched_rows += 1;
                    }
                }
                MatchStatistic {
                    page_id: page.page_id.clone(),
                    colormap: colormap.name.clone(),
                    pct_cm: matched_samples.len() as f64 / n_samples,
                    pct_page: matched_rows as f64 / n_rows,
                }
            })
            .collect();

        rows.sort_by(|a, b| b.pct_cm.total_cmp(&a.pct_cm));

        if let Some(best) = rows.first() {
            tracing::debug!(
                page = %page.page_id,
                colormap = %best.colormap,
                pct_cm = best.pct_cm,
                pct_page = best.pct_page,
                "Best colormap match"
            );
        }
        rows
    }

    /// Match many pages in parallel. Output follows input page order.
    pub fn match_pages(&self, pages: &[PerceptualTable]) -> Vec<MatchStatistic> {
        pages
            .par_iter()
            .map(|page| self.match_page(page))
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect()
    }
}
