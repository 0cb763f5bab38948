//! Per-page color tables
//!
//! [`ColorTable`] holds the distinct device colors of one page. Converting
//! it consumes the table and yields a [`PerceptualTable`] with the same rows
//! in the same order.

use crate::color::{convert, ColorError, ColorSpace, Jab};

/// One distinct color observed on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorSample {
    pub rgb: [u8; 3],
    /// Number of pixels with this color, always > 0
    pub count: u64,
}

/// Distinct colors of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTable {
    pub page_id: String,
    pub samples: Vec<ColorSample>,
}

/// A page color in CAM02-UCS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerceptualSample {
    pub jab: Jab,
    pub count: u64,
}

/// Distinct colors of one page in CAM02-UCS.
#[derive(Debug, Clone, PartialEq)]
pub struct PerceptualTable {
    pub page_id: String,
    pub samples: Vec<PerceptualSample>,
}

impl ColorTable {
    pub fn new(page_id: impl Into<String>, samples: Vec<ColorSample>) -> Self {
        Self {
            page_id: page_id.into(),
            samples,
        }
    }

    /// A table with no rows, for pages without color channels.
    pub fn empty(page_id: impl Into<String>) -> Self {
        Self::new(page_id, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Total pixel count across all rows.
    pub fn pixel_count(&self) -> u64 {
        self.samples.iter().map(|s| s.count).sum()
    }

    fn device_points(&self) -> Vec<[f64; 3]> {
        self.samples
            .iter()
            .map(|s| s.rgb.map(f64::from))
            .collect()
    }

    /// Convert to CAM02-UCS, consuming the device table.
    pub fn into_perceptual(self) -> Result<PerceptualTable, ColorError> {
        let jab = convert(&self.device_points(), ColorSpace::Srgb255, ColorSpace::Cam02Ucs)?;
        Ok(self.with_jab(jab))
    }

    fn with_jab(self, jab: Vec<Jab>) -> PerceptualTable {
        let samples = self
            .samples
            .iter()
            .zip(jab)
            .map(|(s, jab)| PerceptualSample { jab, count: s.count })
            .collect();
        PerceptualTable {
            page_id: self.page_id,
            samples,
        }
    }
}

impl PerceptualTable {
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample positions only, in row order.
    pub fn points(&self) -> Vec<Jab> {
        self.samples.iter().map(|s| s.jab).collect()
    }
}

/// Convert many pages with a single conversion call.
///
/// Rows are concatenated, converted once, and split back per page, so the
/// output matches calling [`ColorTable::into_perceptual`] on each table.
pub fn convert_tables(tables: Vec<ColorTable>) -> Result<Vec<PerceptualTable>, ColorError> {
    let points: Vec<[f64; 3]> = tables.iter().flat_map(|t| t.device_points()).collect();
    let mut jab = convert(&points, ColorSpace::Srgb255, ColorSpace::Cam02Ucs)?.into_iter();

    Ok(tables
        .into_iter()
        .map(|table| {
            let rows: Vec<Jab> = jab.by_ref().take(table.samples.len()).collect();
            table.with_jab(rows)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(rgb: [u8; 3], count: u64) -> ColorSample {
        ColorSample { rgb, count }
    }

    #[test]
    fn test_into_perceptual_keeps_rows_and_counts() {
        let table = ColorTable::new(
            "p1",
            vec![sample([255, 0, 0], 3), sample([0, 0, 255], 1)],
        );
        let perceptual = table.into_perceptual().unwrap();
        assert_eq!(perceptual.page_id, "p1");
        assert_eq!(perceptual.samples.len(), 2);
        assert_eq!(perceptual.samples[0].count, 3);
        assert!(perceptual.samples[0].jab.a > 0.0);
        assert!(perceptual.samples[1].jab.b < 0.0);
    }

    #[test]
    fn test_batch_matches_single_conversion() {
        let tables = vec![
            ColorTable::new("a", vec![sample([10, 20, 30], 1), sample([200, 100, 50], 2)]),
            ColorTable::empty("b"),
            ColorTable::new("c", vec![sample([1, 2, 3], 5)]),
        ];
        let single: Vec<PerceptualTable> = tables
            .iter()
            .cloned()
            .map(|t| t.into_perceptual().unwrap())
            .collect();
        let batch = convert_tables(tables).unwrap();
        assert_eq!(batch, single);
        assert!(batch[1].is_empty());
    }

    #[test]
    fn test_pixel_count() {
        let table = ColorTable::new("p", vec![sample([1, 1, 1], 4), sample([2, 2, 2], 6)]);
        assert_eq!(table.pixel_count(), 10);
    }
}
