//! Reference colormap library: sampled gradients with one index each

use std::collections::HashMap;

use super::catalog::{Catalog, Category};
use super::data;
use crate::api::MatchError;
use crate::color::{convert, ColorSpace, Jab};
use crate::index::{NearestIndex, Neighbor};

/// Default number of samples taken along each gradient.
pub const DEFAULT_SAMPLES: usize = 256;

/// One sampled reference colormap.
#[derive(Debug, Clone)]
pub struct ReferenceColormap {
    pub name: String,
    pub category: Category,
    /// Gradient samples in CAM02-UCS, in gradient order
    pub samples: Vec<Jab>,
    index: NearestIndex,
}

impl ReferenceColormap {
    fn new(name: String, category: Category, samples: Vec<Jab>) -> Self {
        let index = NearestIndex::new(samples.clone());
        Self {
            name,
            category,
            samples,
            index,
        }
    }

    /// Nearest sample for each point; `index` refers to [`Self::samples`].
    pub fn query(&self, points: &[Jab]) -> Vec<Neighbor> {
        self.index.query_batch(points)
    }
}

/// Immutable set of reference colormaps, built once per run.
///
/// Cheap to share by reference across threads.
#[derive(Debug, Clone)]
pub struct ReferenceLibrary {
    sample_count: usize,
    colormaps: Vec<ReferenceColormap>,
    by_name: HashMap<String, usize>,
}

impl ReferenceLibrary {
    /// Sample every non-excluded catalog name at `samples` positions.
    ///
    /// Fails with [`MatchError::UnknownColormap`] if a name has no gradient.
    pub fn build(catalog: &Catalog, samples: usize) -> Result<Self, MatchError> {
        let mut device = Vec::new();
        for (name, category) in catalog.names() {
            let gradient = data::gradient(name).ok_or_else(|| MatchError::unknown(name))?;
            device.push((name.to_string(), category, gradient.sample(samples)));
        }
        Self::from_colormaps(samples, device)
    }

    /// The default Matplotlib catalog at the default sample count.
    pub fn matplotlib() -> Result<Self, MatchError> {
        Self::build(&Catalog::matplotlib(), DEFAULT_SAMPLES)
    }

    /// Build from explicit sRGB1 samples, one entry per name.
    ///
    /// Later duplicates of a name are ignored.
    pub fn from_colormaps(
        sample_count: usize,
        colormaps: Vec<(String, Category, Vec<[f64; 3]>)>,
    ) -> Result<Self, MatchError> {
        let mut entries = Vec::with_capacity(colormaps.len());
        let mut by_name = HashMap::new();

        for (name, category, device) in colormaps {
            if by_name.contains_key(&name) {
                continue;
            }
            let samples = convert(&device, ColorSpace::Srgb1, ColorSpace::Cam02Ucs)?;
            by_name.insert(name.clone(), entries.len());
            entries.push(ReferenceColormap::new(name, category, samples));
        }

        tracing::debug!(
            colormaps = entries.len(),
            samples = sample_count,
            "Reference library built"
        );

        Ok(Self {
            sample_count,
            colormaps: entries,
            by_name,
        })
    }

    pub fn get(&self, name: &str) -> Result<&ReferenceColormap, MatchError> {
        self.by_name
            .get(name)
            .map(|&i| &self.colormaps[i])
            .ok_or_else(|| MatchError::unknown(name))
    }

    /// Colormaps in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &ReferenceColormap> {
        self.colormaps.iter()
    }

    pub fn len(&self) -> usize {
        self.colormaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colormaps.is_empty()
    }

    /// Samples per colormap (N).
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> ReferenceLibrary {
        ReferenceLibrary::from_colormaps(
            3,
            vec![
                (
                    "reds".into(),
                    Category::Sequential,
                    vec![[0.2, 0.0, 0.0], [0.6, 0.0, 0.0], [1.0, 0.0, 0.0]],
                ),
                (
                    "blues".into(),
                    Category::Sequential,
                    vec![[0.0, 0.0, 0.2], [0.0, 0.0, 0.6], [0.0, 0.0, 1.0]],
                ),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_from_colormaps_keeps_order() {
        let library = tiny();
        let names: Vec<&str> = library.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["reds", "blues"]);
        assert_eq!(library.sample_count(), 3);
    }

    #[test]
    fn test_get_unknown() {
        let library = tiny();
        assert!(library.get("reds").is_ok());
        assert_eq!(
            library.get("greens").unwrap_err(),
            MatchError::UnknownColormap {
                name: "greens".into()
            }
        );
    }

    #[test]
    fn test_query_finds_own_samples() {
        let library = tiny();
        let blues = library.get("blues").unwrap();
        let result = blues.query(&blues.samples);
        let indices: Vec<usize> = result.iter().map(|n| n.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert!(result.iter().all(|n| n.distance == 0.0));
    }

    #[test]
    fn test_build_fails_for_missing_gradient() {
        let catalog = Catalog::new(
            vec![(Category::Miscellaneous, vec!["jet".into(), "no_such_map".into()])],
            vec![],
            vec![],
        );
        let err = ReferenceLibrary::build(&catalog, 8).unwrap_err();
        assert_eq!(
            err,
            MatchError::UnknownColormap {
                name: "no_such_map".into()
            }
        );
    }

    #[test]
    fn test_build_skips_excluded() {
        let catalog = Catalog::new(
            vec![(Category::Sequential2, vec!["gray".into(), "hot".into()])],
            vec!["gray".into()],
            vec![],
        );
        let library = ReferenceLibrary::build(&catalog, 16).unwrap();
        assert_eq!(library.len(), 1);
        assert!(library.get("gray").is_err());
        assert_eq!(library.get("hot").unwrap().samples.len(), 16);
    }
}
