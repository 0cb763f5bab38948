//! Static catalog of reference colormap names
//!
//! The default catalog follows the Matplotlib colormap reference grouping.
//! Grayscale-like maps are listed but excluded from the library, since any
//! black and white content would match them.

use std::collections::HashSet;
use std::fmt;

/// Colormap category, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    PerceptuallyUniformSequential,
    Sequential,
    Sequential2,
    Diverging,
    Qualitative,
    Miscellaneous,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::PerceptuallyUniformSequential => "Perceptually Uniform Sequential",
            Category::Sequential => "Sequential",
            Category::Sequential2 => "Sequential (2)",
            Category::Diverging => "Diverging",
            Category::Qualitative => "Qualitative",
            Category::Miscellaneous => "Miscellaneous",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const PERCEPTUALLY_UNIFORM: &[&str] = &["viridis", "plasma", "inferno", "magma"];

const SEQUENTIAL: &[&str] = &[
    "Greys", "Purples", "Blues", "Greens", "Oranges", "Reds", "YlOrBr", "YlOrRd", "OrRd", "PuRd",
    "RdPu", "BuPu", "GnBu", "PuBu", "YlGnBu", "PuBuGn", "BuGn", "YlGn",
];

const SEQUENTIAL_2: &[&str] = &[
    "binary",
    "gist_yarg",
    "gist_gray",
    "gray",
    "bone",
    "pink",
    "spring",
    "summer",
    "autumn",
    "winter",
    "cool",
    "Wistia",
    "hot",
    "afmhot",
    "gist_heat",
    "copper",
];

const DIVERGING: &[&str] = &[
    "PiYG", "PRGn", "BrBG", "PuOr", "RdGy", "RdBu", "RdYlBu", "RdYlGn", "Spectral", "coolwarm",
    "bwr", "seismic",
];

const QUALITATIVE: &[&str] = &[
    "Pastel1", "Pastel2", "Paired", "Accent", "Dark2", "Set1", "Set2", "Set3", "tab10", "tab20",
    "tab20b", "tab20c",
];

const MISCELLANEOUS: &[&str] = &[
    "flag",
    "prism",
    "ocean",
    "gist_earth",
    "terrain",
    "gist_stern",
    "gnuplot",
    "gnuplot2",
    "CMRmap",
    "cubehelix",
    "brg",
    "hsv",
    "gist_rainbow",
    "rainbow",
    "jet",
    "nipy_spectral",
    "gist_ncar",
];

const EXCLUDED: &[&str] = &["Greys", "binary", "gist_yarg", "gist_gray", "gray"];

const RAINBOW: &[&str] = &[
    "prism",
    "hsv",
    "gist_rainbow",
    "rainbow",
    "nipy_spectral",
    "gist_ncar",
    "jet",
];

/// Ordered colormap names by category, plus the excluded and rainbow sets.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    categories: Vec<(Category, Vec<String>)>,
    excluded: Vec<String>,
    rainbow: Vec<String>,
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl Catalog {
    /// Build a catalog from explicit lists.
    pub fn new(
        categories: Vec<(Category, Vec<String>)>,
        excluded: Vec<String>,
        rainbow: Vec<String>,
    ) -> Self {
        Self {
            categories,
            excluded,
            rainbow,
        }
    }

    /// The default catalog of Matplotlib colormaps.
    pub fn matplotlib() -> Self {
        Self::new(
            vec![
                (
                    Category::PerceptuallyUniformSequential,
                    owned(PERCEPTUALLY_UNIFORM),
                ),
                (Category::Sequential, owned(SEQUENTIAL)),
                (Category::Sequential2, owned(SEQUENTIAL_2)),
                (Category::Diverging, owned(DIVERGING)),
                (Category::Qualitative, owned(QUALITATIVE)),
                (Category::Miscellaneous, owned(MISCELLANEOUS)),
            ],
            owned(EXCLUDED),
            owned(RAINBOW),
        )
    }

    /// All categories with every listed name, excluded ones included.
    pub fn categories(&self) -> &[(Category, Vec<String>)] {
        &self.categories
    }

    /// Names that get a library entry, in catalog order.
    ///
    /// Excluded names are skipped and a name listed twice is kept only
    /// under its first category.
    pub fn names(&self) -> Vec<(&str, Category)> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for (category, names) in &self.categories {
            for name in names {
                if self.is_excluded(name) || !seen.insert(name.as_str()) {
                    continue;
                }
                out.push((name.as_str(), *category));
            }
        }
        out
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.iter().any(|n| n == name)
    }

    pub fn is_rainbow(&self, name: &str) -> bool {
        self.rainbow.iter().any(|n| n == name)
    }

    /// Rainbow-family names.
    pub fn rainbow(&self) -> &[String] {
        &self.rainbow
    }

    pub fn excluded(&self) -> &[String] {
        &self.excluded
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::matplotlib()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excluded_names_are_skipped() {
        let catalog = Catalog::matplotlib();
        let names: Vec<&str> = catalog.names().into_iter().map(|(n, _)| n).collect();
        for excluded in EXCLUDED {
            assert!(!names.contains(excluded), "{excluded} should be excluded");
        }
        assert!(names.contains(&"jet"));
        assert!(names.contains(&"viridis"));
    }

    #[test]
    fn test_names_keep_catalog_order() {
        let catalog = Catalog::matplotlib();
        let names = catalog.names();
        assert_eq!(names[0], ("viridis", Category::PerceptuallyUniformSequential));
        assert_eq!(names[4], ("Purples", Category::Sequential));
        assert_eq!(names.last(), Some(&("gist_ncar", Category::Miscellaneous)));
    }

    #[test]
    fn test_default_catalog_size() {
        let total: usize = Catalog::matplotlib()
            .categories()
            .iter()
            .map(|(_, n)| n.len())
            .sum();
        assert_eq!(total, 79);
        assert_eq!(Catalog::matplotlib().names().len(), 74);
    }

    #[test]
    fn test_duplicate_registered_once_under_first_category() {
        let catalog = Catalog::new(
            vec![
                (Category::Sequential, vec!["a".into(), "b".into()]),
                (Category::Diverging, vec!["b".into(), "c".into()]),
            ],
            vec![],
            vec![],
        );
        assert_eq!(
            catalog.names(),
            vec![
                ("a", Category::Sequential),
                ("b", Category::Sequential),
                ("c", Category::Diverging),
            ]
        );
    }

    #[test]
    fn test_rainbow_family() {
        let catalog = Catalog::matplotlib();
        assert!(catalog.is_rainbow("jet"));
        assert!(catalog.is_rainbow("nipy_spectral"));
        assert!(!catalog.is_rainbow("viridis"));
        assert_eq!(catalog.rainbow().len(), 7);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(Category::Sequential2.to_string(), "Sequential (2)");
        assert_eq!(
            Category::PerceptuallyUniformSequential.to_string(),
            "Perceptually Uniform Sequential"
        );
    }
}
