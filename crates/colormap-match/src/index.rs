//! Exact nearest-neighbor search over a small static point set
//!
//! Points are sorted once by lightness (J'). A query binary-searches its own
//! lightness and then walks outward in both directions, stopping each side
//! as soon as the lightness gap alone exceeds the best distance found. For
//! colormap samples, which are spread along J', this touches only a handful
//! of points per query.

use crate::color::Jab;

/// Result of a nearest-neighbor query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Position of the nearest point in the order it was given to the index
    pub index: usize,
    /// Euclidean distance to that point
    pub distance: f64,
}

struct Best {
    d2: f64,
    index: usize,
}

impl Best {
    #[inline]
    fn consider(&mut self, (point, index): &(Jab, usize), query: Jab) {
        let d2 = point.distance_squared(query);
        if d2 < self.d2 || (d2 == self.d2 && *index < self.index) {
            self.d2 = d2;
            self.index = *index;
        }
    }
}

/// Immutable exact k=1 index over `Jab` points.
#[derive(Debug, Clone)]
pub struct NearestIndex {
    /// Points sorted by `j`, each paired with its original position
    sorted: Vec<(Jab, usize)>,
    /// `j` of each entry in `sorted`, for the binary search
    keys: Vec<f64>,
}

impl NearestIndex {
    pub fn new(points: Vec<Jab>) -> Self {
        let mut sorted: Vec<(Jab, usize)> = points.into_iter().enumerate().map(|(i, p)| (p, i)).collect();
        sorted.sort_by(|a, b| a.0.j.total_cmp(&b.0.j).then(a.1.cmp(&b.1)));
        let keys = sorted.iter().map(|(p, _)| p.j).collect();
        Self { sorted, keys }
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Nearest point to `query`, or `None` for an empty index.
    ///
    /// Ties resolve to the lowest original position.
    pub fn query(&self, query: Jab) -> Option<Neighbor> {
        if self.sorted.is_empty() {
            return None;
        }

        let start = self.keys.partition_point(|&j| j < query.j);
        let mut best = Best {
            d2: f64::INFINITY,
            index: usize::MAX,
        };

        // Upward from the insertion point
        for entry in &self.sorted[start..] {
            let gap = entry.0.j - query.j;
            if gap * gap > best.d2 {
                break;
            }
            best.consider(entry, query);
        }
        // Downward
        for entry in self.sorted[..start].iter().rev() {
            let gap = query.j - entry.0.j;
            if gap * gap > best.d2 {
                break;
            }
            best.consider(entry, query);
        }

        Some(Neighbor {
            index: best.index,
            distance: best.d2.sqrt(),
        })
    }

    /// Query every point independently. Empty for an empty index.
    pub fn query_batch(&self, queries: &[Jab]) -> Vec<Neighbor> {
        queries.iter().filter_map(|&q| self.query(q)).collect()
    }
}
