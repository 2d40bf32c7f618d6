use tour_opt_derive::New;

use crate::{City, geometry};

/// Cyclic visiting order over city indices; the last city connects back to the first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tour {
    order: Vec<usize>,
}

impl Tour {
    pub fn new(order: Vec<usize>) -> Self {
        Self { order }
    }

    /// Visits cities in input order.
    pub fn identity(n: usize) -> Self {
        Self::new((0..n).collect())
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn length(&self, cities: &[City]) -> i64 {
        geometry::tour_length(cities, &self.order)
    }

    /// True when every index in `0..n` appears exactly once.
    pub fn is_permutation_of(&self, n: usize) -> bool {
        if self.order.len() != n {
            return false;
        }
        let mut seen = vec![false; n];
        for &idx in &self.order {
            if idx >= n || seen[idx] {
                return false;
            }
            seen[idx] = true;
        }
        true
    }

    /// Copy with positions `i..=k` reversed.
    pub fn reversed(&self, i: usize, k: usize) -> Self {
        let mut candidate = self.clone();
        candidate.reverse_segment(i, k);
        candidate
    }

    pub(crate) fn reverse_segment(&mut self, i: usize, k: usize) {
        self.order[i..=k].reverse();
    }

    pub fn metrics(&self, cities: &[City]) -> TourMetrics {
        let n = self.len();

        if n < 2 {
            log::info!("metrics: n={n} nothing to report");
            return TourMetrics::default();
        }

        let edges: Vec<i64> = (0..n)
            .map(|i| geometry::distance(cities[self.order[i]], cities[self.order[(i + 1) % n]]))
            .collect();
        let total: i64 = edges.iter().sum();
        let longest = edges.iter().copied().max().unwrap_or(0);
        let average = total as f64 / n as f64;

        log::info!("metrics: n={n} total={total} longest_edge={longest} avg_edge={average:.2}");

        TourMetrics::new(total, longest, average)
    }
}

impl From<Vec<usize>> for Tour {
    fn from(order: Vec<usize>) -> Self {
        Self::new(order)
    }
}

#[derive(Debug, Default, PartialEq, New)]
pub struct TourMetrics {
    pub total: i64,
    pub longest: i64,
    pub average: f64,
}
