//! Rounded Euclidean metric shared by construction and 2-opt.
//!
//! Every edge is rounded on its own before summing, so tour lengths are exact
//! integers and a reversal delta built from four rounded edges always equals
//! the difference of two full recomputations.

use crate::City;

/// `round(sqrt(dx² + dy²))`, half away from zero.
#[inline]
pub fn distance(a: City, b: City) -> i64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt().round() as i64
}

/// Closed tour length including the edge from the last city back to the first.
/// Empty and single-city tours have length 0.
pub fn tour_length(cities: &[City], tour: &[usize]) -> i64 {
    let n = tour.len();
    if n < 2 {
        return 0;
    }
    let mut sum = 0;
    for i in 0..n {
        sum += distance(cities[tour[i]], cities[tour[(i + 1) % n]]);
    }
    sum
}

/// Length change from reversing positions `i..=k` of a cyclic tour.
///
/// Only the edges `(i-1, i)` and `(k, k+1)` change; both neighbours wrap.
/// Requires `i <= k < tour.len()`.
#[inline]
pub fn reversal_delta(cities: &[City], tour: &[usize], i: usize, k: usize) -> i64 {
    let n = tour.len();
    if k - i + 1 == n {
        // whole cycle
        return 0;
    }
    let a = cities[tour[(i + n - 1) % n]];
    let b = cities[tour[i]];
    let c = cities[tour[k]];
    let d = cities[tour[(k + 1) % n]];

    distance(a, c) + distance(b, d) - distance(a, b) - distance(c, d)
}
