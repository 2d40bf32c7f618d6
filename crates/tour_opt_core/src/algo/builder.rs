//! Nearest-neighbor tour construction.
//!
//! Starting from a configurable city (index 0 unless overridden), repeatedly
//! walk to the closest unvisited city. The start city is a convention, not a
//! tuned choice. Candidates are scanned in ascending index order and replaced
//! only on a strictly smaller distance, so ties go to the lowest index.

use tour_opt_derive::New;

use crate::{City, Error, Result, Tour, constants::DEFAULT_START_CITY, geometry};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NearestNeighbor {
    start_city: usize,
}

impl Default for NearestNeighbor {
    fn default() -> Self {
        Self::new(DEFAULT_START_CITY)
    }
}

/// Output of [`NearestNeighbor::build`].
#[derive(Clone, Debug, PartialEq, Eq, New)]
pub struct Construction {
    pub tour: Tour,
    /// Open-path distance walked during construction, without the closing edge.
    pub travelled: i64,
}

impl NearestNeighbor {
    pub fn new(start_city: usize) -> Self {
        Self { start_city }
    }

    pub fn start_city(&self) -> usize {
        self.start_city
    }

    #[tour_opt_derive::timer("builder.nn")]
    pub fn build(&self, cities: &[City]) -> Result<Construction> {
        let n = cities.len();
        if n == 0 {
            return Ok(Construction::new(Tour::default(), 0));
        }
        if self.start_city >= n {
            return Err(Error::invalid_input(format!(
                "start city {} is out of range for {n} cities",
                self.start_city
            )));
        }

        let mut visited = vec![false; n];
        let mut order = Vec::with_capacity(n);
        let mut current = self.start_city;
        let mut travelled = 0;

        visited[current] = true;
        order.push(current);

        for _ in 1..n {
            let mut nearest = None;
            let mut nearest_dist = 0;
            for (candidate, _) in visited.iter().enumerate().filter(|(_, seen)| !**seen) {
                let dist = geometry::distance(cities[current], cities[candidate]);
                if nearest.is_none() || dist < nearest_dist {
                    nearest_dist = dist;
                    nearest = Some(candidate);
                }
            }

            let Some(next) = nearest else {
                unreachable!("{} cities left unvisited", n - order.len());
            };
            visited[next] = true;
            order.push(next);
            travelled += nearest_dist;
            current = next;
        }

        let tour = Tour::new(order);
        debug_assert!(tour.is_permutation_of(n));
        log::info!(
            "builder.nn: complete n={n} start={} travelled={travelled}",
            self.start_city
        );

        Ok(Construction::new(tour, travelled))
    }
}
