use tour_opt_derive::New;

use crate::{
    City, NearestNeighbor, OptimizeStats, OptimizerConfig, Result, Termination, Tour, TwoOpt,
};

/// What the solver hands to the output sink.
#[derive(Clone, Debug, PartialEq, Eq, New)]
pub struct TourResult {
    /// Closed length of the nearest-neighbor tour before 2-opt.
    pub initial_length: i64,
    pub final_length: i64,
    pub tour: Tour,
    pub stats: OptimizeStats,
}

impl TourResult {
    pub fn order(&self) -> &[usize] {
        self.tour.as_slice()
    }
}

/// Nearest-neighbor construction followed by 2-opt.
#[derive(Clone, Debug, Default)]
pub struct Solver {
    builder: NearestNeighbor,
    optimizer: TwoOpt,
}

impl Solver {
    pub fn new(start_city: usize, config: OptimizerConfig) -> Result<Self> {
        Ok(Self {
            builder: NearestNeighbor::new(start_city),
            optimizer: TwoOpt::new(config)?,
        })
    }

    pub fn with_termination(mut self, termination: Termination) -> Self {
        self.optimizer = self.optimizer.with_termination(termination);
        self
    }

    pub fn solve(&self, cities: &[City]) -> Result<TourResult> {
        let construction = self.builder.build(cities)?;
        let initial_length = construction.tour.length(cities);
        log::info!(
            "solver: initial n={} length={initial_length}",
            cities.len()
        );

        let optimized = self.optimizer.optimize(cities, construction.tour);
        optimized.tour.metrics(cities);

        Ok(TourResult::new(
            initial_length,
            optimized.length,
            optimized.tour,
            optimized.stats,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::Solver;
    use crate::{CitySet, OptimizerConfig, StopReason, test_support::random_cities};

    #[test]
    fn solve_degenerate_inputs() {
        let solver = Solver::default();

        let empty = solver.solve(&CitySet::default()).expect("solve");
        assert!(empty.order().is_empty());
        assert_eq!(empty.final_length, 0);

        let single = solver
            .solve(&CitySet::from_coords(&[(7.0, 7.0)]))
            .expect("solve");
        assert_eq!(single.order(), &[0]);
        assert_eq!(single.final_length, 0);

        let pair = CitySet::from_coords(&[(0.0, 0.0), (6.0, 8.0)]);
        let both = solver.solve(&pair).expect("solve");
        assert_eq!(both.final_length, 2 * pair.distance(0, 1));
        assert_eq!(both.stats.stop, Some(StopReason::Trivial));
    }

    #[test]
    fn solve_square_keeps_perimeter() {
        let cities = CitySet::from_coords(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]);
        let result = Solver::default().solve(&cities).expect("solve");

        assert_eq!(result.order(), &[0, 1, 2, 3]);
        assert_eq!(result.initial_length, 40);
        assert_eq!(result.final_length, 40);
        assert_eq!(result.stats.stop, Some(StopReason::Converged));
    }

    #[test]
    fn solve_crossing_points_reaches_optimal_perimeter() {
        let cities = CitySet::from_coords(&[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0)]);
        let result = Solver::default().solve(&cities).expect("solve");

        assert_eq!(result.final_length, 40);
        assert!(result.tour.is_permutation_of(4));
    }

    #[test]
    fn solve_never_worse_than_construction() {
        for seed in 30..34 {
            let cities = random_cities(seed, 100, 1_000);
            let result = Solver::default().solve(&cities).expect("solve");

            assert!(result.final_length <= result.initial_length, "seed={seed}");
            assert_eq!(result.final_length, result.tour.length(&cities));
            assert!(result.tour.is_permutation_of(cities.len()));
        }
    }

    #[test]
    fn solve_keeps_every_city_at_the_coordinate_bound() {
        let cities =
            crate::input::parse_cities("0 -1e9 -1e9\n1 1e9 1e9\n2 1e9 -1e9\n3 -1e9 1e9")
                .expect("parse cities");
        let result = Solver::default().solve(&cities).expect("solve");

        assert!(result.tour.is_permutation_of(4));
        assert_eq!(result.final_length, 8_000_000_000);
    }

    #[test]
    fn solve_rejects_out_of_range_start_city() {
        let cities = CitySet::from_coords(&[(0.0, 0.0), (1.0, 1.0)]);
        let solver = Solver::new(5, OptimizerConfig::default()).expect("valid config");
        assert!(solver.solve(&cities).is_err());
    }
}
