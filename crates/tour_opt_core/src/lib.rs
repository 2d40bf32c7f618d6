//! Euclidean TSP heuristic: nearest-neighbor construction followed by 2-opt
//! local search, on integer-rounded distances.

mod algo;
mod city;
mod constants;
mod error;
mod geo;
pub mod interrupt;
mod io;
pub mod logging;
mod runner;
mod tour;

pub use geo::geometry;
pub use io::{input, options, output};

pub use algo::builder::{Construction, NearestNeighbor};
pub use algo::optimizer::{
    EvaluationMode, OptimizeStats, Optimized, OptimizerConfig, Schedule, TwoOpt,
};
pub use algo::termination::{StopReason, Termination};
pub use city::{City, CitySet};
pub use error::{Error, Result};
pub use io::options::SolverOptions;
pub use runner::{Solver, TourResult};
pub use tour::{Tour, TourMetrics};
