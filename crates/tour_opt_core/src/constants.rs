//! Defaults for construction and 2-opt scheduling.
//!
//! The large-input stride and patience values are empirical tuning carried as
//! defaults; none of them is derived.

pub(crate) const DEFAULT_START_CITY: usize = 0;

pub(crate) const DEFAULT_LARGE_INPUT_THRESHOLD: usize = 5_000;
pub(crate) const DEFAULT_LARGE_STRIDE: usize = 9;
pub(crate) const DEFAULT_LARGE_PATIENCE: usize = 2;
pub(crate) const DEFAULT_SMALL_STRIDE: usize = 1;
pub(crate) const DEFAULT_SMALL_PATIENCE: usize = 10;

/// Reversals cannot change the cyclic tour below this size.
pub(crate) const MIN_TOUR_SIZE_FOR_2OPT: usize = 3;

/// Segment starts between two progress lines of the 2-opt scan.
pub(crate) const PROGRESS_LOG_INTERVAL: usize = 10;

/// Largest accepted coordinate magnitude. Keeps every edge below 2^32 so
/// closed tour lengths stay exact in `i64` for any realistic city count.
pub(crate) const MAX_COORDINATE: f64 = 1e9;

pub(crate) const TOUR_FILE_EXTENSION: &str = ".tour";
