//! 2-opt local search with first-improvement acceptance.
//!
//! A round scans segment starts `i` in `1..n-1` and ends `k` in `i+1..n`, both
//! advanced by the schedule's stride. Reversing `i..=k` is accepted as soon as
//! it is strictly shorter than the current tour, and the scan resumes at the
//! next `k`. Rounds without an accepted move count towards the patience limit;
//! any accepted move resets the count. With a stride above one the result is
//! not guaranteed to be 2-opt optimal.

use tour_opt_derive::{CliValue, New};

use crate::{
    City, Error, Result, Tour,
    algo::termination::{StopReason, Termination},
    constants::{
        DEFAULT_LARGE_INPUT_THRESHOLD, DEFAULT_LARGE_PATIENCE, DEFAULT_LARGE_STRIDE,
        DEFAULT_SMALL_PATIENCE, DEFAULT_SMALL_STRIDE, MIN_TOUR_SIZE_FOR_2OPT,
        PROGRESS_LOG_INTERVAL,
    },
    geometry,
};

/// How candidate lengths are obtained. Both modes accept exactly the same moves.
#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "evaluation")]
pub enum EvaluationMode {
    /// O(1) per candidate from the two boundary edges.
    Delta,
    /// Copy the tour, reverse the segment, recompute the whole length.
    Full,
}

/// Scan scheduling for the 2-opt loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OptimizerConfig {
    /// Inputs with more cities than this use the large stride and patience.
    pub large_input_threshold: usize,
    pub large_stride: usize,
    pub large_patience: usize,
    pub small_stride: usize,
    pub small_patience: usize,
    pub evaluation: EvaluationMode,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            large_input_threshold: DEFAULT_LARGE_INPUT_THRESHOLD,
            large_stride: DEFAULT_LARGE_STRIDE,
            large_patience: DEFAULT_LARGE_PATIENCE,
            small_stride: DEFAULT_SMALL_STRIDE,
            small_patience: DEFAULT_SMALL_PATIENCE,
            evaluation: EvaluationMode::Delta,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Schedule {
    pub stride: usize,
    pub patience: usize,
}

impl OptimizerConfig {
    pub fn schedule(&self, n: usize) -> Schedule {
        if n > self.large_input_threshold {
            Schedule {
                stride: self.large_stride,
                patience: self.large_patience,
            }
        } else {
            Schedule {
                stride: self.small_stride,
                patience: self.small_patience,
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("large-stride", self.large_stride),
            ("large-patience", self.large_patience),
            ("small-stride", self.small_stride),
            ("small-patience", self.small_patience),
        ] {
            if value == 0 {
                return Err(Error::invalid_input(format!("--{name} must be >= 1")));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OptimizeStats {
    pub rounds: usize,
    pub accepted: usize,
    pub candidates: u64,
    pub stop: Option<StopReason>,
    /// Tour length after each completed round.
    pub round_lengths: Vec<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq, New)]
pub struct Optimized {
    pub tour: Tour,
    pub length: i64,
    pub stats: OptimizeStats,
}

#[derive(Clone, Debug)]
pub struct TwoOpt {
    config: OptimizerConfig,
    termination: Termination,
}

impl Default for TwoOpt {
    fn default() -> Self {
        Self {
            config: OptimizerConfig::default(),
            termination: Termination::unbounded(),
        }
    }
}

impl TwoOpt {
    pub fn new(config: OptimizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            termination: Termination::unbounded(),
        })
    }

    pub fn with_termination(mut self, termination: Termination) -> Self {
        self.termination = termination;
        self
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    #[tour_opt_derive::timer("optimizer.2opt")]
    pub fn optimize(&self, cities: &[City], tour: Tour) -> Optimized {
        let n = tour.len();
        let mut current = tour;
        let mut best = current.length(cities);
        let mut stats = OptimizeStats::default();

        if n < MIN_TOUR_SIZE_FOR_2OPT {
            log::debug!("optimizer.2opt: skip n={n} reason=trivial_tour");
            stats.stop = Some(StopReason::Trivial);
            return Optimized::new(current, best, stats);
        }

        let Schedule { stride, patience } = self.config.schedule(n);
        log::info!(
            "optimizer.2opt: start n={n} length={best} stride={stride} patience={patience} evaluation={}",
            self.config.evaluation
        );

        let mut stagnant_rounds = 0;
        let stop = loop {
            if stagnant_rounds >= patience {
                break StopReason::Converged;
            }
            if let Some(reason) = self.termination.check() {
                break reason;
            }

            let accepted = self.run_round(cities, &mut current, &mut best, stride, &mut stats);
            stats.rounds += 1;
            stats.accepted += accepted;
            stats.round_lengths.push(best);

            if accepted == 0 {
                stagnant_rounds += 1;
            } else {
                stagnant_rounds = 0;
            }
            log::debug!(
                "optimizer.2opt: round={} accepted={accepted} length={best} stagnant={stagnant_rounds}",
                stats.rounds
            );
        };

        debug_assert!(current.is_permutation_of(n));
        debug_assert_eq!(best, current.length(cities));
        stats.stop = Some(stop);
        log::info!(
            "optimizer.2opt: complete n={n} length={best} rounds={} accepted={} candidates={} stop={stop}",
            stats.rounds,
            stats.accepted,
            stats.candidates
        );

        Optimized::new(current, best, stats)
    }

    /// One full scan; returns the number of accepted reversals.
    fn run_round(
        &self,
        cities: &[City],
        current: &mut Tour,
        best: &mut i64,
        stride: usize,
        stats: &mut OptimizeStats,
    ) -> usize {
        let n = current.len();
        let mut accepted = 0;

        for i in (1..n - 1).step_by(stride) {
            if i % PROGRESS_LOG_INTERVAL == 0 {
                log::trace!("optimizer.2opt: scan i={i} n={n} length={best}");
            }
            for k in (i + 1..n).step_by(stride) {
                stats.candidates += 1;
                match self.config.evaluation {
                    EvaluationMode::Delta => {
                        let delta = geometry::reversal_delta(cities, current.as_slice(), i, k);
                        if delta < 0 {
                            current.reverse_segment(i, k);
                            *best += delta;
                            accepted += 1;
                        }
                    }
                    EvaluationMode::Full => {
                        let candidate = current.reversed(i, k);
                        let length = candidate.length(cities);
                        if length < *best {
                            *current = candidate;
                            *best = length;
                            accepted += 1;
                        }
                    }
                }
            }
        }

        accepted
    }
}
