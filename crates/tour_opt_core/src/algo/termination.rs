use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

/// Why the 2-opt loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// Patience exhausted without an improving move.
    Converged,
    Deadline,
    Interrupted,
    /// Tour too small for any reversal to matter.
    Trivial,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Self::Converged => "converged",
            Self::Deadline => "deadline",
            Self::Interrupted => "interrupted",
            Self::Trivial => "trivial",
        };
        f.write_str(value)
    }
}

/// Early-stop guard consulted once at the top of every 2-opt round.
///
/// An unguarded run and a guarded run agree on every round completed before
/// the guard fires.
#[derive(Clone, Debug, Default)]
pub struct Termination {
    deadline: Option<Instant>,
    cancel: Option<Arc<AtomicBool>>,
}

impl Termination {
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Deadline measured from now. A limit past the clock's range means no deadline.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.deadline = Instant::now().checked_add(limit);
        self
    }

    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub(crate) fn check(&self) -> Option<StopReason> {
        if self
            .cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
        {
            return Some(StopReason::Interrupted);
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Some(StopReason::Deadline);
        }
        None
    }
}
