use super::config::AlignmentConfig;
use super::distance::DistanceMatrix;
use super::error::EngineError;
use super::progress::ProgressReporter;
use crate::core::models::coords::CoordinateSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation flag shared between a caller and running alignments.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Everything one alignment run reads: both chains, their distance matrices, the
/// configuration and the reporting/cancellation hooks.
#[derive(Clone, Copy)]
pub struct AlignmentContext<'a> {
    pub chain1: &'a CoordinateSet,
    pub chain2: &'a CoordinateSet,
    pub distances1: &'a DistanceMatrix,
    pub distances2: &'a DistanceMatrix,
    pub config: &'a AlignmentConfig,
    pub reporter: &'a ProgressReporter<'a>,
    pub cancel: &'a CancellationToken,
}

impl<'a> AlignmentContext<'a> {
    pub fn new(
        chain1: &'a CoordinateSet,
        chain2: &'a CoordinateSet,
        distances1: &'a DistanceMatrix,
        distances2: &'a DistanceMatrix,
        config: &'a AlignmentConfig,
        reporter: &'a ProgressReporter<'a>,
        cancel: &'a CancellationToken,
    ) -> Self {
        Self {
            chain1,
            chain2,
            distances1,
            distances2,
            config,
            reporter,
            cancel,
        }
    }

    /// Fails with [`EngineError::Cancelled`] once cancellation was requested.
    #[inline]
    pub fn ensure_active(&self, phase: &'static str) -> Result<(), EngineError> {
        if self.cancel.is_cancelled() {
            Err(EngineError::Cancelled { phase })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancellation_is_visible_through_clones() {
        let token = CancellationToken::new();
        let observer = token.clone();
        assert!(!observer.is_cancelled());
        token.cancel();
        assert!(observer.is_cancelled());
    }
}
