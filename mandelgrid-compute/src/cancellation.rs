use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

/// Polled by render loops between rows.
///
/// Checkers are shared by reference across the rayon pool, hence `Sync`.
pub trait CancellationChecker: Sync {
    fn is_cancelled(&self) -> bool;
}

/// For renders that always run to completion.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeverCancel;

impl CancellationChecker for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Cancelled once the shared flag is raised.
#[derive(Clone, Debug)]
pub struct AtomicBoolChecker {
    flag: Arc<AtomicBool>,
}

impl AtomicBoolChecker {
    pub fn new(flag: Arc<AtomicBool>) -> Self {
        Self { flag }
    }
}

impl CancellationChecker for AtomicBoolChecker {
    fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Cancelled once the shared render generation moves past the one this
/// checker was issued for. Starting a new render bumps the counter, which
/// retires every render still in flight.
#[derive(Clone, Debug)]
pub struct GenerationChecker {
    current: Arc<AtomicU32>,
    issued: u32,
}

impl GenerationChecker {
    /// Checker for the generation the counter holds right now.
    pub fn issue(current: Arc<AtomicU32>) -> Self {
        let issued = current.load(Ordering::Acquire);
        Self { current, issued }
    }

    pub fn generation(&self) -> u32 {
        self.issued
    }
}

impl CancellationChecker for GenerationChecker {
    fn is_cancelled(&self) -> bool {
        self.current.load(Ordering::Acquire) != self.issued
    }
}
