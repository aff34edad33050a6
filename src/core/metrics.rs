//! Logger and appender metrics for observability
//!
//! Counters for monitoring logger health: lines written, lines lost to sink
//! failures, and the rotation activity of file appenders.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use tinylog::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_dropped();
/// metrics.record_logged();
///
/// assert_eq!(metrics.dropped_count(), 1);
/// assert_eq!(metrics.total_logged(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Number of lines the sink failed to persist
    dropped_count: AtomicU64,

    /// Total number of lines successfully written
    total_logged: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            dropped_count: AtomicU64::new(0),
            total_logged: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn total_logged(&self) -> u64 {
        self.total_logged.load(Ordering::Relaxed)
    }

    /// Record a dropped line, returning the previous count
    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped_count.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a written line, returning the previous count
    #[inline]
    pub fn record_logged(&self) -> u64 {
        self.total_logged.fetch_add(1, Ordering::Relaxed)
    }

    /// Get drop rate as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if no lines have been processed.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count() as f64;
        let total = self.total_logged() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }

    pub fn reset(&self) {
        self.dropped_count.store(0, Ordering::Relaxed);
        self.total_logged.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            dropped_count: AtomicU64::new(self.dropped_count()),
            total_logged: AtomicU64::new(self.total_logged()),
        }
    }
}

/// Counters kept by the rotating file appender
#[derive(Debug, Default)]
pub struct RotationMetrics {
    /// Successful switches to a new file (the first open included)
    rotations: AtomicU64,
    rotation_failures: AtomicU64,
    /// Previous handles handed to the background closer
    handles_scheduled: AtomicU64,
    /// Handles the background closer has released
    handles_closed: AtomicU64,
    alias_updates: AtomicU64,
    alias_failures: AtomicU64,
    bytes_written: AtomicU64,
}

impl RotationMetrics {
    pub const fn new() -> Self {
        Self {
            rotations: AtomicU64::new(0),
            rotation_failures: AtomicU64::new(0),
            handles_scheduled: AtomicU64::new(0),
            handles_closed: AtomicU64::new(0),
            alias_updates: AtomicU64::new(0),
            alias_failures: AtomicU64::new(0),
            bytes_written: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn rotations(&self) -> u64 {
        self.rotations.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn rotation_failures(&self) -> u64 {
        self.rotation_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn handles_scheduled(&self) -> u64 {
        self.handles_scheduled.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn handles_closed(&self) -> u64 {
        self.handles_closed.load(Ordering::Acquire)
    }

    #[inline]
    pub fn alias_updates(&self) -> u64 {
        self.alias_updates.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn alias_failures(&self) -> u64 {
        self.alias_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_rotation(&self) -> u64 {
        self.rotations.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_rotation_failure(&self) -> u64 {
        self.rotation_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_handle_scheduled(&self) -> u64 {
        self.handles_scheduled.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_handle_closed(&self) -> u64 {
        self.handles_closed.fetch_add(1, Ordering::Release)
    }

    #[inline]
    pub fn record_alias_update(&self) -> u64 {
        self.alias_updates.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_alias_failure(&self) -> u64 {
        self.alias_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_bytes(&self, count: usize) -> u64 {
        self.bytes_written.fetch_add(count as u64, Ordering::Relaxed)
    }

    /// Handles scheduled for closing that the closer has not released yet
    pub fn pending_closes(&self) -> u64 {
        self.handles_scheduled().saturating_sub(self.handles_closed())
    }
}
