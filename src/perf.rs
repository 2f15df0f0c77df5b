//! Lightweight timing for hot paths.
//!
//! `profile_scope!` expands to a [`ScopedTimer`] only when the `profiling`
//! feature is enabled, otherwise to nothing:
//! ```ignore
//! fn recompute() {
//!     profile_scope!("recompute_centers");
//!     // ... work ...
//! }
//! ```

use std::time::Instant;
use tracing::{trace, warn};

/// Default threshold above which a scope is reported at warn level
pub const SLOW_SCOPE_MS: f64 = 4.0;

/// Times a scope and reports it on drop.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    warn_threshold_ms: f64,
}

impl ScopedTimer {
    pub fn new(name: &'static str, warn_threshold_ms: f64) -> Self {
        Self {
            name,
            start: Instant::now(),
            warn_threshold_ms,
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed = self.elapsed_ms();
        if elapsed > self.warn_threshold_ms {
            warn!(scope = self.name, elapsed_ms = elapsed, "slow scope");
        } else {
            trace!(scope = self.name, elapsed_ms = elapsed, "scope");
        }
    }
}

/// Profile a block. Zero-cost when profiling is disabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $crate::perf::SLOW_SCOPE_MS);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
}

pub use profile_scope;
