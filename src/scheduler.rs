//! Deferred, coalescing center recomputation.
//!
//! Geometry changes only *request* a recomputation. The request is armed on
//! the next frame the host reports, after the surface has laid out the
//! change, and becomes due once its delay has elapsed since arming. A new
//! request before that re-arms on the following frame and keeps the longest
//! pending delay, so a burst of changes collapses into one recomputation that
//! always runs after the last of them.

use crate::constants::MOUNT_RECOMPUTE_DELAY_MS;
use std::time::{Duration, Instant};
use tracing::trace;

/// Why centers need recomputing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecomputeTrigger {
    /// A table was just created and has not been laid out
    Mount,
    /// A drag or resize was committed
    GeometryCommitted,
    /// Field list changed, so intrinsic height may have changed
    ContentChanged,
    TableRemoved,
    WindowResized,
    SettingsChanged,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    delay: Duration,
    armed_at: Option<Instant>,
}

#[derive(Debug, Clone)]
pub struct RecomputeScheduler {
    mount_delay: Duration,
    pending: Option<Pending>,
}

impl RecomputeScheduler {
    pub fn new(mount_delay: Duration) -> Self {
        Self {
            mount_delay,
            pending: None,
        }
    }

    pub fn set_mount_delay(&mut self, mount_delay: Duration) {
        self.mount_delay = mount_delay;
    }

    pub fn delay_for(&self, trigger: RecomputeTrigger) -> Duration {
        match trigger {
            RecomputeTrigger::Mount => self.mount_delay,
            _ => Duration::ZERO,
        }
    }

    pub fn request(&mut self, trigger: RecomputeTrigger) {
        let delay = self.delay_for(trigger);
        let delay = match self.pending {
            Some(pending) => pending.delay.max(delay),
            None => delay,
        };
        trace!(?trigger, delay_ms = delay.as_millis() as u64, "recompute requested");
        self.pending = Some(Pending {
            delay,
            armed_at: None,
        });
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Called once per frame. Returns true, and clears the request, when a
    /// recomputation should run now.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(pending) = self.pending.as_mut() else {
            return false;
        };
        let armed_at = *pending.armed_at.get_or_insert(now);
        if now.duration_since(armed_at) >= pending.delay {
            self.pending = None;
            true
        } else {
            false
        }
    }
}

impl Default for RecomputeScheduler {
    fn default() -> Self {
        Self::new(Duration::from_millis(MOUNT_RECOMPUTE_DELAY_MS))
    }
}
