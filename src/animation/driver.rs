//! Looping moving-marker animation.
//!
//! The driver does not own a timer. Each scheduled frame is identified by a [`TickHandle`]; the
//! host delivers the handle back through [`AnimationDriver::tick`] and the driver answers with the
//! marker position plus the handle for the next frame. Restarting or cancelling invalidates any
//! handle still in flight, so a late frame from a previous path is ignored.

use crate::foundation::core::Point;
use crate::foundation::math::clamp01;
use crate::geometry::line::RouteLine;
use crate::viewport::config::MIN_OWNER_DURATION_MS;

/// Identifies one scheduled animation frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

impl TickHandle {
    #[cfg(test)]
    pub(crate) fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Raw identifier.
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Result of a processed frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickOutcome {
    /// Marker position along the line.
    pub position: Point,
    /// Pass fraction in `[0, 1]` used for `position`.
    pub fraction: f64,
    /// Handle of the next frame to schedule.
    pub next: TickHandle,
    /// Whether this frame completed a pass and reset the anchor.
    pub wrapped: bool,
}

#[derive(Clone, Debug)]
struct AnimationState {
    line: RouteLine,
    start_ms: f64,
    fraction: f64,
    handle: TickHandle,
    passes: u64,
}

/// Fraction of one pass after `elapsed_ms`, clamped to `[0, 1]`.
pub fn pass_fraction(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if !(duration_ms > 0.0) {
        return 1.0;
    }
    let f = elapsed_ms / duration_ms;
    if f.is_nan() { 0.0 } else { clamp01(f) }
}

/// Drives one marker along a route line, looping forever.
#[derive(Clone, Debug)]
pub struct AnimationDriver {
    duration_ms: f64,
    state: Option<AnimationState>,
    next_handle: u64,
}

impl AnimationDriver {
    /// Driver with a pass duration floored at [`MIN_OWNER_DURATION_MS`].
    pub fn new(duration_ms: f64) -> Self {
        let duration_ms = if duration_ms.is_nan() {
            MIN_OWNER_DURATION_MS
        } else {
            duration_ms.max(MIN_OWNER_DURATION_MS)
        };
        Self {
            duration_ms,
            state: None,
            next_handle: 0,
        }
    }

    /// Effective pass duration.
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Return `true` while a frame is outstanding.
    pub fn is_running(&self) -> bool {
        self.state.is_some()
    }

    /// Fraction reached by the last processed frame.
    pub fn fraction(&self) -> Option<f64> {
        self.state.as_ref().map(|s| s.fraction)
    }

    /// Number of completed passes since the last restart.
    pub fn passes(&self) -> u64 {
        self.state.as_ref().map_or(0, |s| s.passes)
    }

    /// Handle of the outstanding frame.
    pub fn pending(&self) -> Option<TickHandle> {
        self.state.as_ref().map(|s| s.handle)
    }

    /// Start a new loop along `line` anchored at `now_ms`.
    ///
    /// Any running loop is cancelled first. A line without length has nothing to traverse, so the
    /// driver stays idle and `None` is returned.
    pub fn restart(&mut self, line: RouteLine, now_ms: f64) -> Option<TickHandle> {
        self.cancel();
        if !(line.length() > 0.0) {
            tracing::debug!("route has no length; marker stays at start");
            return None;
        }
        let handle = self.issue();
        self.state = Some(AnimationState {
            line,
            start_ms: now_ms,
            fraction: 0.0,
            handle,
            passes: 0,
        });
        Some(handle)
    }

    /// Stop the loop; returns the frame handle the host should drop.
    pub fn cancel(&mut self) -> Option<TickHandle> {
        self.state.take().map(|s| s.handle)
    }

    /// Process the frame identified by `handle` at `now_ms`.
    ///
    /// Returns `None` for handles that are no longer current.
    pub fn tick(&mut self, handle: TickHandle, now_ms: f64) -> Option<TickOutcome> {
        let current = self.state.as_ref().map(|s| s.handle);
        if current != Some(handle) {
            tracing::trace!(handle = handle.id(), "ignoring stale animation frame");
            return None;
        }
        let next = self.issue();
        let duration = self.duration_ms;
        let state = self.state.as_mut()?;

        let fraction = pass_fraction(now_ms - state.start_ms, duration);
        let position = state.line.coordinate_at(fraction)?;
        let wrapped = fraction >= 1.0;
        if wrapped {
            state.start_ms = now_ms;
            state.passes += 1;
        }
        state.fraction = fraction;
        state.handle = next;

        Some(TickOutcome {
            position,
            fraction,
            next,
            wrapped,
        })
    }

    fn issue(&mut self) -> TickHandle {
        self.next_handle += 1;
        TickHandle(self.next_handle)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/driver.rs"]
mod tests;
