// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover intent: tell a deliberate pause over the trigger from a pointer passing through.
//!
//! ## Algorithm
//!
//! A sampling window holds a `reference` sample and the `latest` sample.
//! Pointer moves only replace `latest`. On every tick of a fixed cadence the
//! tracker computes the speed between the two:
//!
//! - `0` when no move arrived since the reference (equal timestamps),
//! - otherwise the Euclidean distance divided by the elapsed milliseconds.
//!
//! Below the sensitivity threshold the pointer is considered settled and the
//! window closes. Otherwise the window slides (`reference := latest`) and the
//! next tick compares against the new reference.
//!
//! ## Minimal example
//!
//! ```
//! use understory_tooltip::intent::{Tick, VelocityTracker};
//! use understory_tooltip::types::PointerSample;
//!
//! let mut t = VelocityTracker::new(0.1);
//! t.begin(PointerSample::at(0.0, 0.0, 0));
//! t.record(PointerSample::at(40.0, 30.0, 100)); // 50px in 100ms
//! assert_eq!(t.tick(), Tick::Moving { speed: 0.5 });
//! t.record(PointerSample::at(42.0, 30.0, 200)); // 2px in 100ms
//! assert_eq!(t.tick(), Tick::Settled);
//! assert_eq!(t.tick(), Tick::Idle);
//! ```

use crate::types::PointerSample;

/// Outcome of one periodic speed check.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Tick {
    /// No sampling window is open.
    Idle,
    /// The pointer is still moving; the window slid forward.
    Moving {
        /// Measured speed in pixels per millisecond.
        speed: f64,
    },
    /// Speed fell below the threshold; the window is closed.
    Settled,
}

#[derive(Copy, Clone, Debug)]
struct Window {
    reference: PointerSample,
    latest: PointerSample,
}

/// Speed between two samples in pixels per millisecond.
///
/// Returns `0.0` when `latest` is not newer than `reference`, which covers
/// the "no move since the reference" case without dividing by zero.
pub fn speed(reference: &PointerSample, latest: &PointerSample) -> f64 {
    let Some(elapsed) = latest.timestamp.checked_sub(reference.timestamp) else {
        return 0.0;
    };
    if elapsed.is_zero() {
        return 0.0;
    }
    let millis = elapsed.as_nanos() as f64 / 1_000_000.0;
    (latest.position - reference.position).hypot() / millis
}

/// Velocity-based hover intent detector.
///
/// Holds at most one sampling window. Callers drive it with [`begin`](Self::begin),
/// [`record`](Self::record), [`tick`](Self::tick) and [`end`](Self::end); scheduling the
/// ticks is left to the owner (see [`Tooltip`](crate::tooltip::Tooltip)).
#[derive(Clone, Debug)]
pub struct VelocityTracker {
    sensitivity: f64,
    window: Option<Window>,
}

impl VelocityTracker {
    /// Create an idle tracker with the given settle threshold (px/ms).
    pub fn new(sensitivity: f64) -> Self {
        Self {
            sensitivity,
            window: None,
        }
    }

    /// Settle threshold in pixels per millisecond.
    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }

    /// Whether a sampling window is open.
    pub fn is_sampling(&self) -> bool {
        self.window.is_some()
    }

    /// Open a window at `sample`, replacing any previous one.
    pub fn begin(&mut self, sample: PointerSample) {
        self.window = Some(Window {
            reference: sample,
            latest: sample,
        });
    }

    /// Record a pointer move. No speed is computed here.
    ///
    /// Ignored when no window is open or when `sample` predates the reference.
    pub fn record(&mut self, sample: PointerSample) {
        let Some(w) = self.window.as_mut() else {
            return;
        };
        if sample.timestamp < w.reference.timestamp {
            tracing::trace!(?sample, "dropping out-of-order pointer sample");
            return;
        }
        w.latest = sample;
    }

    /// Run one periodic speed check.
    pub fn tick(&mut self) -> Tick {
        let Some(w) = self.window.as_mut() else {
            return Tick::Idle;
        };
        let speed = speed(&w.reference, &w.latest);
        tracing::trace!(speed, threshold = self.sensitivity, "hover intent tick");
        if speed < self.sensitivity {
            self.window = None;
            Tick::Settled
        } else {
            w.reference = w.latest;
            Tick::Moving { speed }
        }
    }

    /// Close the window unconditionally.
    pub fn end(&mut self) {
        self.window = None;
    }
}
