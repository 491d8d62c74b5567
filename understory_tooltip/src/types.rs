// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types shared by the tooltip components: samples, placements, modes, and outputs.
//!
//! ## Overview
//!
//! These types describe the inputs the [`Tooltip`](crate::tooltip::Tooltip) consumes and the
//! state it exposes to a rendering layer. They are referenced by the
//! [`intent`](crate::intent), [`visibility`](crate::visibility) and [`placement`](crate::placement) modules.

use core::time::Duration;

use kurbo::Point;

/// A pointer position captured at a point in time.
///
/// Timestamps are offsets from an arbitrary, host-defined epoch. Only the
/// difference between two timestamps is ever consulted.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerSample {
    /// Pointer position in page (or viewport) coordinates.
    pub position: Point,
    /// Capture time relative to the host epoch.
    pub timestamp: Duration,
}

impl PointerSample {
    /// Create a sample from a position and a timestamp.
    pub const fn new(position: Point, timestamp: Duration) -> Self {
        Self {
            position,
            timestamp,
        }
    }

    /// Convenience constructor taking coordinates and a millisecond timestamp.
    ///
    /// ```
    /// use understory_tooltip::types::PointerSample;
    /// let s = PointerSample::at(10.0, 20.0, 150);
    /// assert_eq!(s.timestamp.as_millis(), 150);
    /// ```
    pub const fn at(x: f64, y: f64, millis: u64) -> Self {
        Self::new(Point::new(x, y), Duration::from_millis(millis))
    }
}

/// Side of the trigger on which the panel is rendered.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Placement {
    /// Above the trigger.
    #[default]
    Top,
    /// Below the trigger.
    Bottom,
    /// Left of the trigger.
    Left,
    /// Right of the trigger.
    Right,
}

/// Dismissal policy of a tooltip.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Mode {
    /// Hidden again as soon as the pointer leaves the trigger.
    #[default]
    Transient,
    /// Stays open after the pointer leaves; closed by a pointer-down outside the panel.
    Sticky,
}

impl Mode {
    /// Map the `sticky` configuration flag to a mode.
    pub const fn from_sticky(sticky: bool) -> Self {
        if sticky { Self::Sticky } else { Self::Transient }
    }

    /// Whether this is [`Mode::Sticky`].
    pub const fn is_sticky(self) -> bool {
        matches!(self, Self::Sticky)
    }
}

/// The two measurable parts of a mounted tooltip.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Part {
    /// The icon button the pointer hovers.
    Trigger,
    /// The content panel revealed on hover intent.
    Panel,
}

/// Notifications produced by a mounted tooltip, drained with
/// [`Tooltip::drain_events`](crate::tooltip::Tooltip::drain_events).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TooltipEvent {
    /// Hover intent was confirmed by the velocity sampler.
    Settled,
    /// The panel became visible.
    Shown,
    /// The panel became hidden.
    Hidden,
    /// The effective placement changed.
    PlacementChanged {
        /// Placement before the change.
        from: Placement,
        /// Placement after the change.
        to: Placement,
    },
}

/// Everything a rendering layer needs to paint the panel.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TooltipView {
    /// Whether the panel is shown.
    pub visible: bool,
    /// Effective placement, possibly overridden from the preferred one.
    pub placement: Placement,
    /// Dismissal policy, which typically selects the panel style.
    pub mode: Mode,
}
