// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport-aware placement correction.
//!
//! The panel is placed on its preferred side unless it would poke out of the
//! top of the viewport: when the trigger's top edge minus the panel height is
//! above the viewport top, the panel goes below the trigger instead.
//!
//! Only the vertical (top-edge) case is corrected. Horizontal clipping is not
//! modeled.
//!
//! ```
//! use kurbo::Rect;
//! use understory_tooltip::placement::resolve;
//! use understory_tooltip::types::Placement;
//!
//! let trigger = Rect::new(10.0, 50.0, 34.0, 74.0);
//! assert_eq!(resolve(Placement::Top, Some(trigger), Some(80.0)), Placement::Bottom);
//! assert_eq!(resolve(Placement::Top, Some(trigger), Some(40.0)), Placement::Top);
//! ```

use kurbo::Rect;

use crate::types::Placement;

/// Top edge of the viewport in viewport-relative coordinates.
pub const VIEWPORT_TOP: f64 = 0.0;

/// Effective placement for a panel of `panel_height` next to `trigger`.
///
/// `trigger` is the trigger's bounding rectangle relative to the viewport.
/// A missing measurement (element not laid out yet) means no correction.
pub fn resolve(preferred: Placement, trigger: Option<Rect>, panel_height: Option<f64>) -> Placement {
    let (Some(trigger), Some(height)) = (trigger, panel_height) else {
        return preferred;
    };
    if trigger.y0 - height < VIEWPORT_TOP {
        Placement::Bottom
    } else {
        preferred
    }
}

/// Holds the preferred and the currently effective placement of one tooltip.
#[derive(Copy, Clone, Debug)]
pub struct PlacementResolver {
    preferred: Placement,
    effective: Placement,
}

impl PlacementResolver {
    /// Start with the effective placement equal to `preferred`.
    pub fn new(preferred: Placement) -> Self {
        Self {
            preferred,
            effective: preferred,
        }
    }

    /// Configured placement.
    pub fn preferred(&self) -> Placement {
        self.preferred
    }

    /// Placement currently in effect.
    pub fn effective(&self) -> Placement {
        self.effective
    }

    /// Re-run the clip check against fresh measurements.
    ///
    /// Returns the previous placement when the effective placement changed.
    pub fn update(&mut self, trigger: Option<Rect>, panel_height: Option<f64>) -> Option<Placement> {
        let next = resolve(self.preferred, trigger, panel_height);
        if next == self.effective {
            return None;
        }
        let prev = self.effective;
        tracing::debug!(from = ?prev, to = ?next, "tooltip placement changed");
        self.effective = next;
        Some(prev)
    }
}
