// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility state machine: when the panel is shown and what dismisses it.
//!
//! ## Transitions
//!
//! | state                | input                | next                 |
//! |----------------------|----------------------|----------------------|
//! | `Hidden`             | `Settled`            | `Visible(mode)`      |
//! | `Visible(Transient)` | `HoverEnd`           | `Hidden`             |
//! | `Visible(Sticky)`    | `HoverEnd`           | `Visible(Sticky)`    |
//! | `Visible(Sticky)`    | `OutsideInteraction` | `Hidden`             |
//! | `Visible(Transient)` | `OutsideInteraction` | `Visible(Transient)` |
//!
//! Every other pair leaves the state unchanged.
//!
//! [`Visibility::transition`] is pure. [`VisibilityController`] pairs it with
//! the `hovering` flag that guards against starting a second sampling cycle
//! while one hover session is already in progress.
//!
//! ```
//! use understory_tooltip::types::Mode;
//! use understory_tooltip::visibility::{Visibility, VisibilityInput};
//!
//! let shown = Visibility::Hidden.transition(VisibilityInput::Settled, Mode::Sticky);
//! assert_eq!(shown, Visibility::Visible(Mode::Sticky));
//! assert!(shown.transition(VisibilityInput::HoverEnd, Mode::Sticky).is_visible());
//! ```

use crate::types::Mode;

/// Whether the panel is shown, and under which dismissal policy.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Visibility {
    /// Panel hidden.
    #[default]
    Hidden,
    /// Panel shown.
    Visible(Mode),
}

/// Inputs consumed by the visibility state machine.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum VisibilityInput {
    /// Hover intent was confirmed.
    Settled,
    /// The pointer left the trigger (or the trigger lost focus).
    HoverEnd,
    /// A pointer-down landed outside the panel.
    OutsideInteraction,
}

impl Visibility {
    /// Next state for `input`. `mode` is the policy adopted when becoming visible.
    pub fn transition(self, input: VisibilityInput, mode: Mode) -> Self {
        use VisibilityInput::*;
        match (self, input) {
            (Self::Hidden, Settled) => Self::Visible(mode),
            (Self::Visible(Mode::Transient), HoverEnd) => Self::Hidden,
            (Self::Visible(Mode::Sticky), OutsideInteraction) => Self::Hidden,
            (state, _) => state,
        }
    }

    /// Whether the panel is shown.
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Visible(_))
    }
}

/// Visibility plus the hover-session guard for one tooltip.
#[derive(Clone, Debug)]
pub struct VisibilityController {
    mode: Mode,
    state: Visibility,
    hovering: bool,
}

impl VisibilityController {
    /// Create a hidden controller for the given dismissal policy.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            state: Visibility::Hidden,
            hovering: false,
        }
    }

    /// Current state.
    pub fn state(&self) -> Visibility {
        self.state
    }

    /// Dismissal policy.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether a hover session is in progress.
    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// Start a hover session.
    ///
    /// Returns `false` when one is already in progress, in which case the
    /// caller must not start another sampling cycle.
    pub fn begin_hover(&mut self) -> bool {
        if self.hovering {
            return false;
        }
        self.hovering = true;
        true
    }

    /// Hover intent confirmed. Returns the new state when it changed.
    pub fn settle(&mut self) -> Option<Visibility> {
        self.hovering = true;
        self.apply(VisibilityInput::Settled)
    }

    /// End the hover session. Returns the new state when it changed.
    pub fn end_hover(&mut self) -> Option<Visibility> {
        self.hovering = false;
        self.apply(VisibilityInput::HoverEnd)
    }

    /// Pointer-down outside the panel. Returns the new state when it changed.
    pub fn outside_interaction(&mut self) -> Option<Visibility> {
        self.apply(VisibilityInput::OutsideInteraction)
    }

    fn apply(&mut self, input: VisibilityInput) -> Option<Visibility> {
        let next = self.state.transition(input, self.mode);
        if next == self.state {
            return None;
        }
        tracing::debug!(from = ?self.state, to = ?next, ?input, "tooltip visibility changed");
        self.state = next;
        Some(next)
    }
}
