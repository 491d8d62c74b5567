// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Global listeners scoped to a mounted tooltip.
//!
//! A tooltip watches two things outside its own subtree for as long as it is
//! mounted: pointer-downs anywhere in the document (to dismiss a sticky panel)
//! and window scrolls (to re-check placement). [`InteractionWatchers`] owns
//! both subscriptions; acquiring it subscribes once, dropping or
//! [releasing](InteractionWatchers::release) it unsubscribes once.

use crate::host::{Host, Listener, PointerDownHandler, ScrollHandler, contains};
use crate::types::{Mode, Part};

bitflags::bitflags! {
    /// Global subscriptions currently held.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Watch: u8 {
        /// Document-wide pointer-down, capture phase.
        const POINTER_DOWN = 0b0000_0001;
        /// Window scroll.
        const SCROLL       = 0b0000_0010;
    }
}

/// The pair of global subscriptions of one tooltip.
#[derive(Debug)]
pub struct InteractionWatchers {
    pointer_down: Option<Listener>,
    scroll: Option<Listener>,
}

impl InteractionWatchers {
    /// Subscribe both handlers with `host`.
    pub fn acquire<H: Host>(
        host: &H,
        on_pointer_down: PointerDownHandler<H::Node>,
        on_scroll: ScrollHandler,
    ) -> Self {
        let pointer_down = host.listen_pointer_down(on_pointer_down);
        let scroll = host.listen_scroll(on_scroll);
        tracing::debug!("tooltip watchers acquired");
        Self {
            pointer_down: Some(pointer_down),
            scroll: Some(scroll),
        }
    }

    /// Subscriptions still held.
    pub fn active(&self) -> Watch {
        let mut w = Watch::empty();
        w.set(Watch::POINTER_DOWN, self.pointer_down.is_some());
        w.set(Watch::SCROLL, self.scroll.is_some());
        w
    }

    /// Unsubscribe both handlers. Calling this again does nothing.
    pub fn release(&mut self) {
        if self.active().is_empty() {
            return;
        }
        if let Some(l) = self.pointer_down.take() {
            l.release();
        }
        if let Some(l) = self.scroll.take() {
            l.release();
        }
        tracing::debug!("tooltip watchers released");
    }
}

impl Drop for InteractionWatchers {
    fn drop(&mut self) {
        self.release();
    }
}

/// Whether a pointer-down on `target` dismisses a tooltip with `mode`.
///
/// Only sticky tooltips are dismissed, and only when the target lies outside
/// the panel's subtree. A missing target counts as outside; an unmounted
/// panel cannot be dismissed.
pub fn is_outside_interaction<H: Host>(host: &H, mode: Mode, target: Option<H::Node>) -> bool {
    if !mode.is_sticky() {
        return false;
    }
    let Some(panel) = host.node_of(Part::Panel) else {
        return false;
    };
    match target {
        Some(node) => !contains(panel, node, |n| host.parent_of(n)),
        None => true,
    }
}
