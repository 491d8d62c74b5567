// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The environment a tooltip runs in.
//!
//! ## Overview
//!
//! A [`Host`] is implemented once per toolkit (a DOM binding, a retained
//! widget tree, a test fixture). It provides:
//!
//! - a repeating timer ([`Host::set_interval`]) returning an [`Interval`] guard,
//! - global pointer-down and scroll subscriptions returning [`Listener`] guards,
//! - viewport-relative measurement of the trigger and panel,
//! - node ancestry, used to decide whether a pointer-down hit the panel,
//! - icon resolution into an [`IconResolver`].
//!
//! ## Guards
//!
//! Dropping a guard releases what it stands for: an [`Interval`] stops
//! ticking and a [`Listener`] is unsubscribed. Hosts build guards from a
//! release closure:
//!
//! ```
//! use core::cell::Cell;
//! use std::rc::Rc;
//! use understory_tooltip::host::Listener;
//!
//! let live = Rc::new(Cell::new(true));
//! let flag = live.clone();
//! let guard = Listener::new(move || flag.set(false));
//! assert!(live.get());
//! drop(guard);
//! assert!(!live.get());
//! ```
//!
//! ## Reentrancy
//!
//! Handlers may drop their own guard (a tick that detects hover intent
//! cancels its interval). Hosts must therefore not hold internal borrows
//! while invoking a handler.

use alloc::boxed::Box;
use core::fmt;
use core::time::Duration;

use kurbo::Rect;

use crate::icon::IconResolver;
use crate::types::Part;

/// Callback invoked on every timer period.
pub type TickHandler = Box<dyn FnMut()>;

/// Callback invoked on every document-wide pointer-down with the target node, if any.
pub type PointerDownHandler<N> = Box<dyn FnMut(Option<N>)>;

/// Callback invoked on every window scroll.
pub type ScrollHandler = Box<dyn FnMut()>;

/// Services a tooltip needs from its toolkit.
///
/// Handlers registered through a host capture only weak references to their
/// tooltip, so a host may outlive the tooltips mounted on it.
pub trait Host: 'static {
    /// Toolkit node identifier (element handle, widget id, ...).
    type Node: Copy + Eq + fmt::Debug + 'static;
    /// Resolved icon resource.
    type Icon: Clone + 'static;

    /// Call `tick` every `period` until the returned guard is dropped.
    fn set_interval(&self, period: Duration, tick: TickHandler) -> Interval;

    /// Subscribe to pointer-down events anywhere in the document, in the capture phase.
    fn listen_pointer_down(&self, handler: PointerDownHandler<Self::Node>) -> Listener;

    /// Subscribe to scroll events of the window.
    fn listen_scroll(&self, handler: ScrollHandler) -> Listener;

    /// Bounding rectangle of a part relative to the viewport, if it is laid out.
    fn bounding_rect(&self, part: Part) -> Option<Rect>;

    /// Node of a part, if it is mounted.
    fn node_of(&self, part: Part) -> Option<Self::Node>;

    /// Parent of `node`, or `None` if `node` is a root.
    fn parent_of(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Start resolving the icon named `icon_id`.
    ///
    /// Fulfil `resolver` now or later. Dropping it leaves the icon unresolved,
    /// which is how failures are reported. The default never resolves.
    fn resolve_icon(&self, icon_id: &str, resolver: IconResolver<Self::Icon>) {
        let _ = (icon_id, resolver);
    }
}

/// Whether `node` is `ancestor` or one of its descendants.
///
/// Walks up from `node` with `parent_of`; the caller ensures acyclic ancestry.
///
/// ```
/// use understory_tooltip::host::contains;
/// let parent_of = |n: &u32| match *n { 3 => Some(2), 2 => Some(1), _ => None };
/// assert!(contains(2, 3, parent_of));
/// assert!(!contains(3, 2, parent_of));
/// ```
pub fn contains<K: Copy + Eq>(ancestor: K, node: K, parent_of: impl Fn(&K) -> Option<K>) -> bool {
    let mut cur = node;
    loop {
        if cur == ancestor {
            return true;
        }
        match parent_of(&cur) {
            Some(p) => cur = p,
            None => return false,
        }
    }
}

struct Release(Option<Box<dyn FnOnce()>>);

impl Release {
    fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Some(Box::new(f)))
    }

    fn run(&mut self) {
        if let Some(f) = self.0.take() {
            f();
        }
    }

    fn is_live(&self) -> bool {
        self.0.is_some()
    }
}

/// A running repeating timer. Dropping it cancels the timer.
#[must_use = "dropping an `Interval` cancels it immediately"]
pub struct Interval {
    release: Release,
}

impl Interval {
    /// Wrap the host's cancellation for a timer.
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            release: Release::new(cancel),
        }
    }

    /// Cancel the timer now.
    pub fn cancel(mut self) {
        self.release.run();
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.release.run();
    }
}

impl fmt::Debug for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interval")
            .field("live", &self.release.is_live())
            .finish()
    }
}

/// A global event subscription. Dropping it unsubscribes.
#[must_use = "dropping a `Listener` unsubscribes it immediately"]
pub struct Listener {
    release: Release,
}

impl Listener {
    /// Wrap the host's unsubscription for a handler.
    pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            release: Release::new(unsubscribe),
        }
    }

    /// Unsubscribe now.
    pub fn release(mut self) {
        self.release.run();
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.release.run();
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("live", &self.release.is_live())
            .finish()
    }
}
