// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Tooltip: a headless, `no_std` core for hover-triggered tooltips.
//!
//! ## Overview
//!
//! A tooltip is an icon trigger that reveals a content panel once the pointer
//! rests on it. This crate implements the interaction logic only:
//!
//! - Hover intent: a velocity sampler tells a deliberate pause over the
//!   trigger from a pointer passing through ([`intent`]).
//! - Dismissal: transient tooltips close when the pointer leaves; sticky ones
//!   stay open until a pointer-down lands outside the panel ([`visibility`]).
//! - Placement: a panel that would be clipped by the top of the viewport is
//!   moved below its trigger ([`placement`]).
//!
//! It does not load icons, paint, or name styles.
//! A toolkit implements [`Host`](crate::host::Host) to provide timers, global
//! listeners, and measurement, then renders the [`TooltipView`](crate::types::TooltipView)
//! the tooltip exposes.
//!
//! ## Workflow
//!
//! 1) Build a [`TooltipConfig`](crate::config::TooltipConfig) with the icon id,
//!    the panel content, the sticky flag, and the preferred placement.
//! 2) [`Tooltip::mount`](crate::tooltip::Tooltip::mount) it on your host. This
//!    subscribes a document-wide pointer-down listener and a scroll listener,
//!    held by [`InteractionWatchers`](crate::watchers::InteractionWatchers).
//! 3) Forward the trigger's pointer over/move/out and focus/blur events.
//!    Each hover session runs at most one sampler [`Interval`](crate::host::Interval),
//!    cancelled on settle, on hover end, and at unmount.
//! 4) On every render pass call [`Tooltip::layout`](crate::tooltip::Tooltip::layout),
//!    then paint [`Tooltip::view`](crate::tooltip::Tooltip::view).
//! 5) [`Tooltip::unmount`](crate::tooltip::Tooltip::unmount) (or drop) releases everything.
//!
//! ## Components
//!
//! The three state machines are usable on their own and are pure or nearly so:
//!
//! - [`VelocityTracker`](crate::intent::VelocityTracker): `begin` / `record` / `tick` / `end`.
//! - [`Visibility::transition`](crate::visibility::Visibility::transition): `(state, input) → state`.
//! - [`placement::resolve`](crate::placement::resolve): `(preferred, trigger, panel height) → placement`.
//!
//! ```
//! use kurbo::Rect;
//! use understory_tooltip::placement::resolve;
//! use understory_tooltip::types::Placement;
//!
//! // A 24px trigger 50px below the viewport top cannot fit an 80px panel above it.
//! let trigger = Rect::new(100.0, 50.0, 124.0, 74.0);
//! assert_eq!(resolve(Placement::Top, Some(trigger), Some(80.0)), Placement::Bottom);
//! ```
//!
//! ## Policy
//!
//! Sampling cadence (100 ms) and settle threshold (0.1 px/ms) are defaults of
//! [`IntentConfig`](crate::config::IntentConfig), not fixed constants.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod host;
pub mod icon;
pub mod intent;
pub mod placement;
pub mod tooltip;
pub mod types;
pub mod visibility;
pub mod watchers;

#[cfg(test)]
mod testing;
