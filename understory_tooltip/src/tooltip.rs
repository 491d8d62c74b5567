// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A mounted tooltip: hover intent, visibility, and placement wired to a [`Host`].
//!
//! ## Lifecycle
//!
//! - [`Tooltip::mount`] subscribes the global pointer-down and scroll
//!   listeners and asks the host to resolve the icon.
//! - Trigger events ([`pointer_over`](Tooltip::pointer_over),
//!   [`pointer_move`](Tooltip::pointer_move), [`pointer_out`](Tooltip::pointer_out),
//!   [`focus`](Tooltip::focus), [`blur`](Tooltip::blur)) drive the sampler.
//!   A hover session owns at most one [`Interval`]; it is cancelled on settle,
//!   on hover end, and at unmount.
//! - [`Tooltip::layout`] is the render/measurement pass.
//! - [`Tooltip::unmount`] (or dropping the tooltip) releases every
//!   subscription. Host callbacks only hold a weak reference, so anything a
//!   host fires afterwards is ignored.
//!
//! ## Output
//!
//! [`Tooltip::view`] is the state a rendering layer paints;
//! [`Tooltip::drain_events`] reports what happened since the last drain.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;
use core::time::Duration;

use kurbo::Point;

use crate::config::TooltipConfig;
use crate::host::{Host, Interval};
use crate::icon::IconSlot;
use crate::intent::{Tick, VelocityTracker};
use crate::placement::PlacementResolver;
use crate::types::{Mode, Part, PointerSample, TooltipEvent, TooltipView};
use crate::visibility::{Visibility, VisibilityController};
use crate::watchers::{InteractionWatchers, Watch, is_outside_interaction};

struct Runtime<H: Host> {
    host: Rc<H>,
    this: Weak<RefCell<Self>>,
    period: Duration,
    tracker: VelocityTracker,
    visibility: VisibilityController,
    placement: PlacementResolver,
    sampler: Option<Interval>,
    watchers: Option<InteractionWatchers>,
    events: Vec<TooltipEvent>,
}

impl<H: Host> Runtime<H> {
    fn begin_hover(&mut self, sample: PointerSample) {
        if !self.visibility.begin_hover() {
            tracing::trace!("hover already in progress; sampler not restarted");
            return;
        }
        self.tracker.begin(sample);
        self.start_sampler();
    }

    fn start_sampler(&mut self) {
        // Dropping a previous interval (there should be none) cancels it first.
        self.sampler = None;
        let this = self.this.clone();
        let tick = Box::new(move || {
            if let Some(rt) = this.upgrade() {
                rt.borrow_mut().tick();
            }
        });
        self.sampler = Some(self.host.set_interval(self.period, tick));
    }

    fn stop_sampler(&mut self) {
        if let Some(iv) = self.sampler.take() {
            iv.cancel();
        }
    }

    fn tick(&mut self) {
        match self.tracker.tick() {
            Tick::Moving { .. } => {}
            Tick::Idle => self.stop_sampler(),
            Tick::Settled => {
                self.stop_sampler();
                tracing::debug!("hover intent settled");
                self.events.push(TooltipEvent::Settled);
                if self.visibility.settle().is_some() {
                    self.events.push(TooltipEvent::Shown);
                    self.relayout();
                }
            }
        }
    }

    fn end_hover(&mut self) {
        self.stop_sampler();
        self.tracker.end();
        if let Some(Visibility::Hidden) = self.visibility.end_hover() {
            self.events.push(TooltipEvent::Hidden);
        }
    }

    fn pointer_down(&mut self, target: Option<H::Node>) {
        if !is_outside_interaction(&*self.host, self.visibility.mode(), target) {
            return;
        }
        if let Some(Visibility::Hidden) = self.visibility.outside_interaction() {
            self.events.push(TooltipEvent::Hidden);
        }
    }

    fn relayout(&mut self) {
        let trigger = self.host.bounding_rect(Part::Trigger);
        let panel_height = self.host.bounding_rect(Part::Panel).map(|r| r.height());
        if let Some(from) = self.placement.update(trigger, panel_height) {
            self.events.push(TooltipEvent::PlacementChanged {
                from,
                to: self.placement.effective(),
            });
        }
    }

    fn teardown(&mut self) {
        self.stop_sampler();
        self.tracker.end();
        if let Some(mut w) = self.watchers.take() {
            w.release();
        }
    }
}

/// A tooltip instance mounted on a [`Host`].
///
/// `C` is the opaque panel content from the [`TooltipConfig`].
///
/// ```
/// # use std::rc::Rc;
/// # use core::time::Duration;
/// # use kurbo::Rect;
/// # use understory_tooltip::host::{Host, Interval, Listener, PointerDownHandler, ScrollHandler, TickHandler};
/// # use understory_tooltip::types::Part;
/// # struct Inert;
/// # impl Host for Inert {
/// #     type Node = u32;
/// #     type Icon = ();
/// #     fn set_interval(&self, _: Duration, _: TickHandler) -> Interval { Interval::new(|| {}) }
/// #     fn listen_pointer_down(&self, _: PointerDownHandler<u32>) -> Listener { Listener::new(|| {}) }
/// #     fn listen_scroll(&self, _: ScrollHandler) -> Listener { Listener::new(|| {}) }
/// #     fn bounding_rect(&self, _: Part) -> Option<Rect> { None }
/// #     fn node_of(&self, _: Part) -> Option<u32> { None }
/// #     fn parent_of(&self, _: &u32) -> Option<u32> { None }
/// # }
/// use understory_tooltip::config::TooltipConfig;
/// use understory_tooltip::tooltip::Tooltip;
/// use understory_tooltip::types::{Placement, PointerSample};
///
/// let tip = Tooltip::mount(TooltipConfig::new("info", "Hello"), Rc::new(Inert));
/// tip.pointer_over(PointerSample::at(5.0, 5.0, 0));
/// assert!(tip.is_sampling());
/// assert!(!tip.view().visible);
/// assert_eq!(tip.view().placement, Placement::Top);
/// tip.unmount();
/// ```
pub struct Tooltip<H: Host, C> {
    config: TooltipConfig<C>,
    icon: IconSlot<H::Icon>,
    runtime: Rc<RefCell<Runtime<H>>>,
}

impl<H: Host, C> Tooltip<H, C> {
    /// Mount a tooltip: subscribe global listeners and request the icon.
    pub fn mount(config: TooltipConfig<C>, host: Rc<H>) -> Self {
        let intent = config.intent_config();
        let mode = config.mode();
        let runtime = Rc::new_cyclic(|this| {
            RefCell::new(Runtime {
                host: host.clone(),
                this: this.clone(),
                period: intent.interval(),
                tracker: VelocityTracker::new(intent.sensitivity()),
                visibility: VisibilityController::new(mode),
                placement: PlacementResolver::new(config.preferred_placement()),
                sampler: None,
                watchers: None,
                events: Vec::new(),
            })
        });

        let (icon, resolver) = IconSlot::pending();
        host.resolve_icon(config.icon_id(), resolver);

        let on_down = Rc::downgrade(&runtime);
        let on_scroll = Rc::downgrade(&runtime);
        let watchers = InteractionWatchers::acquire(
            &*host,
            Box::new(move |target| {
                if let Some(rt) = on_down.upgrade() {
                    rt.borrow_mut().pointer_down(target);
                }
            }),
            Box::new(move || {
                if let Some(rt) = on_scroll.upgrade() {
                    rt.borrow_mut().relayout();
                }
            }),
        );
        runtime.borrow_mut().watchers = Some(watchers);

        tracing::debug!(icon = config.icon_id(), ?mode, "tooltip mounted");
        Self {
            config,
            icon,
            runtime,
        }
    }

    /// Pointer entered the trigger: start a hover session unless one is in progress.
    pub fn pointer_over(&self, sample: PointerSample) {
        self.runtime.borrow_mut().begin_hover(sample);
    }

    /// Pointer moved over the trigger.
    pub fn pointer_move(&self, sample: PointerSample) {
        self.runtime.borrow_mut().tracker.record(sample);
    }

    /// Pointer left the trigger: end the hover session.
    pub fn pointer_out(&self) {
        self.runtime.borrow_mut().end_hover();
    }

    /// Trigger gained keyboard focus; behaves like the pointer entering it.
    ///
    /// Focus carries no pointer position, so the session starts at the origin
    /// and settles on the first tick unless pointer moves arrive.
    pub fn focus(&self, timestamp: Duration) {
        self.pointer_over(PointerSample::new(Point::ORIGIN, timestamp));
    }

    /// Trigger lost keyboard focus; behaves like the pointer leaving it.
    pub fn blur(&self) {
        self.pointer_out();
    }

    /// Render/measurement pass: re-check placement while the panel is shown.
    pub fn layout(&self) {
        let mut rt = self.runtime.borrow_mut();
        if rt.visibility.state().is_visible() {
            rt.relayout();
        }
    }

    /// State for the rendering layer.
    pub fn view(&self) -> TooltipView {
        let rt = self.runtime.borrow();
        TooltipView {
            visible: rt.visibility.state().is_visible(),
            placement: rt.placement.effective(),
            mode: rt.visibility.mode(),
        }
    }

    /// Events since the last call, oldest first.
    pub fn drain_events(&self) -> Vec<TooltipEvent> {
        core::mem::take(&mut self.runtime.borrow_mut().events)
    }

    /// Construction-time configuration.
    pub fn config(&self) -> &TooltipConfig<C> {
        &self.config
    }

    /// Panel content.
    pub fn content(&self) -> &C {
        self.config.content()
    }

    /// Dismissal policy.
    pub fn mode(&self) -> Mode {
        self.config.mode()
    }

    /// The resolved trigger icon, once the host has provided it.
    pub fn icon(&self) -> Option<H::Icon> {
        self.icon.get()
    }

    /// Whether a hover session is in progress.
    pub fn is_hovering(&self) -> bool {
        self.runtime.borrow().visibility.is_hovering()
    }

    /// Whether the hover-intent sampler is running.
    pub fn is_sampling(&self) -> bool {
        self.runtime.borrow().sampler.is_some()
    }

    /// Global subscriptions currently held.
    pub fn watching(&self) -> Watch {
        self.runtime
            .borrow()
            .watchers
            .as_ref()
            .map_or(Watch::empty(), InteractionWatchers::active)
    }

    /// Release every subscription and cancel pending sampling.
    pub fn unmount(self) {
        self.runtime.borrow_mut().teardown();
        tracing::debug!(icon = self.config.icon_id(), "tooltip unmounted");
    }
}

impl<H: Host, C> Drop for Tooltip<H, C> {
    fn drop(&mut self) {
        if let Ok(mut rt) = self.runtime.try_borrow_mut() {
            rt.teardown();
        }
    }
}

impl<H: Host, C: fmt::Debug> fmt::Debug for Tooltip<H, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tooltip")
            .field("config", &self.config)
            .field("view", &self.view())
            .field("icon", &self.icon)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IntentConfig;
    use crate::testing::{ELSEWHERE, FakeHost, PANEL, PANEL_TEXT, TRIGGER};
    use crate::types::Placement;
    use alloc::vec;

    fn mount(sticky: bool) -> (Rc<FakeHost>, Tooltip<FakeHost, &'static str>) {
        let host = FakeHost::new();
        let tip = Tooltip::mount(TooltipConfig::new("info", "Hi").sticky(sticky), host.clone());
        (host, tip)
    }

    fn settle(host: &FakeHost, tip: &Tooltip<FakeHost, &'static str>) {
        tip.pointer_over(PointerSample::at(0.0, 0.0, 0));
        host.tick();
        assert!(tip.view().visible);
        let _ = tip.drain_events();
    }

    #[test]
    fn mount_subscribes_once() {
        let (host, tip) = mount(false);
        assert_eq!(host.live_listeners(), 2);
        assert_eq!(tip.watching(), Watch::POINTER_DOWN | Watch::SCROLL);
        assert_eq!(host.live_intervals(), 0);
        assert!(!tip.view().visible);
    }

    #[test]
    fn zero_motion_shows_on_first_tick() {
        let (host, tip) = mount(false);
        tip.pointer_over(PointerSample::at(3.0, 4.0, 0));
        assert_eq!(host.interval_periods(), vec![Duration::from_millis(100)]);
        host.tick();
        assert_eq!(
            tip.drain_events(),
            vec![TooltipEvent::Settled, TooltipEvent::Shown]
        );
        assert!(tip.view().visible);
        assert!(!tip.is_sampling());
        assert_eq!(host.live_intervals(), 0);
    }

    // Moving fast keeps the sampler running; the tick evaluating the first
    // slow sample settles, and later ticks see no live interval.
    #[test]
    fn settles_once_after_motion_slows() {
        let (host, tip) = mount(false);
        tip.pointer_over(PointerSample::at(0.0, 0.0, 0));
        tip.pointer_move(PointerSample::at(60.0, 0.0, 100));
        host.tick();
        assert!(tip.is_sampling());
        assert!(!tip.view().visible);
        tip.pointer_move(PointerSample::at(120.0, 0.0, 200));
        host.tick();
        assert!(tip.is_sampling());
        tip.pointer_move(PointerSample::at(121.0, 0.0, 300));
        host.tick();
        assert!(tip.view().visible);
        host.tick();
        host.tick();
        let settled = tip
            .drain_events()
            .into_iter()
            .filter(|e| *e == TooltipEvent::Settled)
            .count();
        assert_eq!(settled, 1);
    }

    #[test]
    fn repeated_hover_begin_keeps_one_sampler() {
        let (host, tip) = mount(false);
        tip.pointer_over(PointerSample::at(0.0, 0.0, 0));
        tip.pointer_over(PointerSample::at(1.0, 1.0, 10));
        tip.focus(Duration::from_millis(20));
        assert_eq!(host.live_intervals(), 1);
        host.tick();
        host.tick();
        assert_eq!(
            tip.drain_events(),
            vec![TooltipEvent::Settled, TooltipEvent::Shown]
        );
    }

    #[test]
    fn transient_hides_on_hover_end_and_ignores_outside() {
        let (host, tip) = mount(false);
        settle(&host, &tip);
        host.pointer_down(Some(ELSEWHERE));
        assert!(tip.view().visible);
        tip.pointer_out();
        assert!(!tip.view().visible);
        assert_eq!(tip.drain_events(), vec![TooltipEvent::Hidden]);
    }

    #[test]
    fn sticky_survives_hover_end_until_outside_press() {
        let (host, tip) = mount(true);
        settle(&host, &tip);
        tip.pointer_out();
        assert!(tip.view().visible);
        assert!(!tip.is_hovering());
        // Presses inside the panel subtree keep it open.
        host.pointer_down(Some(PANEL));
        host.pointer_down(Some(PANEL_TEXT));
        assert!(tip.view().visible);
        host.pointer_down(Some(TRIGGER));
        assert!(!tip.view().visible);
        assert_eq!(tip.drain_events(), vec![TooltipEvent::Hidden]);
    }

    #[test]
    fn sticky_press_without_target_counts_as_outside() {
        let (host, tip) = mount(true);
        settle(&host, &tip);
        host.pointer_down(None);
        assert!(!tip.view().visible);
    }

    #[test]
    fn hover_end_before_settle_cancels_sampler() {
        let (host, tip) = mount(false);
        tip.pointer_over(PointerSample::at(0.0, 0.0, 0));
        tip.pointer_out();
        assert_eq!(host.live_intervals(), 0);
        host.tick();
        assert!(!tip.view().visible);
        assert!(tip.drain_events().is_empty());
    }

    #[test]
    fn blur_ends_focus_session() {
        let (host, tip) = mount(false);
        tip.focus(Duration::from_millis(5));
        host.tick();
        assert!(tip.view().visible);
        tip.blur();
        assert!(!tip.view().visible);
    }

    #[test]
    fn scroll_flips_placement_both_ways() {
        let (host, tip) = mount(false);
        host.set_panel_height(80.0);
        host.set_trigger_top(50.0);
        host.scroll();
        assert_eq!(tip.view().placement, Placement::Bottom);
        host.set_trigger_top(120.0);
        host.scroll();
        assert_eq!(tip.view().placement, Placement::Top);
        assert_eq!(
            tip.drain_events(),
            vec![
                TooltipEvent::PlacementChanged {
                    from: Placement::Top,
                    to: Placement::Bottom
                },
                TooltipEvent::PlacementChanged {
                    from: Placement::Bottom,
                    to: Placement::Top
                },
            ]
        );
        // Scrolling never changes visibility.
        assert!(!tip.view().visible);
    }

    #[test]
    fn layout_only_corrects_while_shown() {
        let (host, tip) = mount(false);
        host.set_panel_height(80.0);
        host.set_trigger_top(10.0);
        tip.layout();
        assert_eq!(tip.view().placement, Placement::Top);
        // Becoming visible measures immediately.
        settle(&host, &tip);
        assert_eq!(tip.view().placement, Placement::Bottom);
        host.set_trigger_top(300.0);
        tip.layout();
        assert_eq!(tip.view().placement, Placement::Top);
    }

    #[test]
    fn unmeasured_trigger_keeps_preferred() {
        let host = FakeHost::new();
        let tip = Tooltip::mount(
            TooltipConfig::new("info", ()).placement(Placement::Left),
            host.clone(),
        );
        host.scroll();
        tip.focus(Duration::ZERO);
        host.tick();
        assert_eq!(tip.view().placement, Placement::Left);
    }

    #[test]
    fn custom_interval_is_used() {
        let host = FakeHost::new();
        let intent = IntentConfig::new(Duration::from_millis(40), 0.2).unwrap();
        let tip = Tooltip::mount(TooltipConfig::new("info", ()).intent(intent), host.clone());
        tip.pointer_over(PointerSample::at(0.0, 0.0, 0));
        assert_eq!(host.interval_periods(), vec![Duration::from_millis(40)]);
    }

    #[test]
    fn icon_slot_fills_from_host() {
        let host = FakeHost::with_icon("info.svg");
        let tip = Tooltip::mount(TooltipConfig::new("info", ()), host);
        assert_eq!(tip.icon(), Some("info.svg"));

        let (_host, pending) = mount(false);
        assert_eq!(pending.icon(), None);
    }

    #[test]
    fn unmount_releases_everything() {
        let (host, tip) = mount(true);
        tip.pointer_over(PointerSample::at(0.0, 0.0, 0));
        assert_eq!(host.live_intervals(), 1);
        tip.unmount();
        assert_eq!(host.live_intervals(), 0);
        assert_eq!(host.live_listeners(), 0);
        // Nothing left to fire.
        host.pointer_down(Some(ELSEWHERE));
        host.scroll();
        host.tick();
    }

    // A host that never removes handlers still cannot reach a dropped tooltip.
    #[test]
    fn leaked_handlers_are_inert_after_unmount() {
        let (host, tip) = mount(true);
        host.set_leaky(true);
        tip.pointer_over(PointerSample::at(0.0, 0.0, 0));
        tip.unmount();
        assert_eq!(host.live_listeners(), 2);
        host.pointer_down(Some(ELSEWHERE));
        host.set_trigger_top(-5.0);
        host.scroll();
        host.tick();
    }

    #[test]
    fn drop_is_unmount() {
        let (host, tip) = mount(false);
        tip.pointer_over(PointerSample::at(0.0, 0.0, 0));
        drop(tip);
        assert_eq!(host.live_intervals(), 0);
        assert_eq!(host.live_listeners(), 0);
    }

    #[test]
    fn view_reports_mode_and_content() {
        let (_host, tip) = mount(true);
        assert_eq!(tip.view().mode, Mode::Sticky);
        assert_eq!(tip.mode(), Mode::Sticky);
        assert_eq!(*tip.content(), "Hi");
        assert_eq!(tip.config().icon_id(), "info");
    }
}
