// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory host for unit tests: timers and global events fire only when asked.

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::time::Duration;

use kurbo::Rect;

use crate::host::{Host, Interval, Listener, PointerDownHandler, ScrollHandler, TickHandler};
use crate::icon::IconResolver;
use crate::types::Part;

pub(crate) const TRIGGER: u32 = 10;
pub(crate) const PANEL: u32 = 20;
pub(crate) const PANEL_TEXT: u32 = 21;
pub(crate) const ELSEWHERE: u32 = 99;

type Shared<T> = Rc<RefCell<T>>;

#[derive(Default)]
struct State {
    next_id: u64,
    intervals: Vec<(u64, Duration, Shared<TickHandler>)>,
    pointer_down: Vec<(u64, Shared<PointerDownHandler<u32>>)>,
    scroll: Vec<(u64, Shared<ScrollHandler>)>,
    trigger_rect: Option<Rect>,
    panel_rect: Option<Rect>,
    icon: Option<&'static str>,
    leaky: bool,
}

impl State {
    fn id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Tree: 1 (root) → 10 (trigger), 1 → 20 (panel) → 21 (panel text), 99 detached.
#[derive(Default)]
pub(crate) struct FakeHost {
    state: Shared<State>,
}

impl FakeHost {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Resolve icons synchronously with `icon`.
    pub(crate) fn with_icon(icon: &'static str) -> Rc<Self> {
        let h = Self::default();
        h.state.borrow_mut().icon = Some(icon);
        Rc::new(h)
    }

    /// Ignore every release, like a host that forgets to unsubscribe.
    pub(crate) fn set_leaky(&self, leaky: bool) {
        self.state.borrow_mut().leaky = leaky;
    }

    pub(crate) fn set_trigger_top(&self, top: f64) {
        self.state.borrow_mut().trigger_rect = Some(Rect::new(0.0, top, 24.0, top + 24.0));
    }

    pub(crate) fn set_panel_height(&self, height: f64) {
        self.state.borrow_mut().panel_rect = Some(Rect::new(0.0, 0.0, 120.0, height));
    }

    pub(crate) fn live_intervals(&self) -> usize {
        self.state.borrow().intervals.len()
    }

    pub(crate) fn interval_periods(&self) -> Vec<Duration> {
        self.state.borrow().intervals.iter().map(|(_, p, _)| *p).collect()
    }

    pub(crate) fn live_listeners(&self) -> usize {
        let s = self.state.borrow();
        s.pointer_down.len() + s.scroll.len()
    }

    /// Fire every live interval once.
    pub(crate) fn tick(&self) {
        let handlers: Vec<_> = self
            .state
            .borrow()
            .intervals
            .iter()
            .map(|(_, _, h)| h.clone())
            .collect();
        for h in handlers {
            let mut f = h.borrow_mut();
            (*f)();
        }
    }

    pub(crate) fn pointer_down(&self, target: Option<u32>) {
        let handlers: Vec<_> = self
            .state
            .borrow()
            .pointer_down
            .iter()
            .map(|(_, h)| h.clone())
            .collect();
        for h in handlers {
            let mut f = h.borrow_mut();
            (*f)(target);
        }
    }

    pub(crate) fn scroll(&self) {
        let handlers: Vec<_> = self
            .state
            .borrow()
            .scroll
            .iter()
            .map(|(_, h)| h.clone())
            .collect();
        for h in handlers {
            let mut f = h.borrow_mut();
            (*f)();
        }
    }

    fn remover(&self, id: u64) -> impl FnOnce() + 'static {
        let state: Weak<RefCell<State>> = Rc::downgrade(&self.state);
        move || {
            let Some(state) = state.upgrade() else {
                return;
            };
            let mut s = state.borrow_mut();
            if s.leaky {
                return;
            }
            s.intervals.retain(|(i, _, _)| *i != id);
            s.pointer_down.retain(|(i, _)| *i != id);
            s.scroll.retain(|(i, _)| *i != id);
        }
    }
}

impl Host for FakeHost {
    type Node = u32;
    type Icon = &'static str;

    fn set_interval(&self, period: Duration, tick: TickHandler) -> Interval {
        let id = {
            let mut s = self.state.borrow_mut();
            let id = s.id();
            s.intervals.push((id, period, Rc::new(RefCell::new(tick))));
            id
        };
        Interval::new(self.remover(id))
    }

    fn listen_pointer_down(&self, handler: PointerDownHandler<u32>) -> Listener {
        let id = {
            let mut s = self.state.borrow_mut();
            let id = s.id();
            s.pointer_down.push((id, Rc::new(RefCell::new(handler))));
            id
        };
        Listener::new(self.remover(id))
    }

    fn listen_scroll(&self, handler: ScrollHandler) -> Listener {
        let id = {
            let mut s = self.state.borrow_mut();
            let id = s.id();
            s.scroll.push((id, Rc::new(RefCell::new(handler))));
            id
        };
        Listener::new(self.remover(id))
    }

    fn bounding_rect(&self, part: Part) -> Option<Rect> {
        let s = self.state.borrow();
        match part {
            Part::Trigger => s.trigger_rect,
            Part::Panel => s.panel_rect,
        }
    }

    fn node_of(&self, part: Part) -> Option<u32> {
        Some(match part {
            Part::Trigger => TRIGGER,
            Part::Panel => PANEL,
        })
    }

    fn parent_of(&self, node: &u32) -> Option<u32> {
        match *node {
            TRIGGER | PANEL => Some(1),
            PANEL_TEXT => Some(PANEL),
            _ => None,
        }
    }

    fn resolve_icon(&self, _icon_id: &str, resolver: IconResolver<&'static str>) {
        let icon = self.state.borrow().icon;
        if let Some(icon) = icon {
            resolver.resolve(icon);
        }
    }
}
