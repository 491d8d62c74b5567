// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A tiny simulated page used by the tooltip demos.
//!
//! The page has a virtual clock, a scroll offset, a trigger button and a
//! panel. Timers only fire when the clock is advanced, so the demos are
//! deterministic.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use kurbo::{Point, Rect, Size};
use understory_tooltip::host::{
    Host, Interval, Listener, PointerDownHandler, ScrollHandler, TickHandler,
};
use understory_tooltip::icon::IconResolver;
use understory_tooltip::types::{Part, PointerSample};

/// Elements of the simulated page.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Node {
    /// Document body; parent of everything else.
    Body,
    /// Tooltip trigger button.
    Trigger,
    /// Tooltip panel.
    Panel,
    /// Text inside the panel.
    PanelText,
    /// Some unrelated element.
    Other,
}

struct Timer {
    id: u64,
    period: Duration,
    due: Duration,
    tick: Rc<RefCell<TickHandler>>,
}

struct Page {
    now: Duration,
    next_id: u64,
    timers: Vec<Timer>,
    pointer_down: Vec<(u64, Rc<RefCell<PointerDownHandler<Node>>>)>,
    scroll: Vec<(u64, Rc<RefCell<ScrollHandler>>)>,
    scroll_y: f64,
    trigger_top: f64,
    panel_height: f64,
}

/// In-memory [`Host`] with a virtual clock.
pub struct DemoHost {
    page: Rc<RefCell<Page>>,
}

impl DemoHost {
    /// A page whose trigger sits `trigger_top` px below the document top,
    /// with a panel `panel_height` px tall.
    pub fn new(trigger_top: f64, panel_height: f64) -> Rc<Self> {
        Rc::new(Self {
            page: Rc::new(RefCell::new(Page {
                now: Duration::ZERO,
                next_id: 0,
                timers: Vec::new(),
                pointer_down: Vec::new(),
                scroll: Vec::new(),
                scroll_y: 0.0,
                trigger_top,
                panel_height,
            })),
        })
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.page.borrow().now
    }

    /// A pointer sample at `(x, y)` taken now.
    pub fn sample(&self, x: f64, y: f64) -> PointerSample {
        PointerSample::new(Point::new(x, y), self.now())
    }

    /// Number of live timers and listeners.
    pub fn registrations(&self) -> (usize, usize) {
        let p = self.page.borrow();
        (p.timers.len(), p.pointer_down.len() + p.scroll.len())
    }

    /// Advance the clock by `by`, firing due timers in deadline order.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        loop {
            let next = {
                let mut p = self.page.borrow_mut();
                let Some(t) = p
                    .timers
                    .iter_mut()
                    .filter(|t| t.due <= target)
                    .min_by_key(|t| t.due)
                else {
                    break;
                };
                let due = t.due;
                t.due += t.period;
                let tick = t.tick.clone();
                p.now = due;
                tick
            };
            let mut f = next.borrow_mut();
            (*f)();
        }
        self.page.borrow_mut().now = target;
    }

    /// Press the pointer on `target`.
    pub fn click(&self, target: Node) {
        let handlers: Vec<_> = self
            .page
            .borrow()
            .pointer_down
            .iter()
            .map(|(_, h)| h.clone())
            .collect();
        for h in handlers {
            let mut f = h.borrow_mut();
            (*f)(Some(target));
        }
    }

    /// Scroll the window so that document offset `y` is at the viewport top.
    pub fn scroll_to(&self, y: f64) {
        self.page.borrow_mut().scroll_y = y;
        let handlers: Vec<_> = self
            .page
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

    fn register(&self) -> u64 {
        let mut p = self.page.borrow_mut();
        p.next_id += 1;
        p.next_id
    }

    fn remover(&self, id: u64) -> impl FnOnce() + 'static {
        let page: Weak<RefCell<Page>> = Rc::downgrade(&self.page);
        move || {
            if let Some(page) = page.upgrade() {
                let mut p = page.borrow_mut();
                p.timers.retain(|t| t.id != id);
                p.pointer_down.retain(|(i, _)| *i != id);
                p.scroll.retain(|(i, _)| *i != id);
            }
        }
    }
}

impl std::fmt::Debug for DemoHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let p = self.page.borrow();
        f.debug_struct("DemoHost")
            .field("now", &p.now)
            .field("scroll_y", &p.scroll_y)
            .field("timers", &p.timers.len())
            .finish_non_exhaustive()
    }
}

impl Host for DemoHost {
    type Node = Node;
    type Icon = String;

    fn set_interval(&self, period: Duration, tick: TickHandler) -> Interval {
        let id = self.register();
        let mut p = self.page.borrow_mut();
        let due = p.now + period;
        p.timers.push(Timer {
            id,
            period,
            due,
            tick: Rc::new(RefCell::new(tick)),
        });
        drop(p);
        Interval::new(self.remover(id))
    }

    fn listen_pointer_down(&self, handler: PointerDownHandler<Node>) -> Listener {
        let id = self.register();
        self.page
            .borrow_mut()
            .pointer_down
            .push((id, Rc::new(RefCell::new(handler))));
        Listener::new(self.remover(id))
    }

    fn listen_scroll(&self, handler: ScrollHandler) -> Listener {
        let id = self.register();
        self.page
            .borrow_mut()
            .scroll
            .push((id, Rc::new(RefCell::new(handler))));
        Listener::new(self.remover(id))
    }

    fn bounding_rect(&self, part: Part) -> Option<Rect> {
        let p = self.page.borrow();
        Some(match part {
            Part::Trigger => {
                let top = p.trigger_top - p.scroll_y;
                Rect::new(100.0, top, 124.0, top + 24.0)
            }
            Part::Panel => Rect::from_origin_size(Point::ORIGIN, Size::new(200.0, p.panel_height)),
        })
    }

    fn node_of(&self, part: Part) -> Option<Node> {
        Some(match part {
            Part::Trigger => Node::Trigger,
            Part::Panel => Node::Panel,
        })
    }

    fn parent_of(&self, node: &Node) -> Option<Node> {
        match node {
            Node::Body => None,
            Node::PanelText => Some(Node::Panel),
            Node::Trigger | Node::Panel | Node::Other => Some(Node::Body),
        }
    }

    fn resolve_icon(&self, icon_id: &str, resolver: IconResolver<String>) {
        resolver.resolve(format!("icons/{icon_id}.svg"));
    }
}

/// Install a `fmt` subscriber honoring `RUST_LOG`, defaulting to `debug`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::DEBUG.into()),
        )
        .init();
}
