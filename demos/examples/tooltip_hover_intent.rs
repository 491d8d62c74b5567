// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover intent with a transient tooltip.
//!
//! A pointer sweeps across the trigger without stopping (no tooltip), then
//! comes back and rests on it (tooltip after one quiet sampling period), then
//! leaves (tooltip hidden).
//!
//! Run:
//! - `cargo run -p understory_tooltip_demos --example tooltip_hover_intent`

use std::time::Duration;

use understory_tooltip::config::TooltipConfig;
use understory_tooltip::tooltip::Tooltip;
use understory_tooltip::types::{Placement, TooltipEvent};
use understory_tooltip_demos::{DemoHost, init_tracing};

fn main() {
    init_tracing();
    let host = DemoHost::new(400.0, 60.0);
    let tip = Tooltip::mount(
        TooltipConfig::new("info", "Changes are saved automatically."),
        host.clone(),
    );
    println!("icon: {:?}", tip.icon());

    // Pass through: 5px every 10ms (0.5 px/ms) for 200ms, then leave.
    tip.pointer_over(host.sample(90.0, 410.0));
    for i in 1..=20 {
        host.advance(Duration::from_millis(10));
        tip.pointer_move(host.sample(90.0 + 5.0 * i as f64, 410.0));
    }
    tip.pointer_out();
    host.advance(Duration::from_millis(300));
    println!("== Pass through ==\n  {:?}", tip.drain_events());
    assert!(!tip.view().visible);

    // Come back and rest.
    tip.pointer_over(host.sample(110.0, 410.0));
    host.advance(Duration::from_millis(30));
    tip.pointer_move(host.sample(111.0, 411.0));
    host.advance(Duration::from_millis(100));
    let shown = tip.drain_events();
    println!("== Rest ==\n  {:?}", shown);
    assert_eq!(shown, vec![TooltipEvent::Settled, TooltipEvent::Shown]);
    assert_eq!(tip.view().placement, Placement::Top);

    tip.pointer_out();
    println!("== Leave ==\n  {:?}", tip.drain_events());
    assert!(!tip.view().visible);

    tip.unmount();
    assert_eq!(host.registrations(), (0, 0));
}
