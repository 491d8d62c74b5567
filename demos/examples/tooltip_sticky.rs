// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A sticky tooltip near the top of the page.
//!
//! The panel does not fit above the trigger, so it opens below. It stays open
//! after the pointer leaves and after clicks inside the panel, follows scrolls,
//! and closes on a click elsewhere.
//!
//! Run:
//! - `cargo run -p understory_tooltip_demos --example tooltip_sticky`

use std::time::Duration;

use understory_tooltip::config::TooltipConfig;
use understory_tooltip::tooltip::Tooltip;
use understory_tooltip::types::Placement;
use understory_tooltip_demos::{DemoHost, Node, init_tracing};

fn main() {
    init_tracing();
    // Trigger 150px down the page, scrolled so it sits 50px below the
    // viewport top. An 80px panel is clipped above it.
    let host = DemoHost::new(150.0, 80.0);
    host.scroll_to(100.0);
    let tip = Tooltip::mount(
        TooltipConfig::new("help", "Drag rows to reorder them.")
            .sticky(true)
            .placement(Placement::Top),
        host.clone(),
    );

    tip.focus(host.now());
    host.advance(Duration::from_millis(100));
    tip.layout();
    println!("== Focused ==\n  {:?}", tip.view());
    assert!(tip.view().visible);
    assert_eq!(tip.view().placement, Placement::Bottom);

    tip.blur();
    host.click(Node::PanelText);
    println!("== Blur + click inside ==\n  {:?}", tip.view());
    assert!(tip.view().visible);

    // Scroll up: the trigger is now 120px below the viewport top.
    host.scroll_to(30.0);
    println!("== Scrolled ==\n  {:?}", tip.view());
    assert_eq!(tip.view().placement, Placement::Top);

    host.click(Node::Other);
    println!("== Click outside ==\n  {:?}", tip.view());
    assert!(!tip.view().visible);
    println!("events: {:?}", tip.drain_events());
}
