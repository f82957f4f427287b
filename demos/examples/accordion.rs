// Copyright 2025 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Accordion group driven by the tap/click activation engine.
//!
//! This example shows how to combine:
//! - `tactile_tree` for the element hierarchy, markers, and ripple slots,
//! - `tactile_activation` for capture-phase routing and activated states,
//! - `tactile_accordion` for group-owned expansion.
//!
//! Run:
//! - `cargo run -p tactile_demos --example accordion`

use kurbo::Point;
use tactile_activation::engine::{ADD_ACTIVATED_DEFERS, CLEAR_STATE_DEFERS};
use tactile_activation::event::{Event, EventKind};
use tactile_activation::router::Router;
use tactile_accordion::{Accordion, AccordionGroup};
use tactile_tree::{ElementId, ElementTree, Markers, RippleEffect, RippleToken};

/// Ripple host that just logs invocations.
struct PrintRipple {
    label: &'static str,
    next: u64,
}

impl RippleEffect for PrintRipple {
    fn add_ripple(&mut self, at: Point) -> RippleToken {
        self.next += 1;
        println!("  ripple[{}]: start at ({}, {})", self.label, at.x, at.y);
        RippleToken(self.next)
    }

    fn dismiss(&mut self, token: RippleToken) {
        println!("  ripple[{}]: dismiss {token:?}", self.label);
    }
}

fn header(tree: &mut ElementTree, group_el: ElementId, label: &'static str) -> ElementId {
    let accordion_el = tree.insert(Some(group_el));
    let header = tree.insert(Some(accordion_el));
    tree.insert_markers(header, Markers::ACTIVATABLE);
    let ripple_host = tree.insert_shadow(header);
    tree.set_ripple(ripple_host, Box::new(PrintRipple { label, next: 0 }));
    header
}

fn tap(router: &mut Router, tree: &mut ElementTree, target: ElementId, t: u64) -> u64 {
    let at = Point::new(12.0, 30.0);
    let mut down =
        Event::pointer(EventKind::TouchStart, target, at, t).with_path(tree.composed_path(target));
    router.handle(tree, &mut down);
    router.tick(tree, t + ADD_ACTIVATED_DEFERS);
    println!(
        "  t={}: activated={}",
        t + ADD_ACTIVATED_DEFERS,
        tree.has_marker(target, Markers::ACTIVATED)
    );

    let t_up = t + ADD_ACTIVATED_DEFERS + 40;
    let mut up =
        Event::pointer(EventKind::TouchEnd, target, at, t_up).with_path(tree.composed_path(target));
    router.handle(tree, &mut up);
    let t_done = t_up + CLEAR_STATE_DEFERS;
    router.tick(tree, t_done);
    println!(
        "  t={}: activated={}",
        t_done,
        tree.has_marker(target, Markers::ACTIVATED)
    );
    t_done
}

fn main() {
    let mut tree = ElementTree::new();
    let root = tree.insert(None);
    let group_el = tree.insert(Some(root));
    let first_header = header(&mut tree, group_el, "first");
    let second_header = header(&mut tree, group_el, "second");

    let mut group: AccordionGroup<&str> = AccordionGroup::new(false);
    let mut first = Accordion::new("first");
    let mut second = Accordion::new("second");

    let mut router = Router::default();

    println!("tap first header:");
    let t = tap(&mut router, &mut tree, first_header, 0);
    first.request_toggle(&mut group);
    second.on_group_change(group.value());
    println!("  expanded: first={} second={}", first.is_expanded(), second.is_expanded());

    // A synthetic mouse pair follows the touch on touch-capable platforms;
    // the router drops it, so no second activation happens.
    let mut ghost_down = Event::pointer(EventKind::MouseDown, first_header, Point::ZERO, t + 10)
        .with_path(tree.composed_path(first_header));
    router.handle(&mut tree, &mut ghost_down);
    println!("after synthetic mouse-down: activating={:?}", router.engine().activating());

    println!("tap second header:");
    let t = tap(&mut router, &mut tree, second_header, t + 1_000);
    second.request_toggle(&mut group);
    first.on_group_change(group.value());
    println!("  expanded: first={} second={}", first.is_expanded(), second.is_expanded());

    // A tap that turns into a scroll: activation is cancelled and the ghost
    // click that follows is vetoed.
    println!("tap interrupted by scroll:");
    let t0 = t + 1_000;
    let mut down = Event::pointer(EventKind::TouchStart, first_header, Point::ZERO, t0)
        .with_path(tree.composed_path(first_header));
    router.handle(&mut tree, &mut down);
    router.handle(&mut tree, &mut Event::signal(EventKind::ScrollStart, t0 + 50));
    router.tick(&mut tree, t0 + 500);
    let mut click = Event::pointer(EventKind::Click, first_header, Point::ZERO, t0 + 520)
        .with_path(tree.composed_path(first_header));
    router.handle(&mut tree, &mut click);
    println!(
        "  activated={} ghost click prevented={}",
        tree.has_marker(first_header, Markers::ACTIVATED),
        click.default_prevented
    );

    router.dispose(&mut tree);
}
