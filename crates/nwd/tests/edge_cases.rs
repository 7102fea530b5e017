//! Edge case tests for nwd

use std::cell::Cell;
use std::rc::Rc;

use nwd::{Dom, Error, Handler, ListenOptions, NodeId};

fn counter() -> (Handler, Rc<Cell<u32>>) {
    let hits = Rc::new(Cell::new(0));
    let h = Rc::clone(&hits);
    (Handler::new(move |_, _, _| h.set(h.get() + 1)), hits)
}

fn nested() -> Dom {
    let html = concat!(
        r#"<section id="outer">"#,
        r#"<div class="row"><button class="btn">go</button></div>"#,
        "</section>",
    );
    Dom::from_html(html).unwrap()
}

// ============================================================================
// ERRORS
// ============================================================================

#[test]
fn test_malformed_selectors() {
    let dom = nested();
    for bad in ["", "div >", "[attr", "::before", ":hover-ish", "a,,b"] {
        assert!(
            matches!(dom.select(bad), Err(Error::InvalidSelector(_))),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn test_bad_delegate_selector_registers_nothing() {
    let dom = nested();
    let (handler, _) = counter();
    let outer = dom.select("#outer").unwrap();
    assert!(outer.on_delegated("click", "button[", &handler).is_err());
    assert_eq!(dom.registration_count(), 0);
}

#[test]
fn test_off_unknown_is_noop() {
    let dom = nested();
    let (registered, hits) = counter();
    let (stranger, _) = counter();
    let btn = dom.select(".btn").unwrap();
    btn.on("click", &registered);

    btn.off("click", &stranger)
        .off("keyup", &registered)
        .off_delegated("click", ".btn", &registered);
    dom.click(btn.first().unwrap());
    assert_eq!(hits.get(), 1);
}

// ============================================================================
// PARENT
// ============================================================================

#[test]
fn test_parent_of_detached_first_item() {
    let dom = nested();
    let loose = dom.create_element("p");
    assert!(dom.wrap(loose).parent().is_none());
}

#[test]
fn test_parent_of_html_is_document() {
    let dom = nested();
    let html = dom.select("html").unwrap();
    assert_eq!(html.parent().unwrap().first(), Some(NodeId::ROOT));
    assert!(dom.wrap(NodeId::ROOT).parent().is_none());
}

// ============================================================================
// REGISTRATION SHAPES
// ============================================================================

#[test]
fn test_on_empty_selection_registers_nothing() {
    let dom = nested();
    let (handler, _) = counter();
    dom.select(".missing").unwrap().on("click", &handler);
    dom.select("div").unwrap().on("", &handler).on("   ", &handler);
    assert_eq!(dom.registration_count(), 0);
}

#[test]
fn test_once_option() {
    let dom = nested();
    let (handler, hits) = counter();
    let btn = dom.select(".btn").unwrap();
    btn.on_with("click", &handler, &ListenOptions::new().with_once(true)).unwrap();

    let node = btn.first().unwrap();
    dom.click(node);
    dom.click(node);
    assert_eq!(hits.get(), 1);
    assert_eq!(dom.registration_count(), 0);
}

#[test]
fn test_delegated_once_survives_miss() {
    let dom = nested();
    let (handler, hits) = counter();
    let options = ListenOptions::new().with_delegate(".btn").with_once(true);
    dom.select("#outer").unwrap().on_with("click", &handler, &options).unwrap();

    // A click that matches nothing keeps the registration armed
    dom.click(dom.select(".row").unwrap().first().unwrap());
    assert_eq!(hits.get(), 0);
    assert_eq!(dom.registration_count(), 1);

    let btn = dom.select(".btn").unwrap().first().unwrap();
    dom.click(btn);
    dom.click(btn);
    assert_eq!(hits.get(), 1);
    assert_eq!(dom.registration_count(), 0);
}

#[test]
fn test_off_with_requires_matching_capture() {
    let dom = nested();
    let (handler, hits) = counter();
    let outer = dom.select("#outer").unwrap();
    let capture = ListenOptions::new().with_capture(true).with_delegate(".btn");
    outer.on_with("click", &handler, &capture).unwrap();

    outer.off_delegated("click", ".btn", &handler);
    let btn = dom.select(".btn").unwrap().first().unwrap();
    dom.click(btn);
    assert_eq!(hits.get(), 1);

    outer.off_with("click", &handler, &capture);
    dom.click(btn);
    assert_eq!(hits.get(), 1);
}

#[test]
fn test_same_handler_on_two_selections() {
    let dom = nested();
    let (handler, hits) = counter();
    let row = dom.select(".row").unwrap();
    let outer = dom.select("#outer").unwrap();
    row.on("click", &handler);
    outer.on("click", &handler);

    // Removing from one element leaves the other
    row.off("click", &handler);
    dom.click(dom.select(".btn").unwrap().first().unwrap());
    assert_eq!(hits.get(), 1);
}

// ============================================================================
// DELEGATION
// ============================================================================

#[test]
fn test_delegation_ignores_ancestor_match() {
    let dom = nested();
    let (handler, hits) = counter();
    dom.select("#outer").unwrap().on_delegated("click", ".row", &handler).unwrap();

    // Origin is the button; only the origin itself is compared
    dom.click(dom.select(".btn").unwrap().first().unwrap());
    assert_eq!(hits.get(), 0);
    dom.click(dom.select(".row").unwrap().first().unwrap());
    assert_eq!(hits.get(), 1);
}

#[test]
fn test_delegation_after_origin_detached() {
    let dom = nested();
    let (handler, hits) = counter();
    let btn = dom.select(".btn").unwrap();
    let node = btn.first().unwrap();

    // Detach the origin from inside an earlier listener on the same node
    let detacher = Handler::new(|dom, node, _| dom.wrap(node).remove());
    btn.on("click", &detacher);
    btn.on_delegated("click", ".btn", &handler).unwrap();

    dom.click(node);
    assert_eq!(hits.get(), 0);
}

#[test]
fn test_delegation_selector_relative_to_parent() {
    let dom = nested();
    let (handler, hits) = counter();
    dom.select("#outer").unwrap().on_delegated("click", "#outer .row > .btn", &handler).unwrap();
    dom.click(dom.select(".btn").unwrap().first().unwrap());
    assert_eq!(hits.get(), 1);
}

#[test]
fn test_stop_propagation_in_handler() {
    let dom = nested();
    let (outer_handler, outer_hits) = counter();
    let stopper = Handler::new(|_, _, event| event.stop_propagation());
    dom.select("#outer").unwrap().on("click", &outer_handler);
    dom.select(".row").unwrap().on_delegated("click", ".btn", &stopper).unwrap();

    dom.click(dom.select(".btn").unwrap().first().unwrap());
    assert_eq!(outer_hits.get(), 0);
}

#[test]
fn test_prevent_default_reported() {
    let dom = nested();
    let preventer = Handler::new(|_, _, event| event.prevent_default());
    let btn = dom.select(".btn").unwrap();
    btn.on("submit", &preventer);
    assert!(!dom.trigger(btn.first().unwrap(), "submit"));
    assert!(dom.trigger(btn.first().unwrap(), "reset"));
}

#[test]
fn test_handler_registers_during_dispatch() {
    let dom = nested();
    let (late, late_hits) = counter();
    let late_for_closure = late.clone();
    let installer = Handler::new(move |dom, node, _| {
        dom.wrap(node).on("click", &late_for_closure);
    });
    let btn = dom.select(".btn").unwrap();
    btn.on_with("click", &installer, &ListenOptions::new().with_once(true)).unwrap();

    let node = btn.first().unwrap();
    dom.click(node);
    assert_eq!(late_hits.get(), 0);
    dom.click(node);
    assert_eq!(late_hits.get(), 1);
}

// ============================================================================
// CLASSES
// ============================================================================

#[test]
fn test_class_ops_on_empty_selection() {
    let dom = nested();
    let none = dom.select(".missing").unwrap();
    none.add_class(&["x"]).toggle_class("y");
    assert!(!none.has_class("x"));
    assert!(none.classes().is_empty());
}
