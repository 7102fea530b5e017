//! Comprehensive tests for nwd-dom
//!
//! Tree, selector queries and event dispatch working together.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use nwd_dom::{
    dispatch_event, Document, DomError, ElementQuery, Event, EventCallback, ListenerOptions,
    NodeId, SelectorList,
};

fn todo_document() -> (Document, NodeId, Vec<NodeId>) {
    let mut doc = Document::new("https://todo.test/");
    let body = doc.body().unwrap();

    let list = doc.tree.create_element("ul");
    doc.tree.set_attribute(list, "id", "todos").unwrap();
    doc.tree.append_child(body, list).unwrap();

    let mut items = Vec::new();
    for (i, label) in ["milk", "eggs", "bread", "tea"].iter().enumerate() {
        let li = doc.tree.create_element("li");
        doc.tree.set_attribute(li, "class", if i % 2 == 0 { "todo" } else { "todo done" }).unwrap();
        doc.tree.set_attribute(li, "data-label", label).unwrap();
        let text = doc.tree.create_text(label);
        doc.tree.append_child(li, text).unwrap();
        doc.tree.append_child(list, li).unwrap();
        items.push(li);
    }
    (doc, list, items)
}

// ============================================================================
// QUERIES
// ============================================================================

#[test]
fn test_queries_follow_document_order() {
    let (doc, _, items) = todo_document();

    assert_eq!(doc.query_selector_all(doc.root(), "#todos > li").unwrap(), items);
    assert_eq!(doc.query_selector_all(doc.root(), ".done").unwrap(), vec![items[1], items[3]]);
    assert_eq!(
        doc.query_selector_all(doc.root(), "li:not(.done), [data-label^=t]").unwrap(),
        vec![items[0], items[2], items[3]]
    );
}

#[test]
fn test_query_sees_mutations() {
    let (mut doc, list, items) = todo_document();
    let selector = SelectorList::parse("li.todo").unwrap();
    assert_eq!(doc.select_all(list, &selector).len(), 4);

    doc.tree.remove(items[0]);
    let extra = doc.tree.create_element("li");
    doc.tree.set_attribute(extra, "class", "todo").unwrap();
    doc.tree.append_child(list, extra).unwrap();

    assert_eq!(doc.select_all(list, &selector), vec![items[1], items[2], items[3], extra]);
}

#[test]
fn test_text_content_of_list() {
    let (doc, list, _) = todo_document();
    assert_eq!(doc.tree.text_content(list), "milkeggsbreadtea");
}

#[test]
fn test_hierarchy_errors() {
    let (mut doc, list, items) = todo_document();
    assert_eq!(doc.tree.append_child(items[0], list), Err(DomError::HierarchyRequest));
    assert_eq!(doc.tree.append_child(list, NodeId::ROOT), Err(DomError::HierarchyRequest));
}

// ============================================================================
// EVENTS
// ============================================================================

#[test]
fn test_bubbling_reaches_document() {
    let (doc, _, items) = todo_document();
    let doc = RefCell::new(doc);
    let hits = Rc::new(Cell::new(0));

    let counter = {
        let hits = Rc::clone(&hits);
        EventCallback::new(move |event| {
            assert_eq!(event.current_target(), Some(NodeId::ROOT));
            hits.set(hits.get() + 1);
        })
    };
    doc.borrow_mut()
        .add_event_listener(NodeId::ROOT, "click", counter.clone(), ListenerOptions::default());

    dispatch_event(&doc, items[2], &mut Event::bubbling("click"));
    assert_eq!(hits.get(), 1);

    assert!(doc.borrow_mut().remove_event_listener(NodeId::ROOT, "click", &counter, false));
    dispatch_event(&doc, items[2], &mut Event::bubbling("click"));
    assert_eq!(hits.get(), 1);
}

#[test]
fn test_listener_removed_mid_dispatch_does_not_run() {
    let (doc, list, _) = todo_document();
    let doc = Rc::new(RefCell::new(doc));
    let ran = Rc::new(Cell::new(false));

    let second = {
        let ran = Rc::clone(&ran);
        EventCallback::new(move |_| ran.set(true))
    };
    let first = {
        let doc = Rc::clone(&doc);
        let second = second.clone();
        EventCallback::new(move |_| {
            doc.borrow_mut().remove_event_listener(list, "click", &second, false);
        })
    };
    doc.borrow_mut().add_event_listener(list, "click", first, ListenerOptions::default());
    doc.borrow_mut().add_event_listener(list, "click", second, ListenerOptions::default());

    dispatch_event(&doc, list, &mut Event::bubbling("click"));
    assert!(!ran.get());
}

#[test]
fn test_detached_target_dispatch() {
    let (mut doc, list, items) = todo_document();
    doc.tree.remove(items[0]);
    let doc = RefCell::new(doc);
    let hits = Rc::new(Cell::new(0));
    let counter = {
        let hits = Rc::clone(&hits);
        EventCallback::new(move |_| hits.set(hits.get() + 1))
    };
    doc.borrow_mut().add_event_listener(list, "click", counter.clone(), ListenerOptions::default());
    doc.borrow_mut().add_event_listener(items[0], "click", counter, ListenerOptions::default());

    // Only the target itself is on the path of a detached node
    dispatch_event(&doc, items[0], &mut Event::bubbling("click"));
    assert_eq!(hits.get(), 1);
}
