//! Event dispatch
//!
//! Capture → target → bubble over the target's ancestor path. The path is
//! fixed when dispatch starts; listeners are looked up per node as the
//! event reaches it, and no borrow of the document is held while a
//! listener runs, so listeners may freely mutate the tree.

use std::cell::RefCell;

use crate::{Document, Event, EventPhase, NodeId};

/// Dispatch `event` at `target`. Returns false if a listener prevented default.
pub fn dispatch_event(document: &RefCell<Document>, target: NodeId, event: &mut Event) -> bool {
    let path: Vec<NodeId> = {
        let doc = document.borrow();
        std::iter::once(target).chain(doc.tree.ancestors(target)).collect()
    };

    event.begin(target);
    tracing::trace!("dispatch {} at {} (path length {})", event.event_type, target, path.len());

    'dispatch: {
        // Capture: topmost ancestor down to the target's parent
        for &node in path.iter().skip(1).rev() {
            invoke(document, node, event, EventPhase::Capturing, true);
            if event.is_propagation_stopped() {
                break 'dispatch;
            }
        }

        invoke(document, target, event, EventPhase::AtTarget, true);
        if event.is_immediate_stopped() {
            break 'dispatch;
        }
        invoke(document, target, event, EventPhase::AtTarget, false);
        if event.is_propagation_stopped() || !event.bubbles {
            break 'dispatch;
        }

        for &node in path.iter().skip(1) {
            invoke(document, node, event, EventPhase::Bubbling, false);
            if event.is_propagation_stopped() {
                break 'dispatch;
            }
        }
    }

    event.finish();
    !event.is_default_prevented()
}

fn invoke(
    document: &RefCell<Document>,
    node: NodeId,
    event: &mut Event,
    phase: EventPhase,
    capture: bool,
) {
    let listeners: Vec<_> = document
        .borrow()
        .listeners()
        .matching(node, &event.event_type)
        .into_iter()
        .filter(|l| l.options.capture == capture)
        .collect();
    if listeners.is_empty() {
        return;
    }

    event.enter(node, phase);
    for listener in listeners {
        if event.is_immediate_stopped() {
            return;
        }
        {
            let mut doc = document.borrow_mut();
            // Removed by an earlier listener in this dispatch
            if !doc.listeners().contains(node, listener.id) {
                continue;
            }
            if listener.options.once {
                doc.listeners_mut().remove_by_id(node, listener.id);
            }
        }

        event.set_passive(listener.options.passive);
        listener.callback.call(event);
        event.set_passive(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EventCallback, ListenerOptions};
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    fn recorder(log: &Log, label: &str) -> EventCallback {
        let log = Rc::clone(log);
        let label = label.to_string();
        EventCallback::new(move |event| {
            log.borrow_mut().push(format!("{label}:{:?}", event.phase()));
        })
    }

    fn nested() -> (RefCell<Document>, NodeId, NodeId) {
        let mut doc = Document::default();
        let body = doc.body().unwrap();
        let outer = doc.tree.create_element("div");
        let inner = doc.tree.create_element("button");
        doc.tree.append_child(body, outer).unwrap();
        doc.tree.append_child(outer, inner).unwrap();
        (RefCell::new(doc), outer, inner)
    }

    #[test]
    fn test_capture_target_bubble_order() {
        let (doc, outer, inner) = nested();
        let log: Log = Rc::default();
        {
            let mut d = doc.borrow_mut();
            let bubble = ListenerOptions::default();
            d.add_event_listener(outer, "click", recorder(&log, "outer-bubble"), bubble);
            let capture = ListenerOptions::capture();
            d.add_event_listener(outer, "click", recorder(&log, "outer-capture"), capture);
            d.add_event_listener(inner, "click", recorder(&log, "inner"), bubble);
        }

        assert!(dispatch_event(&doc, inner, &mut Event::bubbling("click")));
        assert_eq!(
            *log.borrow(),
            vec!["outer-capture:Capturing", "inner:AtTarget", "outer-bubble:Bubbling"]
        );
    }

    #[test]
    fn test_non_bubbling_event_stays_at_target() {
        let (doc, outer, inner) = nested();
        let log: Log = Rc::default();
        {
            let mut d = doc.borrow_mut();
            let bubble = ListenerOptions::default();
            d.add_event_listener(outer, "focus", recorder(&log, "outer"), bubble);
            d.add_event_listener(inner, "focus", recorder(&log, "inner"), bubble);
        }

        dispatch_event(&doc, inner, &mut Event::new("focus"));
        assert_eq!(*log.borrow(), vec!["inner:AtTarget"]);
    }

    #[test]
    fn test_stop_propagation() {
        let (doc, outer, inner) = nested();
        let log: Log = Rc::default();
        let stopper = EventCallback::new(|event| event.stop_propagation());
        {
            let mut d = doc.borrow_mut();
            d.add_event_listener(inner, "click", stopper, ListenerOptions::default());
            let bubble = ListenerOptions::default();
            d.add_event_listener(inner, "click", recorder(&log, "inner-2"), bubble);
            d.add_event_listener(outer, "click", recorder(&log, "outer"), bubble);
        }

        dispatch_event(&doc, inner, &mut Event::bubbling("click"));
        assert_eq!(*log.borrow(), vec!["inner-2:AtTarget"]);
    }

    #[test]
    fn test_once_listener_runs_once() {
        let (doc, _, inner) = nested();
        let log: Log = Rc::default();
        let once = ListenerOptions { once: true, ..Default::default() };
        doc.borrow_mut().add_event_listener(inner, "click", recorder(&log, "once"), once);

        dispatch_event(&doc, inner, &mut Event::bubbling("click"));
        dispatch_event(&doc, inner, &mut Event::bubbling("click"));
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(doc.borrow().listener_count(inner), 0);
    }

    #[test]
    fn test_listener_may_mutate_document() {
        let (doc, outer, inner) = nested();
        let doc = Rc::new(doc);
        let handle = Rc::clone(&doc);
        let remover = EventCallback::new(move |event| {
            if let Some(target) = event.target() {
                handle.borrow_mut().tree.remove(target);
            }
        });
        doc.borrow_mut().add_event_listener(inner, "click", remover, ListenerOptions::default());

        dispatch_event(&doc, inner, &mut Event::bubbling("click"));
        assert_eq!(doc.borrow().tree.parent(inner), None);
        assert_eq!(doc.borrow().tree.children(outer).count(), 0);
    }

    #[test]
    fn test_prevent_default_result() {
        let (doc, _, inner) = nested();
        let preventer = EventCallback::new(|event| event.prevent_default());
        doc.borrow_mut().add_event_listener(inner, "submit", preventer, ListenerOptions::default());

        assert!(!dispatch_event(&doc, inner, &mut Event::bubbling("submit")));
        assert!(dispatch_event(&doc, inner, &mut Event::new("submit")));
    }
}
