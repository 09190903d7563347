use std::cell::RefCell;
use std::rc::Rc;

use hostdom::{Document, Element, Event, EventInit, ListenerOptions, NodeId};

/// document > nav#outer > ul#inner > li#leaf
fn create_tree() -> (Document, NodeId, NodeId, NodeId) {
    let mut doc = Document::new();
    let nav = doc.create(
        Element::nav()
            .id("outer")
            .child(Element::ul().id("inner").child(Element::li().id("leaf"))),
    );
    let root = doc.root();
    doc.append_child(root, nav).unwrap();
    let ul = doc.get_element_by_id("inner").unwrap();
    let li = doc.get_element_by_id("leaf").unwrap();
    (doc, nav, ul, li)
}

type Log = Rc<RefCell<Vec<String>>>;

fn record(doc: &mut Document, log: &Log, node: NodeId, label: &str, options: ListenerOptions) {
    let log = Rc::clone(log);
    let label = label.to_string();
    doc.add_event_listener(node, "ping", options, move |_, event| {
        log.borrow_mut().push(format!("{label}:{:?}", event.phase()));
    })
    .unwrap();
}

// ============================================================================
// Propagation
// ============================================================================

#[test]
fn test_capture_target_bubble_order() {
    let log = Log::default();
    let (mut doc, nav, ul, li) = create_tree();
    record(&mut doc, &log, nav, "nav-bubble", ListenerOptions::default());
    record(&mut doc, &log, nav, "nav-capture", ListenerOptions::capture());
    record(&mut doc, &log, ul, "ul-bubble", ListenerOptions::default());
    record(&mut doc, &log, li, "li", ListenerOptions::default());

    let outcome = doc
        .dispatch_event(li, Event::new("ping", EventInit::bubbling()))
        .unwrap();

    assert_eq!(outcome.invoked, 4);
    assert_eq!(
        log.borrow().clone(),
        vec![
            "nav-capture:Capturing",
            "li:AtTarget",
            "ul-bubble:Bubbling",
            "nav-bubble:Bubbling",
        ]
    );
}

#[test]
fn test_non_bubbling_event_stops_at_target() {
    let log = Log::default();
    let (mut doc, nav, _, li) = create_tree();
    record(&mut doc, &log, nav, "nav", ListenerOptions::default());
    record(&mut doc, &log, li, "li", ListenerOptions::default());

    doc.dispatch_event(li, Event::new("ping", EventInit::new()))
        .unwrap();

    assert_eq!(log.borrow().clone(), vec!["li:AtTarget"]);
}

#[test]
fn test_stop_propagation_keeps_other_listeners_on_same_node() {
    let log = Log::default();
    let (mut doc, nav, ul, li) = create_tree();
    doc.add_event_listener(ul, "ping", ListenerOptions::default(), |_, event| {
        event.stop_propagation();
    })
    .unwrap();
    record(&mut doc, &log, ul, "ul", ListenerOptions::default());
    record(&mut doc, &log, nav, "nav", ListenerOptions::default());

    let outcome = doc
        .dispatch_event(li, Event::new("ping", EventInit::bubbling()))
        .unwrap();

    assert!(outcome.stopped);
    assert_eq!(log.borrow().clone(), vec!["ul:Bubbling"]);
}

#[test]
fn test_stop_immediate_propagation() {
    let log = Log::default();
    let (mut doc, _, ul, li) = create_tree();
    doc.add_event_listener(ul, "ping", ListenerOptions::default(), |_, event| {
        event.stop_immediate_propagation();
    })
    .unwrap();
    record(&mut doc, &log, ul, "ul", ListenerOptions::default());

    let outcome = doc
        .dispatch_event(li, Event::new("ping", EventInit::bubbling()))
        .unwrap();

    assert_eq!(outcome.invoked, 1);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_prevent_default_requires_cancelable() {
    let (mut doc, _, _, li) = create_tree();
    doc.add_event_listener(li, "ping", ListenerOptions::default(), |_, event| {
        event.prevent_default();
    })
    .unwrap();

    let cancelable = doc
        .dispatch_event(li, Event::new("ping", EventInit::bubbling()))
        .unwrap();
    assert!(cancelable.default_prevented);
    assert!(!cancelable.proceed());

    let plain = doc
        .dispatch_event(li, Event::new("ping", EventInit::new()))
        .unwrap();
    assert!(!plain.default_prevented);
}

// ============================================================================
// Listeners
// ============================================================================

#[test]
fn test_listener_can_mutate_document() {
    let (mut doc, _, ul, li) = create_tree();
    doc.add_event_listener(li, "click", ListenerOptions::default(), move |doc, _| {
        doc.toggle_attribute(ul, "hidden", None).unwrap();
    })
    .unwrap();

    doc.click(li).unwrap();
    assert!(doc.has_attribute(ul, "hidden"));
    doc.click(li).unwrap();
    assert!(!doc.has_attribute(ul, "hidden"));
}

#[test]
fn test_listener_removed_during_dispatch_does_not_run() {
    let (mut doc, _, _, li) = create_tree();
    let second = Rc::new(RefCell::new(None));
    let handle = Rc::clone(&second);
    doc.add_event_listener(li, "ping", ListenerOptions::default(), move |doc, _| {
        if let Some(id) = *handle.borrow() {
            doc.remove_event_listener(li, id);
        }
    })
    .unwrap();
    let id = doc
        .add_event_listener(li, "ping", ListenerOptions::default(), |_, _| {
            panic!("removed listener ran");
        })
        .unwrap();
    *second.borrow_mut() = Some(id);

    let outcome = doc
        .dispatch_event(li, Event::new("ping", EventInit::bubbling()))
        .unwrap();
    assert_eq!(outcome.invoked, 1);
    assert_eq!(doc.listener_count(li, "ping"), 1);
}

#[test]
fn test_remove_event_listener() {
    let (mut doc, _, _, li) = create_tree();
    let id = doc
        .add_event_listener(li, "ping", ListenerOptions::default(), |_, _| {})
        .unwrap();
    assert!(doc.remove_event_listener(li, id));
    assert!(!doc.remove_event_listener(li, id));
    assert_eq!(doc.listener_count(li, "ping"), 0);
}

#[test]
fn test_custom_event_detail_downcast() {
    #[derive(Debug, PartialEq)]
    struct Payload(u32);

    let (mut doc, nav, _, li) = create_tree();
    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    doc.add_event_listener(nav, "ping", ListenerOptions::default(), move |_, event| {
        *sink.borrow_mut() = event.detail::<Payload>().map(|p| p.0);
        assert!(event.detail::<String>().is_none());
        assert_eq!(event.target(), Some(li));
        assert_eq!(event.current_target(), Some(nav));
    })
    .unwrap();

    doc.dispatch_event(li, Event::custom("ping", EventInit::bubbling(), Payload(7)))
        .unwrap();
    assert_eq!(*seen.borrow(), Some(7));
}

#[test]
fn test_dispatch_to_unknown_node_fails() {
    let mut doc = Document::new();
    let other = {
        let mut bigger = Document::new();
        bigger.create(Element::div());
        bigger.create(Element::div())
    };
    assert!(doc
        .dispatch_event(other, Event::new("ping", EventInit::new()))
        .is_err());
}

// ============================================================================
// Boundaries
// ============================================================================

#[test]
fn test_boundary_cuts_capture_and_bubble_paths() {
    let log = Log::default();
    let (mut doc, nav, ul, li) = create_tree();
    let root = doc.root();
    record(&mut doc, &log, root, "root-capture", ListenerOptions::capture());
    record(&mut doc, &log, root, "root-bubble", ListenerOptions::default());
    record(&mut doc, &log, nav, "nav-capture", ListenerOptions::capture());
    record(&mut doc, &log, ul, "ul-capture", ListenerOptions::capture());
    record(&mut doc, &log, ul, "ul-bubble", ListenerOptions::default());

    assert!(doc.add_event_boundary(ul, "ping").unwrap());
    assert!(!doc.add_event_boundary(ul, "ping").unwrap());
    doc.dispatch_event(li, Event::new("ping", EventInit::bubbling()))
        .unwrap();

    assert_eq!(
        log.borrow().clone(),
        vec!["ul-capture:Capturing", "ul-bubble:Bubbling"]
    );
}

#[test]
fn test_boundary_only_applies_to_its_event_type() {
    let (mut doc, nav, _, li) = create_tree();
    let hits = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&hits);
    let root = doc.root();
    doc.add_event_listener(root, "pong", ListenerOptions::capture(), move |_, _| {
        *sink.borrow_mut() += 1;
    })
    .unwrap();

    doc.add_event_boundary(nav, "ping").unwrap();
    doc.dispatch_event(li, Event::new("pong", EventInit::bubbling()))
        .unwrap();
    assert_eq!(*hits.borrow(), 1);

    assert!(doc.remove_event_boundary(nav, "ping"));
    assert!(!doc.is_event_boundary(nav, "ping"));
}

#[test]
fn test_event_at_boundary_stays_on_target() {
    let log = Log::default();
    let (mut doc, nav, _, _) = create_tree();
    let root = doc.root();
    record(&mut doc, &log, root, "root-capture", ListenerOptions::capture());
    record(&mut doc, &log, nav, "nav", ListenerOptions::default());

    doc.add_event_boundary(nav, "ping").unwrap();
    doc.dispatch_event(nav, Event::new("ping", EventInit::bubbling()))
        .unwrap();

    assert_eq!(log.borrow().clone(), vec!["nav:AtTarget"]);
}
