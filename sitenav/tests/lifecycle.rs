use hostdom::{Element, NodeId};
use sitenav::lifecycle::{CustomElement, ElementContext, Hook};
use sitenav::navigation::{DRAWER_STATE_CHANGE, SiteNavigation, WidgetState};
use sitenav::{CustomElementRegistry, LifecycleErrorKind, NavError, NavigationConfig, Page};

fn menu() -> Element {
    Element::new("site-navigation").children(vec![
        Element::button("Menu").flag("data-toggle"),
        Element::ul().flag("hidden"),
    ])
}

fn state(page: &Page, node: NodeId) -> WidgetState {
    page.instance::<SiteNavigation>(node).unwrap().state()
}

#[derive(Default)]
struct Failing;

impl CustomElement for Failing {
    fn connected(&mut self, cx: &mut ElementContext<'_>) -> Result<(), NavError> {
        Err(NavError::MalformedStructure {
            node: cx.host,
            reason: "refusing to attach".to_string(),
        })
    }
}

#[derive(Default)]
struct Panicking;

impl CustomElement for Panicking {
    fn created(&mut self, _cx: &mut ElementContext<'_>) -> Result<(), NavError> {
        panic!("created blew up");
    }
}

fn failing() -> Box<dyn CustomElement> {
    Box::new(Failing)
}

fn panicking() -> Box<dyn CustomElement> {
    Box::new(Panicking)
}

fn broken_selector() -> Box<dyn CustomElement> {
    Box::new(SiteNavigation::with_config(
        NavigationConfig::new().toggle_selector("button[data-toggle"),
    ))
}

// ============================================================================
// Widget states
// ============================================================================

#[test]
fn test_created_without_insertion_is_wired() {
    let mut page = Page::new();
    let host = page.create(menu());

    assert_eq!(state(&page, host), WidgetState::Wired);
    let toggle = page.instance::<SiteNavigation>(host).unwrap().drawers()[0]
        .toggle()
        .node();
    assert_eq!(page.document().get_attribute(toggle, "aria-expanded"), Some("false"));
    assert!(page.document().class_list(toggle).is_empty());

    let root = page.document().root();
    page.append_child(root, host).unwrap();
    assert_eq!(state(&page, host), WidgetState::Attached);
    assert!(page.document().has_class(toggle, "site-navigation__menuToggle"));
}

#[test]
fn test_reattach_keeps_listeners_and_boundary() {
    let mut page = Page::new();
    let host = page.mount(menu()).unwrap();
    let listeners = page.document().listener_count(host, DRAWER_STATE_CHANGE);
    let toggle = page.instance::<SiteNavigation>(host).unwrap().drawers()[0]
        .toggle()
        .node();

    page.remove(host).unwrap();
    assert_eq!(state(&page, host), WidgetState::Detached);

    // Listeners survive detachment.
    page.click(toggle).unwrap();
    assert_eq!(page.document().get_attribute(toggle, "aria-expanded"), Some("true"));

    let root = page.document().root();
    page.append_child(root, host).unwrap();
    assert_eq!(state(&page, host), WidgetState::Attached);
    assert_eq!(page.document().listener_count(host, DRAWER_STATE_CHANGE), listeners);
    assert!(page.document().is_event_boundary(host, DRAWER_STATE_CHANGE));
    assert_eq!(page.instance::<SiteNavigation>(host).unwrap().drawers().len(), 1);
}

#[test]
fn test_attribute_changes_have_no_state_effect() {
    let mut page = Page::new();
    let host = page.mount(menu()).unwrap();
    let before = page.document().outer_html(host);

    page.set_attribute(host, "data-class", "other").unwrap();
    page.set_attribute(host, "data-class", "again").unwrap();
    page.remove_attribute(host, "data-class").unwrap();

    assert_eq!(page.document().outer_html(host), before);
    assert_eq!(
        page.instance::<SiteNavigation>(host).unwrap().config().class_prefix,
        "site-navigation"
    );
    assert!(page.lifecycle_errors().is_empty());
}

#[test]
fn test_every_widget_gets_its_own_instance() {
    let mut page = Page::new();
    let first = page.mount(menu()).unwrap();
    let second = page.mount(menu()).unwrap();

    assert_eq!(page.instances_of::<SiteNavigation>(), vec![first, second]);
    let a = page.instance::<SiteNavigation>(first).unwrap().id();
    let b = page.instance::<SiteNavigation>(second).unwrap().id();
    assert_ne!(a, b);
}

// ============================================================================
// Page host
// ============================================================================

#[test]
fn test_define_upgrades_existing_elements() {
    let mut page = Page::with_registry(CustomElementRegistry::new());
    let host = page.mount(menu()).unwrap();
    assert!(page.instance::<SiteNavigation>(host).is_none());

    page.define("site-navigation", || Box::new(SiteNavigation::default()))
        .unwrap();
    assert_eq!(state(&page, host), WidgetState::Attached);
    assert!(matches!(
        page.define("site-navigation", || Box::new(SiteNavigation::default())),
        Err(NavError::AlreadyDefined(_))
    ));
}

#[test]
fn test_failed_hook_is_recorded() {
    let mut page = Page::new();
    page.define("x-failing", failing).unwrap();
    let node = page.mount(Element::new("x-failing")).unwrap();

    let errors = page.lifecycle_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].node, node);
    assert_eq!(errors[0].hook, Hook::Connected);
    assert!(matches!(
        errors[0].kind,
        LifecycleErrorKind::Failed(NavError::MalformedStructure { .. })
    ));
    assert!(errors[0].to_string().contains("refusing to attach"));
}

#[test]
fn test_panicking_hook_does_not_stop_other_elements() {
    let mut page = Page::new();
    page.define("x-panicking", panicking).unwrap();
    let host = page
        .mount(Element::div().children(vec![Element::new("x-panicking"), menu()]))
        .unwrap();

    let errors = page.take_lifecycle_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].tag, "x-panicking");
    assert_eq!(errors[0].hook, Hook::Created);
    match &errors[0].kind {
        LifecycleErrorKind::Panic { message } => assert_eq!(message, "created blew up"),
        other => panic!("unexpected error kind: {other:?}"),
    }
    assert!(page.lifecycle_errors().is_empty());

    let nav = page.document().element_children(host)[1];
    assert_eq!(state(&page, nav), WidgetState::Attached);
}

#[test]
fn test_bad_selector_fails_creation() {
    let mut page = Page::new();
    page.define("broken-navigation", broken_selector).unwrap();
    let host = page
        .mount(Element::new("broken-navigation").children(vec![
            Element::button("Menu").flag("data-toggle"),
            Element::ul(),
        ]))
        .unwrap();

    let errors = page.lifecycle_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].hook, Hook::Created);
    assert!(matches!(
        errors[0].kind,
        LifecycleErrorKind::Failed(NavError::Selector(_))
    ));
    assert!(page.instance::<SiteNavigation>(host).unwrap().drawers().is_empty());
    let toggle = page.document().element_children(host)[0];
    assert!(!page.document().has_attribute(toggle, "aria-expanded"));
}
