//! Cosmetic BEM-style classes applied when a widget connects.
//!
//! Classes only affect styling; nothing reads them back.

use std::rc::Rc;

use hostdom::{Document, NodeId};

use crate::error::NavError;
use crate::navigation::drawer::Drawer;
use crate::navigation::query::belongs_to;

pub const MENU_ITEM: &str = "menuItem";
pub const MENU_ITEM_PARENT: &str = "menuItem--parent";
pub const MENU_LINK: &str = "menuLink";
pub const MENU_SUBMENU: &str = "menuSubmenu";
pub const MENU: &str = "menu";
pub const MENU_TOPMENU: &str = "menuTopmenu";
pub const MENU_TOGGLE: &str = "menuToggle";
pub const DRAWER: &str = "drawer";

/// `{prefix}__{element}`
pub fn class_name(prefix: &str, element: &str) -> String {
    format!("{prefix}__{element}")
}

fn tag_all(
    doc: &mut Document,
    host: NodeId,
    selector: &str,
    class: &str,
) -> Result<usize, NavError> {
    let nodes = owned(doc, host, selector)?;
    for node in &nodes {
        doc.add_class(*node, class)?;
    }
    Ok(nodes.len())
}

/// Nodes under `host` matching `selector`, minus those inside a nested widget.
fn owned(doc: &Document, host: NodeId, selector: &str) -> Result<Vec<NodeId>, NavError> {
    let mut nodes = doc.query_all(host, selector)?;
    nodes.retain(|node| belongs_to(doc, *node, host));
    Ok(nodes)
}

/// Tag the menu structure under `host` and the wired toggle/drawer pairs.
pub fn apply_classes(
    doc: &mut Document,
    host: NodeId,
    prefix: &str,
    drawers: &[Rc<Drawer>],
) -> Result<(), NavError> {
    let item_class = class_name(prefix, MENU_ITEM);
    let parent_class = class_name(prefix, MENU_ITEM_PARENT);
    for item in owned(doc, host, "li")? {
        doc.add_class(item, &item_class)?;
        if !doc.query_all(item, "ul")?.is_empty() {
            doc.add_class(item, &parent_class)?;
        }
    }

    let tagged = tag_all(doc, host, "li > a", &class_name(prefix, MENU_LINK))?
        + tag_all(doc, host, "li > ul", &class_name(prefix, MENU_SUBMENU))?
        + tag_all(doc, host, "nav ul", &class_name(prefix, MENU))?
        + tag_all(doc, host, "nav > ul", &class_name(prefix, MENU_TOPMENU))?;

    let toggle_class = class_name(prefix, MENU_TOGGLE);
    let drawer_class = class_name(prefix, DRAWER);
    for drawer in drawers {
        doc.add_class(drawer.toggle().node(), &toggle_class)?;
        doc.add_class(drawer.node(), &drawer_class)?;
    }

    log::trace!(
        "{host} classes applied with prefix '{prefix}': {tagged} menu nodes, {} pairs",
        drawers.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use hostdom::Element;

    use super::*;

    #[test]
    fn test_menu_structure_classes() {
        let mut doc = Document::new();
        let host = doc.create(Element::new("site-navigation").child(
            Element::nav().child(Element::ul().children(vec![
                Element::li().child(Element::link("/", "Home")),
                Element::li().children(vec![
                    Element::link("/docs", "Docs"),
                    Element::ul().child(Element::li().child(Element::link("/api", "API"))),
                ]),
            ])),
        ));
        apply_classes(&mut doc, host, "nav", &[]).unwrap();

        let top = doc.query_all(host, "nav > ul").unwrap()[0];
        assert_eq!(doc.class_list(top), vec!["nav__menu", "nav__menuTopmenu"]);

        let items = doc.query_all(host, "li").unwrap();
        assert_eq!(doc.class_list(items[0]), vec!["nav__menuItem"]);
        assert_eq!(
            doc.class_list(items[1]),
            vec!["nav__menuItem", "nav__menuItem--parent"]
        );

        let sub = doc.query_all(host, "li > ul").unwrap()[0];
        assert_eq!(doc.class_list(sub), vec!["nav__menuSubmenu", "nav__menu"]);
        assert_eq!(doc.query_all(host, ".nav__menuLink").unwrap().len(), 3);
    }

    #[test]
    fn test_reapplying_does_not_duplicate() {
        let mut doc = Document::new();
        let host = doc.create(
            Element::new("site-navigation").child(Element::ul().child(Element::li())),
        );
        apply_classes(&mut doc, host, "p", &[]).unwrap();
        apply_classes(&mut doc, host, "p", &[]).unwrap();

        let item = doc.query_all(host, "li").unwrap()[0];
        assert_eq!(doc.get_attribute(item, "class"), Some("p__menuItem"));
    }
}
