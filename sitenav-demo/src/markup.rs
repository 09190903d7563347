//! The host page the demo mounts.

use hostdom::Element;

fn submenu(label: &str, href: &str, links: &[(&str, &str)]) -> Element {
    Element::li().children(vec![
        Element::link(href, label),
        Element::button(label)
            .flag("data-toggle")
            .attr("opened", "Close")
            .attr("closed", "Open"),
        Element::ul().children(
            links
                .iter()
                .map(|(href, label)| Element::li().child(Element::link(*href, *label))),
        ),
    ])
}

/// A header with a top-level menu button and two nested submenus.
pub fn site_header() -> Element {
    Element::new("header").child(
        Element::new("site-navigation")
            .attr("data-class", "site-nav")
            .flag("collapsed")
            .child(Element::nav().children(vec![
                Element::button("Menu").flag("data-toggle"),
                Element::ul().id("primary-menu").children(vec![
                    Element::li().child(Element::link("/", "Home")),
                    submenu(
                        "Docs",
                        "/docs",
                        &[("/docs/start", "Getting started"), ("/docs/api", "API")],
                    ),
                    submenu("Blog", "/blog", &[("/blog/2024", "2024"), ("/blog/2025", "2025")]),
                    Element::li().child(Element::link("/about", "About")),
                ]),
            ])),
    )
}
