use super::Content;

/// Declarative description of an element subtree.
///
/// An `Element` is plain data: nothing happens until it is materialized with
/// [`Document::create`](crate::Document::create) and inserted into the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    /// Attributes in insertion order. Boolean attributes carry an empty value.
    pub attributes: Vec<(String, String)>,
    pub content: Content,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn nav() -> Self {
        Self::new("nav")
    }

    pub fn ul() -> Self {
        Self::new("ul")
    }

    pub fn li() -> Self {
        Self::new("li")
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    /// A `<button>` with the given label.
    pub fn button(label: impl Into<String>) -> Self {
        Self::new("button").text(label)
    }

    /// An `<a>` pointing at `href`.
    pub fn link(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new("a").attr("href", href).text(label)
    }

    // Identity
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    // Attributes
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into().to_ascii_lowercase();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    /// Set a boolean (presence) attribute such as `hidden`.
    pub fn flag(self, name: impl Into<String>) -> Self {
        self.attr(name, "")
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        match self.attributes.iter_mut().find(|(n, _)| n == "class") {
            Some((_, value)) if value.split_whitespace().any(|c| c == class) => {}
            Some((_, value)) if value.is_empty() => *value = class,
            Some((_, value)) => {
                value.push(' ');
                value.push_str(&class);
            }
            None => self.attributes.push(("class".into(), class)),
        }
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    // Content
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content = Content::Text(text.into());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        match &mut self.content {
            Content::Children(children) => children.extend(new_children),
            _ => self.content = Content::Children(new_children.into_iter().collect()),
        }
        self
    }
}
