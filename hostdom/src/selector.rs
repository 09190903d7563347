//! A small CSS selector subset.
//!
//! Supported: type (`ul`, `*`), `#id`, `.class`, `[attr]`, `[attr=value]`
//! (value bare or quoted), the descendant (` `) and child (`>`) combinators,
//! and comma-separated selector lists.

use std::fmt;
use std::str::FromStr;

use crate::document::{Document, NodeId};
use crate::error::SelectorError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: Vec<Complex>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

/// Compounds joined by combinators. The combinator stored with a compound
/// relates it to the compound before it; the first one is unused.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Complex {
    parts: Vec<(Combinator, Compound)>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, Option<String>)>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        Parser::new(input).parse()
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.alternatives.iter().any(|complex| {
            let last = complex.parts.len() - 1;
            matches_from(doc, node, &complex.parts, last)
        })
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Right-to-left match of `parts[..=index]` with `parts[index]` on `node`.
fn matches_from(
    doc: &Document,
    node: NodeId,
    parts: &[(Combinator, Compound)],
    index: usize,
) -> bool {
    let (combinator, compound) = &parts[index];
    if !compound.matches(doc, node) {
        return false;
    }
    if index == 0 {
        return true;
    }

    match combinator {
        Combinator::Child => doc
            .parent(node)
            .is_some_and(|parent| matches_from(doc, parent, parts, index - 1)),
        Combinator::Descendant => doc
            .ancestors(node)
            .into_iter()
            .any(|ancestor| matches_from(doc, ancestor, parts, index - 1)),
    }
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attributes.is_empty()
    }

    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some(tag) = doc.tag_name(node) else {
            return false;
        };
        if let Some(wanted) = &self.tag {
            if wanted != "*" && !wanted.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if doc.get_attribute(node, "id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|class| doc.has_class(node, class)) {
            return false;
        }
        self.attributes.iter().all(|(name, value)| {
            match (doc.get_attribute(node, name), value) {
                (None, _) => false,
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => actual == expected,
            }
        })
    }
}

struct Parser<'a> {
    input: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn unexpected(&self) -> SelectorError {
        match self.peek() {
            Some(ch) => SelectorError::UnexpectedChar { ch, pos: self.pos },
            None => SelectorError::UnexpectedEnd,
        }
    }

    fn expect(&mut self, wanted: char) -> Result<(), SelectorError> {
        if self.peek() == Some(wanted) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn parse(mut self) -> Result<Selector, SelectorError> {
        self.skip_whitespace();
        if self.peek().is_none() {
            return Err(SelectorError::Empty);
        }

        let mut alternatives = Vec::new();
        loop {
            self.skip_whitespace();
            alternatives.push(self.parse_complex()?);
            match self.peek() {
                None => break,
                Some(',') => {
                    self.pos += 1;
                }
                Some(_) => return Err(self.unexpected()),
            }
        }

        Ok(Selector {
            source: self.input.trim().to_string(),
            alternatives,
        })
    }

    fn parse_complex(&mut self) -> Result<Complex, SelectorError> {
        let mut parts = Vec::new();
        let mut combinator = Combinator::Descendant;
        loop {
            parts.push((combinator, self.parse_compound()?));

            let had_space = self.skip_whitespace();
            match self.peek() {
                None | Some(',') => break,
                Some('>') => {
                    self.pos += 1;
                    self.skip_whitespace();
                    combinator = Combinator::Child;
                }
                Some(_) if had_space => combinator = Combinator::Descendant,
                Some(_) => return Err(self.unexpected()),
            }
        }
        Ok(Complex { parts })
    }

    fn parse_compound(&mut self) -> Result<Compound, SelectorError> {
        let mut compound = Compound::default();

        if self.peek() == Some('*') {
            self.pos += 1;
            compound.tag = Some("*".into());
        } else if self.peek().is_some_and(is_name_char) {
            compound.tag = Some(self.parse_name()?.to_ascii_lowercase());
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    compound.id = Some(self.parse_name()?);
                }
                Some('.') => {
                    self.pos += 1;
                    compound.classes.push(self.parse_name()?);
                }
                Some('[') => {
                    self.pos += 1;
                    compound.attributes.push(self.parse_attribute()?);
                }
                _ => break,
            }
        }

        if compound.is_empty() {
            return Err(self.unexpected());
        }
        Ok(compound)
    }

    fn parse_name(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while self.peek().is_some_and(is_name_char) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.unexpected());
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn parse_attribute(&mut self) -> Result<(String, Option<String>), SelectorError> {
        self.skip_whitespace();
        let name = self.parse_name()?.to_ascii_lowercase();
        self.skip_whitespace();

        let value = if self.peek() == Some('=') {
            self.pos += 1;
            self.skip_whitespace();
            let value = match self.peek() {
                Some(quote @ ('"' | '\'')) => {
                    self.pos += 1;
                    let start = self.pos;
                    while self.peek().is_some_and(|c| c != quote) {
                        self.pos += 1;
                    }
                    let value: String = self.chars[start..self.pos].iter().collect();
                    self.expect(quote)?;
                    value
                }
                _ => self.parse_name()?,
            };
            self.skip_whitespace();
            Some(value)
        } else {
            None
        };

        match self.bump() {
            Some(']') => Ok((name, value)),
            Some(ch) => Err(SelectorError::UnexpectedChar { ch, pos: self.pos - 1 }),
            None => Err(SelectorError::UnexpectedEnd),
        }
    }
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_errors() {
        assert_eq!(Selector::parse("  "), Err(SelectorError::Empty));
        assert_eq!(Selector::parse("ul,"), Err(SelectorError::UnexpectedEnd));
        assert_eq!(Selector::parse("[open"), Err(SelectorError::UnexpectedEnd));
        assert_eq!(
            Selector::parse("ul > > li"),
            Err(SelectorError::UnexpectedChar { ch: '>', pos: 5 })
        );
        assert!(Selector::parse("button[toggle], [data-drawer='x y']").is_ok());
    }

    #[test]
    fn test_display_keeps_source() {
        let selector = Selector::parse(" nav > ul ").unwrap();
        assert_eq!(selector.to_string(), "nav > ul");
    }
}
