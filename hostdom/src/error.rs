use thiserror::Error;

use crate::document::NodeId;

/// Errors raised by tree and attribute operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("node {0} does not exist in this document")]
    UnknownNode(NodeId),

    #[error("node {0} is not an element")]
    NotAnElement(NodeId),

    #[error("node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },

    /// Inserting `child` under `parent` would create a cycle, or `parent`
    /// cannot hold children.
    #[error("cannot insert {child} under {parent}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    #[error(transparent)]
    Selector(#[from] SelectorError),
}

/// Errors raised while parsing a selector string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unexpected character {ch:?} at {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("unexpected end of selector")]
    UnexpectedEnd,
}

pub type Result<T> = std::result::Result<T, DomError>;
