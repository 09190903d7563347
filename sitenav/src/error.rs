//! Error types for navigation wiring and element lifecycles.

use std::any::Any;
use std::fmt;

use hostdom::{DomError, NodeId, SelectorError};
use thiserror::Error;

use crate::lifecycle::Hook;
use crate::navigation::query::SiblingDirection;

/// Errors raised while wiring or driving a navigation widget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    /// The markup does not have the toggle/drawer shape the widget expects.
    #[error("malformed navigation markup at node {node}: {reason}")]
    MalformedStructure {
        /// The node where the problem was detected.
        node: NodeId,
        /// What was wrong.
        reason: String,
    },

    /// A sibling search ran off the end of its parent's children.
    #[error("no matching {direction} sibling of node {from}")]
    SiblingSearchExhausted {
        /// Where the search started.
        from: NodeId,
        /// Which way it walked.
        direction: SiblingDirection,
    },

    /// The tag is not a valid custom element name.
    #[error("invalid custom element name '{0}'")]
    InvalidTagName(String),

    /// A tag was registered twice.
    #[error("custom element '{0}' is already defined")]
    AlreadyDefined(String),

    /// A document operation failed.
    #[error(transparent)]
    Dom(#[from] DomError),

    /// A configured selector could not be parsed.
    #[error(transparent)]
    Selector(#[from] SelectorError),
}

/// A lifecycle hook that failed or panicked while reactions were drained.
///
/// Collected by [`Page`](crate::Page) instead of aborting the drain, so one
/// broken widget does not take down its neighbours.
#[derive(Debug, Clone)]
pub struct LifecycleError {
    /// Tag of the element whose hook failed.
    pub tag: String,
    /// The element's node.
    pub node: NodeId,
    /// Which hook was running.
    pub hook: Hook,
    /// Error details.
    pub kind: LifecycleErrorKind,
}

/// The kind of lifecycle failure.
#[derive(Debug, Clone)]
pub enum LifecycleErrorKind {
    /// The hook returned an error.
    Failed(NavError),
    /// The hook panicked.
    Panic {
        /// Panic message extracted from the panic payload.
        message: String,
    },
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LifecycleErrorKind::Failed(err) => write!(
                f,
                "<{}> node {} hook '{}' failed: {}",
                self.tag, self.node, self.hook, err
            ),
            LifecycleErrorKind::Panic { message } => write!(
                f,
                "<{}> node {} hook '{}' panicked: {}",
                self.tag, self.node, self.hook, message
            ),
        }
    }
}

impl std::error::Error for LifecycleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            LifecycleErrorKind::Failed(err) => Some(err),
            LifecycleErrorKind::Panic { .. } => None,
        }
    }
}

/// Extract a human-readable message from a panic payload.
///
/// Panics carry either a `&str` or a `String`; anything else gets a generic
/// message.
pub fn extract_panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
