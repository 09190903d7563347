use crate::document::NodeId;

/// A queued lifecycle callback for an element whose tag has been defined
/// with [`Document::define`](crate::Document::define).
///
/// The document only records reactions; whoever owns the custom element
/// implementations drains the queue and runs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    Created(NodeId),
    Connected(NodeId),
    Disconnected(NodeId),
    AttributeChanged {
        node: NodeId,
        name: String,
        old: Option<String>,
        new: Option<String>,
    },
}

impl Reaction {
    pub fn node(&self) -> NodeId {
        match self {
            Self::Created(node) | Self::Connected(node) | Self::Disconnected(node) => *node,
            Self::AttributeChanged { node, .. } => *node,
        }
    }
}
