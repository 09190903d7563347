pub mod document;
pub mod element;
pub mod error;
pub mod event;
pub mod reaction;
pub mod selector;

pub use document::{Document, NodeId};
pub use element::{Content, Element};
pub use error::{DomError, SelectorError};
pub use event::{
    Callback, DispatchOutcome, Event, EventInit, ListenerId, ListenerOptions, Phase, CLICK,
};
pub use reaction::Reaction;
pub use selector::Selector;
