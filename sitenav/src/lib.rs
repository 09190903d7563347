//! A disclosure navigation widget on top of [`hostdom`].
//!
//! `<site-navigation>` pairs each toggle button with the drawer that follows
//! it, keeps `hidden` and `aria-expanded` in sync and announces drawer state
//! changes with a cancelable event that never leaves the widget.

extern crate self as sitenav;

pub mod config;
pub mod error;
pub mod instance;
pub mod lifecycle;
pub mod navigation;
pub mod page;
pub mod registration;
pub mod registry;

pub use inventory;
pub use sitenav_derive::custom_element;

pub use config::{CancelPolicy, NavigationConfig};
pub use error::{LifecycleError, LifecycleErrorKind, NavError, extract_panic_message};
pub use instance::WidgetId;
pub use lifecycle::{CustomElement, ElementContext, Hook};
pub use page::Page;
pub use registration::{ElementFactory, ElementRegistration, registered_elements};
pub use registry::CustomElementRegistry;

pub mod prelude {
    pub use crate::config::{CancelPolicy, NavigationConfig};
    pub use crate::error::NavError;
    pub use crate::lifecycle::{CustomElement, ElementContext};
    pub use crate::navigation::{
        Drawer, DrawerAction, Expanded, Notification, NotificationBus, SiteNavigation,
        StateChange, Visibility, WidgetState,
    };
    pub use crate::page::Page;

    pub use hostdom::{Document, Element, NodeId};
    pub use sitenav_derive::custom_element;
}
