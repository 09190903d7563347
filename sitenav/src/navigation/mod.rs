//! The site navigation widget and the pieces it is built from.

pub mod classes;
pub mod drawer;
pub mod notify;
pub mod query;
pub mod state;
pub mod toggle;
pub mod widget;

pub use drawer::{Drawer, StateChange, drawer_state, set_drawer_state, toggle_drawer_state};
pub use notify::{DRAWER_STATE_CHANGE, MENU_TOGGLED, Notification, NotificationBus, TOGGLE_STATE};
pub use query::{SiblingDirection, find_drawer_for, find_toggle_for, find_toggles, sibling};
pub use state::{DrawerAction, Expanded, Visibility};
pub use toggle::{Toggle, ToggleLabels, reset_toggle_state, set_toggle_state, toggle_state};
pub use widget::{SiteNavigation, WidgetState};
