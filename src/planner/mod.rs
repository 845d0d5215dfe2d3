//! Meal Planner View Model
//!
//! Headless rendition of the single-page view: state, the actions that
//! change it, the session watcher, and a text renderer.
//!
//! ## Data Flow
//!
//! 1. User action reaches [`Planner`]
//! 2. Planner makes one remote call (store, identity provider, or backend)
//! 3. The response is applied to [`PlannerState`]
//! 4. A renderer draws the new state

mod controller;
mod state;
pub mod view;
mod watcher;

pub use controller::Planner;
pub use state::{PlannerState, Theme};
pub use watcher::SessionWatcher;
