//! State Management
//!
//! Page state and the stored sign-in session.

pub mod global;
pub mod session;

pub use global::{provide_global_state, GlobalState, Meal, User};
pub use session::StoredSession;
