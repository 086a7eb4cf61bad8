//! State Management
//!
//! Application context and browser persistence.

pub mod global;
pub mod storage;

pub use global::{provide_app_context, use_app, AppContext};
