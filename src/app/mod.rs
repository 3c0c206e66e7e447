//! Application orchestration: state management, event loop plumbing, and input handling.

pub mod event;
pub mod handler;
pub mod scroll_runtime;
pub mod state;
pub mod viewport;
