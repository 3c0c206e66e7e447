//! Core scroll-snap logic – page layout, snap anchors, settle resolution and
//! scroll-bound progress.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Geometry is
//! in virtual pixels; time comes in as explicit `Instant`s so every decision
//! is reproducible in tests.

pub mod anchor;
pub mod bindings;
pub mod controller;
pub mod motion;
pub mod page;
pub mod portfolio;
pub mod progress;
pub mod resolver;
pub mod timer;
pub mod tracker;
