//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the *core* page model and the animation values derived
//! from the scroll offset and turns them into cells on the terminal.  No
//! scroll decisions happen here.

pub mod layout;
pub mod modal;
pub mod nav;
pub mod popup;
pub mod sections;
pub mod stack_widget;
pub mod theme;
