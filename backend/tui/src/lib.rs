//! Terminal chat UI for SkyCast.
//!
//! Ratatui two-pane layout: scrolling chat history above, input line below.
//! A submission streams fragments into the history pane with an in-progress
//! cursor; the final render drops it.

pub mod app;
pub mod input;
pub mod render;
pub mod run;

pub use app::AppState;
pub use input::handle_key_event;
pub use render::draw_ui;
pub use run::{run, TuiOptions};
