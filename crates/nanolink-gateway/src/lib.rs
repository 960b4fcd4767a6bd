//! HTTP adapter for the nanolink core.
//!
//! Translates wire requests into [`nanolink_core::AliasStore`] operations
//! and store results into HTTP responses. No business logic lives here.

pub mod app;
pub mod cli;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use state::AppState;
