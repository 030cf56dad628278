//! HTTP front end for the Shorty URL shortener.
//!
//! Serves the HTML form and listing pages, the short code redirect, and a
//! small JSON API on top of any [`Shortener`](shorty_core::Shortener).

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use error::{AppError, PageError};
pub use state::AppState;
