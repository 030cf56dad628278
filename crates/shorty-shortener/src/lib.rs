//! URL shortener service implementation.
//!
//! [`ShortenerService`] ties a [`Generator`](shorty_generator::Generator) to a
//! [`Repository`](shorty_core::Repository). Core types are re-exported from
//! `shorty_core`.

pub mod service;

pub use service::ShortenerService;
pub use shorty_core::{Page, PageRequest, ShortCode, Shortener, ShortenerError, UrlMapping};
