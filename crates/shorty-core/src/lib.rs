//! Core types and traits for the Shorty URL shortener.
//!
//! This crate provides the shared vocabulary used by the storage backends,
//! the shortener service and the HTTP gateway.

pub mod error;
pub mod page;
pub mod repository;
pub mod shortcode;
pub mod shortener;

pub use error::{CoreError, ShortenerError, StorageError};
pub use page::{paginate, Page, PageRequest};
pub use repository::{ReadRepository, Repository, UrlMapping};
pub use shortcode::ShortCode;
pub use shortener::Shortener;
