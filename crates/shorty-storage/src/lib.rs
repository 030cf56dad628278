//! Mapping store backends.
//!
//! [`InMemoryRepository`] keeps mappings in process memory and loses them on
//! restart. [`SqliteRepository`] persists them in a SQLite file that several
//! processes may share.

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryRepository;
pub use shorty_core::repository::{ReadRepository, Repository, Result, UrlMapping};
pub use shorty_core::StorageError;
pub use sqlite::SqliteRepository;
