pub mod error;
pub mod random;

pub use error::Error;
pub use random::{RandomGenerator, RandomGeneratorSettings};

use shorty_core::ShortCode;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage,
/// so nothing here can promise that a code is not already taken.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;

    /// Produces a fresh candidate short code.
    fn generate(&self) -> Self::Output;
}
