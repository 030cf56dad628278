use crate::error::Error;
use crate::Generator;
use rand::distr::{Alphanumeric, SampleString};
use shorty_core::shortcode::MAX_LENGTH;
use shorty_core::ShortCode;
use typed_builder::TypedBuilder;

pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Configures a [`RandomGenerator`].
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct RandomGeneratorSettings {
    /// Number of characters in every generated code.
    #[builder(default = DEFAULT_CODE_LENGTH)]
    pub length: usize,
}

impl Default for RandomGeneratorSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Generates fixed-length codes from `[A-Za-z0-9]`.
///
/// Every character is sampled independently and uniformly, with replacement,
/// from the 62-symbol alphabet. Uniqueness is only probabilistic: at the
/// default length there are 62^6 (about 5.6e10) possible codes.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    length: usize,
}

impl RandomGenerator {
    pub fn new(settings: RandomGeneratorSettings) -> Result<Self, Error> {
        if settings.length == 0 || settings.length > MAX_LENGTH {
            return Err(Error::InvalidLength {
                length: settings.length,
                max_length: MAX_LENGTH,
            });
        }

        Ok(Self {
            length: settings.length,
        })
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self {
            length: DEFAULT_CODE_LENGTH,
        }
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        let code = Alphanumeric.sample_string(&mut rand::rng(), self.length);
        ShortCode::new_unchecked(code)
    }
}
