//! Validation of age recipient keys (`age-v1`).
//!
//! An age recipient key is a bech32 string with the fixed HRP `age`, 62
//! characters in total. This validator checks *form* only: prefix, length,
//! whitespace, and the bech32 checksum. It does not verify that the payload
//! is a genuine Curve25519 point.

use std::any::Any;

use thiserror::Error as ThisError;
use tracing::debug;

use crate::{
    bech32,
    validator::{AuxDataType, Rejection},
};

/// Canonical type identifier for age recipient keys.
pub const AUX_DATA_TYPE: &str = "age-v1";

/// Literal prefix every age recipient key starts with (HRP plus separator).
const KEY_PREFIX: &str = "age1";

/// Exact length of an age recipient key: the 4-character prefix plus 58 data
/// characters including the checksum.
const KEY_LENGTH: usize = 62;

/// Reasons an age recipient key can be rejected.
#[non_exhaustive]
#[derive(Debug, ThisError)]
pub enum AgeError {
    /// The input was empty after trimming outer whitespace.
    #[error("empty aux data provided")]
    Empty,

    /// Whitespace remained inside the key after trimming.
    #[error("age public keys cannot contain whitespace")]
    EmbeddedWhitespace,

    /// The key does not start with `age1`.
    #[error("incorrect header: age recipient keys start with 'age1'")]
    BadPrefix,

    /// The key is not exactly 62 characters long.
    #[error("incorrect key length: expected 62 characters, got {len}")]
    BadLength {
        /// The actual length after trimming
        len: usize,
    },

    /// Bech32 decoding or checksum verification failed.
    #[error(transparent)]
    Decode(#[from] bech32::DecodeError),
}

/// Validator for age recipient keys.
#[derive(Debug, Default, Clone, Copy)]
pub struct AgeV1;

impl AgeV1 {
    /// Create a new age key validator.
    pub fn new() -> Self {
        Self
    }

    /// Validate an age recipient key, short-circuiting on the first failure.
    pub fn validate(&self, aux_data: &str) -> Result<(), AgeError> {
        let aux_data = aux_data.trim();

        if aux_data.is_empty() {
            return Err(AgeError::Empty);
        }
        if aux_data.chars().any(char::is_whitespace) {
            return Err(AgeError::EmbeddedWhitespace);
        }
        if !aux_data.starts_with(KEY_PREFIX) {
            return Err(AgeError::BadPrefix);
        }
        if aux_data.len() != KEY_LENGTH {
            return Err(AgeError::BadLength {
                len: aux_data.len(),
            });
        }

        // The decoded payload is not interpreted further; the checksum is
        // the only integrity check applied here.
        bech32::decode(aux_data)?;
        Ok(())
    }
}

impl AuxDataType for AgeV1 {
    fn aux_data_type(&self) -> &str {
        AUX_DATA_TYPE
    }

    fn validate(&self, aux_data: &str) -> Result<(), Rejection> {
        AgeV1::validate(self, aux_data).map_err(|err| {
            debug!("age recipient key rejected: {err}");
            Rejection::from(err)
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
