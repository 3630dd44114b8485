//! The polymorphic validator capability.
//!
//! Every auxiliary-data type (built-in or externally supplied) implements
//! [`AuxDataType`]. A validation call returns a composite result rather than
//! setting per-instance state, so validator instances are freely shareable
//! across threads.

use std::any::Any;

use thiserror::Error as ThisError;

use crate::{age::AgeError, ssh::SshError};

/// Why a piece of auxiliary data was rejected.
///
/// Carries the human-readable reason alongside the failed result, replacing
/// the "ask the validator afterwards" accessor shape that would otherwise
/// require a mutable per-instance slot.
#[derive(Debug, Clone, ThisError)]
#[error("{reason}")]
pub struct Rejection {
    reason: String,
}

impl Rejection {
    /// Create a rejection with the given human-readable reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// The human-readable explanation of the failure.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl From<AgeError> for Rejection {
    fn from(err: AgeError) -> Self {
        Self::new(err.to_string())
    }
}

impl From<SshError> for Rejection {
    fn from(err: SshError) -> Self {
        Self::new(err.to_string())
    }
}

/// A validator for one auxiliary-data type.
///
/// Implementations are stateless with respect to validation calls; `validate`
/// takes `&self` and returns everything the caller needs in one result.
pub trait AuxDataType: std::fmt::Debug + Send + Sync {
    /// The canonical type identifier this validator is registered under
    /// (e.g. `age-v1`). Stable, part of the contract.
    fn aux_data_type(&self) -> &str;

    /// Validate a raw auxiliary-data string.
    ///
    /// Malformed input is an ordinary `Err(Rejection)`, never a panic; the
    /// input is untrusted and expected to sometimes be garbage.
    fn validate(&self, aux_data: &str) -> Result<(), Rejection>;

    /// Boolean convenience wrapper around [`validate`](Self::validate).
    fn is_valid(&self, aux_data: &str) -> bool {
        self.validate(aux_data).is_ok()
    }

    /// Access as [`Any`], used by the registry to distinguish concrete
    /// implementations on re-registration.
    fn as_any(&self) -> &dyn Any;
}
