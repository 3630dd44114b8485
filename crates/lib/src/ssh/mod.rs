//! Validation of OpenSSH public keys (`ssh-v2`).
//!
//! An acceptable key line is exactly two whitespace-separated fields: the
//! key type and the base64-wrapped wire data. Comments are rejected, not
//! ignored. The line-level checks live here; the binary structure and
//! key-strength policy live in [`wire`].

use std::any::Any;

use thiserror::Error as ThisError;
use tracing::debug;

use crate::validator::{AuxDataType, Rejection};

pub mod wire;

/// Canonical type identifier for OpenSSH public keys.
pub const AUX_DATA_TYPE: &str = "ssh-v2";

/// The accepted key types. DSA (`ssh-dss`) is deliberately and permanently
/// excluded, as is anything unrecognized.
const VALID_KEY_TYPES: [&str; 5] = [
    "ssh-rsa",
    "ssh-ed25519",
    "ecdsa-sha2-nistp256",
    "ecdsa-sha2-nistp384",
    "ecdsa-sha2-nistp521",
];

/// Reasons an SSH public key can be rejected.
#[non_exhaustive]
#[derive(Debug, ThisError)]
pub enum SshError {
    /// The input was empty after trimming outer whitespace.
    #[error("empty aux data provided")]
    Empty,

    /// The line did not split into exactly a key type and key data. A third
    /// field (comment) counts as a failure.
    #[error("ssh keys must have exactly 2 parts (no comment), got {count}")]
    WrongPartCount {
        /// How many whitespace-separated parts were found (capped at 3)
        count: usize,
    },

    /// The key type is not in the accepted set (DSA is not allowed).
    #[error("disallowed ssh key type '{key_type}' (DSA is not allowed)")]
    DisallowedKeyType {
        /// The key type that was offered
        key_type: String,
    },

    /// The wire data failed structural or policy checks.
    #[error(transparent)]
    Wire(#[from] wire::WireError),
}

impl SshError {
    /// Check if this error reflects key-strength or key-type policy rather
    /// than malformed input.
    pub fn is_policy(&self) -> bool {
        match self {
            SshError::DisallowedKeyType { .. } => true,
            SshError::Wire(err) => err.is_policy(),
            _ => false,
        }
    }
}

/// Validator for OpenSSH public keys.
#[derive(Debug, Default, Clone, Copy)]
pub struct SshV2;

impl SshV2 {
    /// Create a new SSH key validator.
    pub fn new() -> Self {
        Self
    }

    /// Validate an SSH public key line, short-circuiting on the first
    /// failure.
    pub fn validate(&self, aux_data: &str) -> Result<(), SshError> {
        let aux_data = aux_data.trim();
        if aux_data.is_empty() {
            return Err(SshError::Empty);
        }

        // Split on runs of whitespace; only the first three parts matter
        // for the count.
        let mut parts = aux_data.split_whitespace();
        let key_type = parts.next().unwrap_or_default();
        let Some(key_data) = parts.next() else {
            return Err(SshError::WrongPartCount { count: 1 });
        };
        if parts.next().is_some() {
            return Err(SshError::WrongPartCount { count: 3 });
        }

        if !VALID_KEY_TYPES.contains(&key_type) {
            return Err(SshError::DisallowedKeyType {
                key_type: key_type.to_string(),
            });
        }

        wire::parse(key_type, key_data)?;
        Ok(())
    }
}

impl AuxDataType for SshV2 {
    fn aux_data_type(&self) -> &str {
        AUX_DATA_TYPE
    }

    fn validate(&self, aux_data: &str) -> Result<(), Rejection> {
        SshV2::validate(self, aux_data).map_err(|err| {
            debug!("ssh public key rejected: {err}");
            Rejection::from(err)
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
