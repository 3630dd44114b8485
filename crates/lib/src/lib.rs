//!
//! Auxdata: validation of serialized public-key material ("auxiliary data")
//! before an identity directory accepts and stores it.
//!
//! ## Core Concepts
//!
//! * **Validators (`validator::AuxDataType`)**: One validator per key format.
//!   Built-ins cover age recipient keys (`age::AgeV1`) and OpenSSH public
//!   keys (`ssh::SshV2`); callers can supply their own.
//! * **Registry (`registry::Registry`)**: Resolves a canonical type
//!   identifier (`age-v1`, `ssh-v2`) or a short alias (`age`, `ssh`) to its
//!   validator, and enforces a caller-supplied allow-list of canonical
//!   identifiers.
//! * **Codecs (`bech32`, `ssh::wire`)**: The decoding and structure checks
//!   the validators delegate to. Decode-and-verify only, no re-encoding.
//!
//! Validation failures are ordinary values: a validator returns
//! `Err(Rejection)` carrying the human-readable reason, never a panic, since
//! every input is untrusted. Registry failures are `RegistryError` values
//! because they represent caller or configuration mistakes.

pub mod age;
pub mod bech32;
pub mod registry;
pub mod ssh;
pub mod validator;

pub use age::AgeV1;
pub use registry::{Registry, RegistryBuilder, RegistryError};
pub use ssh::SshV2;
pub use validator::{AuxDataType, Rejection};

/// Result type used throughout the Auxdata library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Auxdata library.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured bech32 decoding errors
    #[error(transparent)]
    Bech32(#[from] bech32::DecodeError),

    /// Structured age key validation errors
    #[error(transparent)]
    Age(#[from] age::AgeError),

    /// Structured SSH key validation errors
    #[error(transparent)]
    Ssh(#[from] ssh::SshError),

    /// Structured SSH wire parsing errors
    #[error(transparent)]
    Wire(#[from] ssh::wire::WireError),

    /// Structured registry errors
    #[error(transparent)]
    Registry(#[from] registry::RegistryError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Bech32(_) => "bech32",
            Error::Age(_) => "age",
            Error::Ssh(_) => "ssh",
            Error::Wire(_) => "ssh::wire",
            Error::Registry(_) => "registry",
        }
    }

    /// Check if this error is a validation outcome (untrusted input was
    /// malformed or failed policy) rather than a caller mistake.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Error::Registry(_))
    }

    /// Check if this error is a registry configuration or lookup failure.
    pub fn is_registry(&self) -> bool {
        matches!(self, Error::Registry(_))
    }
}
