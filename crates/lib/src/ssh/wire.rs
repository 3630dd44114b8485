//! OpenSSH public-key wire format parsing.
//!
//! The wire format is a sequence of fields, each a 32-bit big-endian length
//! prefix followed by that many raw bytes. The first field is the declared
//! key-type name; for RSA keys it is followed by the public exponent and the
//! modulus. Parsing here is strictly for validation: it checks structure and
//! key-strength policy, nothing more.

use base64::{
    Engine as _, alphabet,
    engine::{
        DecodePaddingMode,
        general_purpose::{GeneralPurpose, GeneralPurposeConfig},
    },
};
use subtle::ConstantTimeEq;
use thiserror::Error as ThisError;

/// Upper bound on the declared type-name length. 50 bytes comfortably covers
/// every known OpenSSH type-name string; anything larger is a bogus claim.
const MAX_TYPE_NAME_LEN: usize = 50;

/// Key type that carries RSA-specific trailing fields.
const RSA_KEY_TYPE: &str = "ssh-rsa";

/// The only accepted RSA public exponent (F4).
const RSA_PUBLIC_EXPONENT: u32 = 65537;

/// Minimum RSA modulus size in bytes (2048 bits).
const RSA_MIN_MODULUS_BYTES: usize = 256;

/// Strict about the alphabet, lenient about padding: accepts both padded and
/// unpadded input and ignores nonzero trailing bits, matching how OpenSSH
/// key material is found in the wild. Canonical re-encoding is a non-goal.
const WIRE_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Errors that can occur while parsing the wire encoding of an SSH key.
#[non_exhaustive]
#[derive(Debug, ThisError)]
pub enum WireError {
    /// The key data contains characters outside the base64 alphabet, or more
    /// than two trailing pad characters.
    #[error("key data is not valid base64")]
    MalformedBase64,

    /// The base64 decoder rejected the input.
    #[error("base64 decoding of key data failed")]
    Base64DecodeFailed,

    /// A length prefix claimed more bytes than remain, the input ended
    /// mid-field, or the declared type-name length was unreasonable.
    #[error("truncated wire data while reading {context}")]
    TruncatedInput {
        /// The field being read when the input ran out
        context: &'static str,
    },

    /// The declared type name inside the wire data does not match the key
    /// type announced in front of it.
    #[error("declared type does not match announced key type")]
    TypeMismatch,

    /// The RSA exponent length is outside the 1..=4 byte range.
    #[error("RSA exponent length {len} is out of range (1-4 bytes)")]
    InvalidExponentLength {
        /// The claimed exponent length in bytes
        len: usize,
    },

    /// The RSA public exponent is not 65537. Every other exponent, including
    /// the historically common 3, is rejected.
    #[error("weak RSA public exponent {exponent}: only e=65537 is allowed")]
    WeakExponent {
        /// The exponent that was found
        exponent: u32,
    },

    /// The RSA modulus is below the 2048-bit minimum.
    #[error("RSA modulus of {len} bytes is below the 2048-bit minimum")]
    WeakModulus {
        /// The claimed modulus length in bytes
        len: usize,
    },
}

impl WireError {
    /// Check if this error reflects key-strength policy rather than a
    /// structural defect.
    pub fn is_policy(&self) -> bool {
        matches!(
            self,
            WireError::WeakExponent { .. } | WireError::WeakModulus { .. }
        )
    }
}

/// RSA-specific fields extracted from the wire data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsaComponents {
    /// The public exponent (always 65537 on success)
    pub exponent: u32,
    /// The modulus length in bytes
    pub modulus_len: usize,
}

/// A successfully parsed (and policy-checked) key structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKey {
    /// The type name declared inside the wire data
    pub declared_type: String,
    /// RSA fields, present only for `ssh-rsa` keys
    pub rsa: Option<RsaComponents>,
}

/// Parse and policy-check the base64-wrapped wire encoding of an SSH public
/// key against the announced `key_type`.
///
/// Trailing bytes after the checked fields are ignored; one-key-per-line
/// framing is the caller's concern.
pub fn parse(key_type: &str, base64_body: &str) -> Result<ParsedKey, WireError> {
    if !has_base64_shape(base64_body) {
        return Err(WireError::MalformedBase64);
    }
    let decoded = WIRE_BASE64
        .decode(base64_body)
        .map_err(|_| WireError::Base64DecodeFailed)?;

    let type_len = read_u32(&decoded, 0, "type name length")? as usize;
    if type_len > MAX_TYPE_NAME_LEN || decoded.len() < 4 + type_len {
        return Err(WireError::TruncatedInput {
            context: "declared type name",
        });
    }
    let declared = &decoded[4..4 + type_len];
    let declared_type = String::from_utf8_lossy(declared).into_owned();

    if key_type == RSA_KEY_TYPE {
        let rsa = parse_rsa(&decoded, 4 + type_len)?;
        return Ok(ParsedKey {
            declared_type,
            rsa: Some(rsa),
        });
    }

    if bool::from(declared.ct_eq(key_type.as_bytes())) {
        Ok(ParsedKey {
            declared_type,
            rsa: None,
        })
    } else {
        Err(WireError::TypeMismatch)
    }
}

/// Parse the RSA exponent and modulus fields starting at `offset` and apply
/// the strength policy.
fn parse_rsa(decoded: &[u8], offset: usize) -> Result<RsaComponents, WireError> {
    let exponent_len = read_u32(decoded, offset, "exponent length")? as usize;
    let offset = offset + 4;
    if !(1..=4).contains(&exponent_len) {
        return Err(WireError::InvalidExponentLength { len: exponent_len });
    }
    let exponent_bytes =
        decoded
            .get(offset..offset + exponent_len)
            .ok_or(WireError::TruncatedInput {
                context: "public exponent",
            })?;
    let exponent = exponent_bytes
        .iter()
        .fold(0u32, |acc, &b| (acc << 8) | u32::from(b));
    if exponent != RSA_PUBLIC_EXPONENT {
        return Err(WireError::WeakExponent { exponent });
    }

    let offset = offset + exponent_len;
    let modulus_len = read_u32(decoded, offset, "modulus length")? as usize;
    if modulus_len < RSA_MIN_MODULUS_BYTES {
        return Err(WireError::WeakModulus { len: modulus_len });
    }
    Ok(RsaComponents {
        exponent,
        modulus_len,
    })
}

/// Read a 32-bit big-endian length prefix at `offset`.
fn read_u32(bytes: &[u8], offset: usize, context: &'static str) -> Result<u32, WireError> {
    let chunk: [u8; 4] = bytes
        .get(offset..offset.saturating_add(4))
        .and_then(|slice| slice.try_into().ok())
        .ok_or(WireError::TruncatedInput { context })?;
    Ok(u32::from_be_bytes(chunk))
}

/// Pre-check the base64 alphabet: `[A-Za-z0-9+/]` with at most two trailing
/// pad characters. Run before decoding so charset violations are reported
/// distinctly from decoder rejections.
fn has_base64_shape(data: &str) -> bool {
    let stripped = data.trim_end_matches('=');
    if data.len() - stripped.len() > 2 {
        return false;
    }
    stripped
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/')
}
