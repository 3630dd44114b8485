//! Bech32 decoding and checksum verification.
//!
//! Implements just enough of BIP-173 to validate bech32-encoded key material:
//! separator location, charset mapping, and polymod checksum verification.
//! Re-encoding is deliberately out of scope.

use thiserror::Error as ThisError;

/// The 32-symbol bech32 charset. A symbol's value is its index.
const CHARSET: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Generator polynomials for the polymod checksum.
const GENERATOR: [u32; 5] = [0x3b6a57b2, 0x26508e6d, 0x1ea119fa, 0x3d4233dd, 0x2a1462b3];

/// Number of checksum symbols at the end of the data part.
const CHECKSUM_LEN: usize = 6;

/// Errors that can occur while decoding a bech32 string.
#[non_exhaustive]
#[derive(Debug, ThisError)]
pub enum DecodeError {
    /// The separator `1` is missing, leaves an empty human-readable part,
    /// or leaves too few symbols for a checksum plus any data.
    #[error("bech32 separator '1' is missing or misplaced")]
    SeparatorNotFound,

    /// A data character is not in the bech32 charset (lowercase only).
    #[error("invalid bech32 character at position {position}")]
    InvalidCharacter {
        /// Zero-based position within the data part
        position: usize,
    },

    /// The polymod checksum over HRP and data did not verify.
    #[error("invalid bech32 checksum")]
    InvalidChecksum,
}

impl DecodeError {
    /// Check if this error indicates a checksum failure rather than a
    /// structural one.
    pub fn is_checksum(&self) -> bool {
        matches!(self, DecodeError::InvalidChecksum)
    }
}

/// A successfully decoded bech32 string.
///
/// `data` holds one 5-bit group per byte, with the 6 trailing checksum
/// symbols already stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// The human-readable part (everything before the last separator)
    pub hrp: String,
    /// The 5-bit data groups, checksum removed
    pub data: Vec<u8>,
}

/// Decode a bech32 string and verify its checksum.
///
/// Splits on the *last* occurrence of `1`, maps the data part through the
/// bech32 charset (case-sensitive, lowercase only), and verifies the polymod
/// checksum over the expanded HRP and data values.
pub fn decode(input: &str) -> Result<Decoded, DecodeError> {
    let pos = input.rfind('1').ok_or(DecodeError::SeparatorNotFound)?;
    // The HRP must be non-empty and at least one data symbol must precede
    // the 6-symbol checksum.
    if pos < 1 || pos + 1 + CHECKSUM_LEN >= input.len() {
        return Err(DecodeError::SeparatorNotFound);
    }

    let hrp = &input[..pos];
    let data_part = &input[pos + 1..];

    let mut values = Vec::with_capacity(data_part.len());
    for (position, ch) in data_part.chars().enumerate() {
        let value = CHARSET
            .find(ch)
            .ok_or(DecodeError::InvalidCharacter { position })?;
        values.push(value as u8);
    }

    if !verify_checksum(hrp, &values) {
        return Err(DecodeError::InvalidChecksum);
    }

    values.truncate(values.len() - CHECKSUM_LEN);
    Ok(Decoded {
        hrp: hrp.to_string(),
        data: values,
    })
}

/// Verify the checksum: polymod over the expanded HRP followed by the data
/// values must come out to exactly 1.
fn verify_checksum(hrp: &str, data: &[u8]) -> bool {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(data);
    polymod(&values) == 1
}

/// Expand the HRP for checksum computation: the high 5 bits of each
/// character, a zero separator, then the low 5 bits of each character.
fn hrp_expand(hrp: &str) -> Vec<u8> {
    let bytes = hrp.as_bytes();
    let mut result = Vec::with_capacity(bytes.len() * 2 + 1);
    result.extend(bytes.iter().map(|b| b >> 5));
    result.push(0);
    result.extend(bytes.iter().map(|b| b & 31));
    result
}

/// The BIP-173 polymod: a 25-bit rolling state over 5-bit groups, reduced by
/// five fixed generator polynomials. No intermediate value needs more than
/// 30 bits, so `u32` arithmetic never overflows.
fn polymod(values: &[u8]) -> u32 {
    let mut chk: u32 = 1;
    for &value in values {
        let b = (chk >> 25) & 0xff;
        chk = ((chk & 0x1ff_ffff) << 5) ^ u32::from(value);
        for (i, generator) in GENERATOR.iter().enumerate() {
            if (b >> i) & 1 == 1 {
                chk ^= generator;
            }
        }
    }
    chk
}
