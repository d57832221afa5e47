//! Versioned, checksummed identifier strings.
//!
//! An identifier is `base32(version_byte || payload || crc16)` where the
//! payload is a 32-byte ed25519 public key (or seed) and the checksum is
//! CRC16-XModem over `version_byte || payload`, stored little-endian.
//! A 35-byte input always encodes to 56 base32 characters.

use crate::base32::{self, Base32Error};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Size of the key material carried by every identifier.
pub const PAYLOAD_SIZE: usize = 32;

/// Decoded size: version byte + payload + 2-byte checksum.
pub const DECODED_LENGTH: usize = 1 + PAYLOAD_SIZE + 2;

/// Encoded length in base32 characters.
pub const ENCODED_LENGTH: usize = 56;

/// Leading version byte; determines the first base32 character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum VersionByte {
    /// 'B...' balance identifiers.
    BalanceId = 1 << 3,
    /// 'G...' account identifiers.
    AccountId = 6 << 3,
    /// 'S...' private seeds.
    Seed = 18 << 3,
}

impl VersionByte {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b if b == Self::BalanceId as u8 => Some(Self::BalanceId),
            b if b == Self::AccountId as u8 => Some(Self::AccountId),
            b if b == Self::Seed as u8 => Some(Self::Seed),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StrKeyError {
    #[error("identifier must be a non-empty string")]
    Empty,

    #[error("invalid identifier length ({0}), expected {expected}", expected = ENCODED_LENGTH)]
    InvalidLength(usize),

    #[error("base32 decode error: {0}")]
    Base32(#[from] Base32Error),

    #[error("unknown version byte 0x{0:02x}")]
    UnknownVersion(u8),

    #[error("version mismatch: expected {expected:?}, got {actual:?}")]
    VersionMismatch {
        expected: VersionByte,
        actual: VersionByte,
    },

    #[error("checksum mismatch")]
    ChecksumMismatch,
}

/// CRC16-XModem (polynomial 0x1021, initial value 0).
pub fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}

/// Encode a payload under the given version byte.
pub fn encode_check(version: VersionByte, payload: &[u8; PAYLOAD_SIZE]) -> String {
    let mut raw = Vec::with_capacity(DECODED_LENGTH);
    raw.push(version as u8);
    raw.extend_from_slice(payload);
    let checksum = crc16_xmodem(&raw);
    raw.extend_from_slice(&checksum.to_le_bytes());
    base32::encode(&raw)
}

/// Decode an identifier, verifying its length, version byte and checksum.
pub fn decode_check(
    expected: VersionByte,
    encoded: &str,
) -> Result<[u8; PAYLOAD_SIZE], StrKeyError> {
    if encoded.is_empty() {
        return Err(StrKeyError::Empty);
    }
    if encoded.len() != ENCODED_LENGTH {
        return Err(StrKeyError::InvalidLength(encoded.len()));
    }

    let raw = base32::decode(encoded)?;
    if raw.len() != DECODED_LENGTH {
        return Err(StrKeyError::InvalidLength(encoded.len()));
    }

    let version = VersionByte::from_byte(raw[0]).ok_or(StrKeyError::UnknownVersion(raw[0]))?;
    if version != expected {
        return Err(StrKeyError::VersionMismatch {
            expected,
            actual: version,
        });
    }

    let (body, checksum) = raw.split_at(DECODED_LENGTH - 2);
    let expected_crc = crc16_xmodem(body);
    if checksum != &expected_crc.to_le_bytes()[..] {
        return Err(StrKeyError::ChecksumMismatch);
    }

    let mut payload = [0u8; PAYLOAD_SIZE];
    payload.copy_from_slice(&body[1..]);
    Ok(payload)
}

macro_rules! strkey_type {
    ($(#[$meta:meta])* $name:ident, $version:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name([u8; PAYLOAD_SIZE]);

        impl $name {
            pub const VERSION: VersionByte = $version;

            pub fn from_bytes(bytes: [u8; PAYLOAD_SIZE]) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; PAYLOAD_SIZE] {
                &self.0
            }

            pub fn to_strkey(&self) -> String {
                encode_check(Self::VERSION, &self.0)
            }
        }

        impl FromStr for $name {
            type Err = StrKeyError;

            fn from_str(s: &str) -> Result<Self, StrKeyError> {
                decode_check(Self::VERSION, s).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_strkey())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_strkey())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_strkey())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

strkey_type!(
    /// Account identifier ('G...'), the ed25519 public key of an account.
    AccountId,
    VersionByte::AccountId
);

strkey_type!(
    /// Balance identifier ('B...'), one asset balance owned by an account.
    BalanceId,
    VersionByte::BalanceId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc16_xmodem_check_value() {
        // Standard check input for CRC catalogues.
        assert_eq!(crc16_xmodem(b"123456789"), 0x31C3);
        assert_eq!(crc16_xmodem(b""), 0);
    }

    #[test]
    fn test_prefix_characters() {
        let key = [7u8; PAYLOAD_SIZE];
        assert!(encode_check(VersionByte::AccountId, &key).starts_with('G'));
        assert!(encode_check(VersionByte::BalanceId, &key).starts_with('B'));
        assert!(encode_check(VersionByte::Seed, &key).starts_with('S'));
    }

    #[test]
    fn test_encoded_length() {
        let encoded = encode_check(VersionByte::AccountId, &[0xAB; PAYLOAD_SIZE]);
        assert_eq!(encoded.len(), ENCODED_LENGTH);
    }

    #[test]
    fn test_decode_account_id() {
        let key = [0x42u8; PAYLOAD_SIZE];
        let encoded = encode_check(VersionByte::AccountId, &key);
        let id: AccountId = encoded.parse().unwrap();
        assert_eq!(id.as_bytes(), &key);
        assert_eq!(id.to_string(), encoded);
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!("".parse::<BalanceId>(), Err(StrKeyError::Empty));
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert_eq!(
            "GABC".parse::<AccountId>(),
            Err(StrKeyError::InvalidLength(4))
        );
    }

    #[test]
    fn test_version_mismatch() {
        let encoded = encode_check(VersionByte::AccountId, &[1u8; PAYLOAD_SIZE]);
        assert_eq!(
            encoded.parse::<BalanceId>(),
            Err(StrKeyError::VersionMismatch {
                expected: VersionByte::BalanceId,
                actual: VersionByte::AccountId,
            })
        );
    }

    #[test]
    fn test_checksum_mismatch() {
        let encoded = encode_check(VersionByte::BalanceId, &[9u8; PAYLOAD_SIZE]);
        // Flip a payload character; length and version stay valid.
        let mut chars: Vec<char> = encoded.chars().collect();
        chars[10] = if chars[10] == 'A' { 'B' } else { 'A' };
        let corrupted: String = chars.into_iter().collect();
        assert_eq!(
            corrupted.parse::<BalanceId>(),
            Err(StrKeyError::ChecksumMismatch)
        );
    }

    #[test]
    fn test_lowercase_rejected() {
        let encoded = encode_check(VersionByte::AccountId, &[3u8; PAYLOAD_SIZE]).to_lowercase();
        assert!(matches!(
            encoded.parse::<AccountId>(),
            Err(StrKeyError::Base32(Base32Error::InvalidCharacter(_, 0)))
        ));
    }

    #[test]
    fn test_serde_as_string() {
        let id = BalanceId::from_bytes([5u8; PAYLOAD_SIZE]);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.to_strkey()));
        let back: BalanceId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
