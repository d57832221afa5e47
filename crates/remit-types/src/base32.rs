//! RFC 4648 base32 encoding/decoding (upper-case alphabet, no padding).
//!
//! Identifiers are always a whole number of bytes, so decoding is strict:
//! a dangling character that cannot complete a byte, or non-zero trailing
//! bits, are rejected instead of being silently dropped.

use thiserror::Error;

/// Base32 alphabet (RFC 4648, section 6).
const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Base32Error {
    #[error("invalid character '{0}' at position {1}")]
    InvalidCharacter(char, usize),

    #[error("invalid encoded length {0}")]
    InvalidLength(usize),

    #[error("non-zero trailing bits")]
    NonZeroPadding,
}

/// Build reverse alphabet lookup table at compile time.
const fn build_reverse_alphabet() -> [u8; 128] {
    let mut table = [0xFFu8; 128];
    let mut i = 0;
    while i < 32 {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

static REVERSE_ALPHABET: [u8; 128] = build_reverse_alphabet();

/// Encode binary data to base32 without padding.
pub fn encode(data: &[u8]) -> String {
    let mut result = String::with_capacity((data.len() * 8 + 4) / 5);
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;

    for &byte in data {
        buffer = (buffer << 8) | byte as u32;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            result.push(ALPHABET[((buffer >> bits) & 0x1F) as usize] as char);
        }
        buffer &= (1 << bits) - 1;
    }

    if bits > 0 {
        result.push(ALPHABET[((buffer << (5 - bits)) & 0x1F) as usize] as char);
    }

    result
}

/// Decode an unpadded base32 string to binary data.
pub fn decode(encoded: &str) -> Result<Vec<u8>, Base32Error> {
    let mut result = Vec::with_capacity(encoded.len() * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;

    for (i, ch) in encoded.chars().enumerate() {
        let digit = if ch.is_ascii() {
            REVERSE_ALPHABET[ch as usize]
        } else {
            0xFF
        };
        if digit == 0xFF {
            return Err(Base32Error::InvalidCharacter(ch, i));
        }

        buffer = (buffer << 5) | digit as u32;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            result.push((buffer >> bits) as u8);
            buffer &= (1 << bits) - 1;
        }
    }

    // A full 5-bit group left over means a character that encodes no data.
    if bits >= 5 {
        return Err(Base32Error::InvalidLength(encoded.len()));
    }
    if buffer != 0 {
        return Err(Base32Error::NonZeroPadding);
    }

    Ok(result)
}
