//! Base32 decoding of shared secrets, per [rfc-4648](https://www.rfc-editor.org/rfc/rfc4648#section-6).
//!
//! Two policies are available:
//!
//! - [`decode`] is lenient: input is upper-cased and every character outside the
//!   32-symbol alphabet (spaces, dashes, `=` padding, ...) is skipped. It never fails,
//!   an all-invalid input simply yields no bytes.
//! - [`decode_strict`] only accepts alphabet characters, optionally followed by `=` padding.
//!
//! ```rust
//! use totp_engine::codec;
//!
//! assert_eq!(codec::decode("JBSWY3DPEHPK3PXP"), codec::decode("jbsw y3dp ehpk 3pxp"));
//! assert!(codec::decode_strict("jbsw y3dp ehpk 3pxp").is_err());
//! ```

use crate::SecretParseError;

/// The rfc-4648 base32 alphabet, without padding.
pub const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Value of an already upper-cased symbol, or `None` if it is not part of the alphabet.
fn symbol_value(c: char) -> Option<u8> {
    match c {
        'A'..='Z' => Some(c as u8 - b'A'),
        '2'..='7' => Some(c as u8 - b'2' + 26),
        _ => None,
    }
}

/// Packs 5-bit symbols MSB-first, emitting a byte each time 8 bits are buffered.
/// Trailing bits that don't complete a byte are dropped.
#[derive(Default)]
struct BitPacker {
    buffer: u32,
    bits: u32,
    output: Vec<u8>,
}

impl BitPacker {
    fn push(&mut self, value: u8) {
        self.buffer = (self.buffer << 5) | u32::from(value);
        self.bits += 5;
        if self.bits >= 8 {
            self.bits -= 8;
            self.output.push((self.buffer >> self.bits) as u8);
            self.buffer &= (1 << self.bits) - 1;
        }
    }
}

/// Lenient decoding. Case-insensitive, skips anything that isn't a base32 symbol.
pub fn decode(input: &str) -> Vec<u8> {
    let mut packer = BitPacker::default();
    let mut skipped = 0usize;

    for c in input.chars().map(|c| c.to_ascii_uppercase()) {
        match symbol_value(c) {
            Some(value) => packer.push(value),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, "ignored non-base32 characters in secret");
    }
    packer.output
}

/// Strict decoding. Case-insensitive, but rejects any character outside the alphabet,
/// `=` anywhere but at the end, and inputs carrying no symbol at all.
pub fn decode_strict(input: &str) -> Result<Vec<u8>, SecretParseError> {
    let mut packer = BitPacker::default();
    let mut padding_at: Option<usize> = None;
    let mut symbols = 0usize;

    for (index, c) in input.chars().map(|c| c.to_ascii_uppercase()).enumerate() {
        if c == '=' {
            if padding_at.is_none() {
                padding_at = Some(index);
            }
            continue;
        }
        if let Some(start) = padding_at {
            return Err(SecretParseError::MisplacedPadding { index: start });
        }
        let value = symbol_value(c).ok_or(SecretParseError::InvalidCharacter {
            index,
            character: c,
        })?;
        packer.push(value);
        symbols += 1;
    }

    if symbols == 0 {
        return Err(SecretParseError::Empty);
    }
    Ok(packer.output)
}
