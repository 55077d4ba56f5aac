//! Power leakage modeling for a byte-oriented substitution layer.

pub mod aes;

use crate::error::Error;

/// Hamming weight of a byte, the predicted leakage magnitude of an 8-bit
/// intermediate value.
pub fn hw(value: u8) -> u8 {
    value.count_ones() as u8
}

/// Substitution table of the target cipher.
///
/// Constructing one through [`Sbox::new`] guarantees exactly 256 entries, so
/// lookups can never go out of bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sbox([u8; 256]);

impl Sbox {
    /// Builds a table from a slice.
    ///
    /// Returns [`Error::InvalidInput`] unless `entries` holds exactly 256
    /// bytes.
    pub fn new(entries: &[u8]) -> Result<Self, Error> {
        let entries: [u8; 256] = entries
            .try_into()
            .map_err(|_| Error::InvalidInput {
                what: "substitution table entries",
                expected: 256,
                got: entries.len(),
            })?;

        Ok(Self(entries))
    }

    /// Substitutes one byte.
    pub fn lookup(&self, value: u8) -> u8 {
        self.0[usize::from(value)]
    }
}

impl From<[u8; 256]> for Sbox {
    fn from(entries: [u8; 256]) -> Self {
        Self(entries)
    }
}

/// First-round intermediate value under a key byte hypothesis:
/// `sbox[plaintext_byte ^ guess]`.
pub fn intermediate(plaintext_byte: u8, guess: u8, sbox: &Sbox) -> u8 {
    sbox.lookup(plaintext_byte ^ guess)
}
