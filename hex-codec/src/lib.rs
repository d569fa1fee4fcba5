//! Space-separated, lowercase hexadecimal text for byte frames.
//!
//! `31 42 63 a4` is the text form of `[0x31, 0x42, 0x63, 0xa4]`.
//! Only `0-9` and `a-f` are digits; everything else in the text
//! (separators, uppercase, line endings) is skipped on the way in.

#![no_std]

pub mod error {
    /// The destination ran out of room.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct EndOfInput;
}

const DIGITS: &[u8; 16] = b"0123456789abcdef";
const SEPARATOR: u8 = b' ';

/// Get the length of the text form of `nbytes` bytes.
///
/// Two digits per byte plus the separators between them.
#[inline]
pub const fn encoded_len(nbytes: usize) -> usize {
    (nbytes * 3).saturating_sub(1)
}

/// Render bytes as hex text to a destination via an iterator.
///
/// Each byte becomes two lowercase digits, bytes are separated by a single
/// space and no separator follows the last byte. Returns the number of text
/// bytes written, which is [`encoded_len`] of the input. Empty input writes
/// nothing.
pub fn bytes_to_hex<'a>(
    bytes: &[u8],
    dst: impl IntoIterator<Item = &'a mut u8>,
) -> Result<usize, error::EndOfInput> {
    let mut dst = dst.into_iter();
    let mut written = 0;

    for (i, byte) in bytes.iter().enumerate() {
        if i != 0 {
            *dst.next().ok_or(error::EndOfInput)? = SEPARATOR;
            written += 1;
        }

        for digit in [DIGITS[usize::from(byte >> 4)], DIGITS[usize::from(byte & 0xf)]] {
            *dst.next().ok_or(error::EndOfInput)? = digit;
            written += 1;
        }
    }

    Ok(written)
}

/// Decode hex text to a destination via an iterator.
///
/// Non-digit characters are skipped, digits are paired high nibble first.
/// A dangling digit at the end of the text is dropped. Returns the number
/// of bytes written.
pub fn hex_to_bytes<'a, 'b>(
    hex: impl IntoIterator<Item = &'a u8>,
    dst: impl IntoIterator<Item = &'b mut u8>,
) -> Result<usize, error::EndOfInput> {
    let mut dst = dst.into_iter();
    let mut high = None;
    let mut decoded = 0;

    for &digit in hex.into_iter().filter(|digit| is_hex(**digit)) {
        match high.take() {
            None => high = Some(hex_to_nibble(digit) << 4),
            Some(nibble) => {
                *dst.next().ok_or(error::EndOfInput)? = nibble | hex_to_nibble(digit);
                decoded += 1;
            }
        }
    }

    Ok(decoded)
}

/// Determines whether `digit` is a hex digit.
///
/// Lowercase only: `A-F` are not digits.
#[inline]
pub const fn is_hex(digit: u8) -> bool {
    matches!(digit, b'0'..=b'9' | b'a'..=b'f')
}

/// Get the value of a hex digit.
///
/// # Precondition
///
/// `digit` must satisfy [`is_hex`]. Any other input yields `0`, which is
/// indistinguishable from the digit `'0'`, so validate first.
#[inline]
pub const fn hex_to_nibble(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => 0,
    }
}
