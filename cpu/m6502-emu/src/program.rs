//! Conversion of hex byte listings into raw program images

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgramParseError {
    #[error("Invalid hex digit '{character}' at position {position}")]
    InvalidDigit { position: usize, character: char },
    #[error("Hex listing has an odd number of digits ({length}); every byte needs two")]
    OddLength { length: usize },
}

/// Parse an assembler-style hex listing such as `"A9 10 69 FF"`, `"a91069ff"`, or
/// `"0xA9, 0x10"` into raw bytes suitable for [`crate::Cpu6502::load_program`].
///
/// Whitespace, commas, and `0x`/`$` byte prefixes are ignored. Digits are paired left to right
/// across the whole listing, so separators are optional.
///
/// # Errors
///
/// Returns an error if the listing contains a character that is not a hex digit or separator,
/// or if the total number of hex digits is odd.
pub fn parse_hex_program(listing: &str) -> Result<Vec<u8>, ProgramParseError> {
    let mut digits = Vec::with_capacity(listing.len());

    let mut chars = listing.char_indices().peekable();
    while let Some((position, character)) = chars.next() {
        match character {
            c if c.is_whitespace() || c == ',' || c == '$' => {}
            '0' if matches!(chars.peek(), Some((_, 'x' | 'X'))) => {
                chars.next();
            }
            c => {
                let digit = c
                    .to_digit(16)
                    .ok_or(ProgramParseError::InvalidDigit { position, character })?;
                digits.push(digit as u8);
            }
        }
    }

    if digits.len() % 2 != 0 {
        return Err(ProgramParseError::OddLength { length: digits.len() });
    }

    Ok(digits.chunks_exact(2).map(|pair| (pair[0] << 4) | pair[1]).collect())
}
