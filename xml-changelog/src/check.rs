//! Gate for characters that downstream XML parsers choke on

use crate::errors::InvalidCharacter;

/// Whether a code point may appear in serialized text or attribute values.
pub fn is_allowed(c: char) -> bool {
	matches!(
		u32::from(c),
		0x9 | 0xA | 0xB | 0xC | 0xD
			| 0x20..=0x7E
			| 0xA0..=0xD7FF
			| 0xE000..=0xFFFD
			| 0x10000..=0x10FFFF
	)
}

/// Check that `text` only contains allowed characters.
///
/// Returns the text unchanged, or the first offending code point.
pub fn check_string(text: &str) -> Result<&str, InvalidCharacter> {
	match text.chars().find(|&c| !is_allowed(c)) {
		None => Ok(text),
		Some(c) => Err(InvalidCharacter { code_point: c.into() }),
	}
}
