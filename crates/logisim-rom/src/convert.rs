//! Memory-dump to Logisim ROM listing conversion.
//!
//! Every hex word is zero-padded to 32 bits, its four byte groups are emitted
//! in reverse order, and the line is prefixed with a word-aligned address:
//!
//! ```text
//! 00A00293  ->  0000: 93 02 A0 00
//! 12345678  ->  0004: 78 56 34 12
//! FF        ->  0008: FF 00 00 00
//! ```

use thiserror::Error;

/// Byte distance between two consecutive words.
pub const ADDRESS_STRIDE: usize = 4;
/// Hex digits in a padded 32-bit word.
pub const WORD_DIGITS: usize = 8;

/// A hex word that can't be laid out as four byte groups.
///
/// `line` is the 1-based position of the word in the input sequence.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("line {line}: empty hex word")]
    Empty { line: usize },
    #[error("line {line}: hex word `{word}` has more than 8 digits")]
    TooLong { line: usize, word: String },
    #[error("line {line}: `{word}` contains a non-hex character")]
    InvalidDigit { line: usize, word: String },
}

impl ConvertError {
    pub fn line(&self) -> usize {
        match self {
            ConvertError::Empty { line }
            | ConvertError::TooLong { line, .. }
            | ConvertError::InvalidDigit { line, .. } => *line,
        }
    }
}

/// Converts a sequence of hex words into ROM listing lines.
///
/// The whole call fails on the first malformed word; no partial listing is
/// returned.
pub fn convert<S: AsRef<str>>(hex_words: &[S]) -> Result<Vec<String>, ConvertError> {
    hex_words
        .iter()
        .enumerate()
        .map(|(idx, word)| format_word(idx, word.as_ref()))
        .collect()
}

/// Formats the word found at 0-based position `index`.
pub fn format_word(index: usize, word: &str) -> Result<String, ConvertError> {
    let padded = pad_word(index + 1, word)?;
    let address = index * ADDRESS_STRIDE;
    Ok(format!(
        "{address:04X}: {} {} {} {}",
        &padded[6..8],
        &padded[4..6],
        &padded[2..4],
        &padded[0..2]
    ))
}

/// Trims `word` and left-pads it with zeros to [`WORD_DIGITS`] digits.
///
/// Digit case is kept as-is.
pub fn pad_word(line: usize, word: &str) -> Result<String, ConvertError> {
    let word = word.trim();
    if word.is_empty() {
        return Err(ConvertError::Empty { line });
    }
    if !word.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConvertError::InvalidDigit {
            line,
            word: word.to_string(),
        });
    }
    if word.len() > WORD_DIGITS {
        return Err(ConvertError::TooLong {
            line,
            word: word.to_string(),
        });
    }
    Ok(format!("{word:0>WORD_DIGITS$}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_sample_dump() {
        let lines = convert(&["00A00293", "12345678", "FF"]).expect("convert");
        assert_eq!(
            lines,
            vec!["0000: 93 02 A0 00", "0004: 78 56 34 12", "0008: FF 00 00 00"]
        );
    }

    #[test]
    fn empty_input_gives_empty_listing() {
        let words: [&str; 0] = [];
        assert_eq!(convert(&words), Ok(Vec::new()));
    }

    #[test]
    fn short_word_is_zero_padded() {
        assert_eq!(pad_word(1, "AB").expect("pad"), "000000AB");
        assert_eq!(format_word(0, "AB").expect("format"), "0000: AB 00 00 00");
    }

    #[test]
    fn addresses_step_by_four() {
        let words = vec!["0"; 70];
        let lines = convert(&words).expect("convert");
        assert_eq!(lines.len(), words.len());
        for (idx, line) in lines.iter().enumerate() {
            let expected = format!("{:04X}:", idx * 4);
            assert!(line.starts_with(&expected), "{line} should start with {expected}");
        }
        assert_eq!(lines[69], "0114: 00 00 00 00");
    }

    #[test]
    fn address_widens_past_16_bits() {
        assert_eq!(
            format_word(0x4000, "DEADBEEF").expect("format"),
            "10000: EF BE AD DE"
        );
    }

    #[test]
    fn digit_case_is_preserved() {
        assert_eq!(
            format_word(3, "deadBEEF").expect("format"),
            "000C: EF BE ad de"
        );
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(
            format_word(0, "  12345678\r").expect("format"),
            "0000: 78 56 34 12"
        );
    }

    #[test]
    fn rejects_oversized_word_with_position() {
        let err = convert(&["00000000", "123456789"]).unwrap_err();
        assert_eq!(
            err,
            ConvertError::TooLong {
                line: 2,
                word: "123456789".to_string()
            }
        );
        assert_eq!(
            err.to_string(),
            "line 2: hex word `123456789` has more than 8 digits"
        );
    }

    #[test]
    fn rejects_non_hex_word() {
        let err = convert(&["0x1234"]).unwrap_err();
        assert_eq!(err.line(), 1);
        assert!(matches!(err, ConvertError::InvalidDigit { .. }));
    }

    #[test]
    fn rejects_blank_word() {
        assert_eq!(
            convert(&["FF", "   "]),
            Err(ConvertError::Empty { line: 2 })
        );
    }

    #[test]
    fn repeated_runs_are_identical() {
        let words = ["00A00293", "8fbf0014", "3"];
        assert_eq!(convert(&words), convert(&words));
    }
}
