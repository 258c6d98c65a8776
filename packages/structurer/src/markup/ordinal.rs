//! Ordinal parsing for paragraph and subparagraph markers.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::OrdinalMode;

/// Russian alphabet in enumeration order, without "ё".
const ALPHABET: [char; 32] = [
    'а', 'б', 'в', 'г', 'д', 'е', 'ж', 'з', 'и', 'й', 'к', 'л', 'м', 'н', 'о', 'п', 'р', 'с',
    'т', 'у', 'ф', 'х', 'ц', 'ч', 'ш', 'щ', 'ъ', 'ы', 'ь', 'э', 'ю', 'я',
];

/// The letter left out of enumerations in skip mode.
const SKIPPED_LETTER: char = 'й';

/// Alphabet position of [`SKIPPED_LETTER`].
const SKIPPED_POSITION: u32 = 10;

/// Numeric ordinal with optional compound parts: "3", "3.1", "2-1".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NUMERIC_ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:[.\-]\d+)*$").expect("valid regex"));

/// 1-based enumeration position of a Cyrillic letter.
///
/// "ё" sits at the end of the Unicode block but enumerates as "е". In
/// [`OrdinalMode::Skip`] "й" is not counted, so every later letter moves one
/// position down and "й" itself is not an ordinal.
///
/// # Examples
/// ```
/// use lawgraph_structurer::config::OrdinalMode;
/// use lawgraph_structurer::markup::rus_ordinal;
///
/// assert_eq!(rus_ordinal('а', OrdinalMode::Skip), Some(1));
/// assert_eq!(rus_ordinal('к', OrdinalMode::Skip), Some(10));
/// assert_eq!(rus_ordinal('к', OrdinalMode::NoSkip), Some(11));
/// ```
#[must_use]
pub fn rus_ordinal(letter: char, mode: OrdinalMode) -> Option<u32> {
    let letter = letter.to_lowercase().next()?;
    let letter = if letter == 'ё' { 'е' } else { letter };

    let index = ALPHABET.iter().position(|c| *c == letter)?;
    let position = u32::try_from(index + 1).ok()?;

    match mode {
        OrdinalMode::NoSkip => Some(position),
        OrdinalMode::Skip if letter == SKIPPED_LETTER => None,
        OrdinalMode::Skip if position > SKIPPED_POSITION => Some(position - 1),
        OrdinalMode::Skip => Some(position),
    }
}

/// Validate a paragraph ordinal ("1", "3.1", "2-1").
#[must_use]
pub fn paragraph_ordinal(raw: &str) -> Option<String> {
    NUMERIC_ORDINAL.is_match(raw).then(|| raw.to_string())
}

/// Validate a subparagraph ordinal, converting a single letter to a number.
#[must_use]
pub fn subparagraph_ordinal(raw: &str, mode: OrdinalMode) -> Option<String> {
    if NUMERIC_ORDINAL.is_match(raw) {
        return Some(raw.to_string());
    }

    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => rus_ordinal(letter, mode).map(|n| n.to_string()),
        _ => None,
    }
}
