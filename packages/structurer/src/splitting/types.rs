//! Types for the header splitting system.

use crate::types::UnitKind;

/// Declarative specification of one header marker.
///
/// Maps a markdown marker ("#", "##", "###") to the hierarchy level whose
/// title it sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSpec {
    /// Marker depth: the number of leading `#` characters.
    pub depth: usize,

    /// Level whose title this header sets.
    pub level: UnitKind,

    /// Whether header lines of this depth are dropped without effect.
    pub is_stripped: bool,
}

impl HeaderSpec {
    /// Create a new header specification.
    #[must_use]
    pub fn new(depth: usize, level: UnitKind) -> Self {
        Self {
            depth,
            level,
            is_stripped: false,
        }
    }

    /// Set whether lines with this marker are stripped.
    #[must_use]
    pub fn with_stripped(mut self, stripped: bool) -> Self {
        self.is_stripped = stripped;
        self
    }
}

/// A header line recognised by a scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLine<'a> {
    /// Spec of the matched marker.
    pub spec: &'a HeaderSpec,

    /// Header title with surrounding whitespace removed.
    pub title: String,
}

/// Split a line into marker depth and title when it has header shape.
///
/// A header is one or more `#` followed by a space (or end of line).
#[must_use]
pub fn parse_header(line: &str) -> Option<(usize, &str)> {
    let depth = line.chars().take_while(|c| *c == '#').count();
    if depth == 0 {
        return None;
    }

    let rest = &line[depth..];
    if rest.is_empty() || rest.starts_with(' ') {
        Some((depth, rest.trim()))
    } else {
        None
    }
}
