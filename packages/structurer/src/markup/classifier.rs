//! Header classifier: make the latent hierarchy of a codex explicit.
//!
//! Raw codex lines carry their structure positionally: "Статья 5. ..." opens
//! an article, "2." a paragraph, "1)" or "а)" a subparagraph. The classifier
//! rewrites the line sequence so that every such line is preceded by a
//! markdown-style header ("#", "##", "###") the splitter can partition on.

use unicode_normalization::UnicodeNormalization;

use super::ordinal::{paragraph_ordinal, subparagraph_ordinal};
use crate::config::{
    OrdinalMode, Settings, ARTICLE_KEYWORD, PARAGRAPH_TITLE_PREFIX, SUBPARAGRAPH_TITLE_PREFIX,
};

/// Result of classifying one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Lines with synthetic headers inserted.
    pub lines: Vec<String>,

    /// Markers that looked structural but could not be read.
    pub warnings: Vec<String>,
}

/// What a single line turned out to be.
#[derive(Debug, PartialEq, Eq)]
enum LineClass {
    Article(String),
    Paragraph(String),
    Subparagraph(String),
    Malformed(String),
    Plain,
}

/// Accumulator carried through the line fold.
///
/// `seen_paragraph` is per article: it resets at every article header and
/// starts out false for each run.
#[derive(Debug, Default)]
struct ClassifyState {
    lines: Vec<String>,
    warnings: Vec<String>,
    seen_paragraph: bool,
}

/// Inserts header markers in front of structural lines.
#[derive(Debug, Clone, Copy)]
pub struct HeaderClassifier {
    ordinal_mode: OrdinalMode,
}

impl HeaderClassifier {
    /// Create a classifier with an explicit ordinal mode.
    #[must_use]
    pub fn new(ordinal_mode: OrdinalMode) -> Self {
        Self { ordinal_mode }
    }

    /// Create a classifier from settings.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.data.ordinal_mode)
    }

    /// Classify a whole document.
    pub fn classify<I, S>(&self, lines: I) -> Classification
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let state = lines
            .into_iter()
            .enumerate()
            .fold(ClassifyState::default(), |state, (index, line)| {
                self.step(state, index + 1, line.as_ref())
            });

        Classification {
            lines: state.lines,
            warnings: state.warnings,
        }
    }

    fn step(&self, mut state: ClassifyState, line_no: usize, raw: &str) -> ClassifyState {
        let line = clean_line(raw);

        match self.classify_line(&line) {
            LineClass::Article(title) => {
                state.seen_paragraph = false;
                state.lines.push(format!("# {title}"));
            }
            LineClass::Paragraph(ordinal) => {
                state.seen_paragraph = true;
                state.lines.push(paragraph_header(&ordinal));
                state.lines.push(line);
            }
            LineClass::Subparagraph(ordinal) if !state.seen_paragraph => {
                // No paragraph level in this article: the enumeration is the
                // paragraph level.
                state.lines.push(paragraph_header(&ordinal));
                state.lines.push(line);
            }
            LineClass::Subparagraph(ordinal) => {
                state.lines.push(subparagraph_header(&ordinal));
                state.lines.push(line);
            }
            LineClass::Malformed(marker) => {
                tracing::debug!(line = line_no, marker = %marker, "Malformed marker, keeping line as content");
                state
                    .warnings
                    .push(format!("line {line_no}: malformed marker '{marker}'"));
                state.lines.push(line);
            }
            LineClass::Plain => state.lines.push(line),
        }

        state
    }

    fn classify_line(&self, line: &str) -> LineClass {
        if line.contains(ARTICLE_KEYWORD) {
            let title = line.strip_prefix(' ').unwrap_or(line).replace('*', "");
            return LineClass::Article(title.trim_end().to_string());
        }

        let Some(marker) = line
            .split(char::is_whitespace)
            .next()
            .filter(|m| !m.is_empty())
        else {
            return LineClass::Plain;
        };

        // Already a header (or a parenthesised aside), never a marker
        if marker.starts_with('(') || marker.starts_with('#') {
            return LineClass::Plain;
        }

        if let Some(raw) = marker.strip_suffix('.') {
            return match paragraph_ordinal(raw) {
                Some(ordinal) => LineClass::Paragraph(ordinal),
                None if looks_like_ordinal(raw) => LineClass::Malformed(marker.to_string()),
                None => LineClass::Plain,
            };
        }

        if let Some(raw) = marker.strip_suffix(')') {
            return match subparagraph_ordinal(raw, self.ordinal_mode) {
                Some(ordinal) => LineClass::Subparagraph(ordinal),
                None => LineClass::Malformed(marker.to_string()),
            };
        }

        LineClass::Plain
    }
}

/// Strip source headers and normalize a raw line.
///
/// Only synthetic headers may define structure, so any "#" already present
/// in the source is removed.
#[must_use]
pub fn clean_line(raw: &str) -> String {
    raw.trim_end_matches(['\n', '\r'])
        .nfc()
        .filter(|c| *c != '#')
        .collect()
}

/// Apply [`clean_line`] to a whole document.
pub fn clean_headers<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines.into_iter().map(|line| clean_line(line.as_ref())).collect()
}

/// A dotted marker that starts like a number but is not a valid ordinal.
fn looks_like_ordinal(raw: &str) -> bool {
    raw.is_empty() || raw.starts_with(|c: char| c.is_ascii_digit())
}

fn paragraph_header(ordinal: &str) -> String {
    format!("## {PARAGRAPH_TITLE_PREFIX} {ordinal}")
}

fn subparagraph_header(ordinal: &str) -> String {
    format!("### {SUBPARAGRAPH_TITLE_PREFIX} {ordinal}")
}
