//! Inline link handling.
//!
//! Codex text carries cross-references as markdown links
//! (`[статьей 5](https://...)`). The naive schema keeps the anchor in the
//! text and records the target separately; the Holmes schema only keeps the
//! anchor.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::types::Reference;

/// Markdown inline link: `[anchor](target)`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid regex"));

/// Text with its links extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedText {
    /// Text to store on the unit.
    pub text: String,

    /// Links in order of appearance.
    pub references: Vec<Reference>,
}

/// Extract all links from `text`.
///
/// With `clean` set, each link target in the returned text is replaced by
/// `placeholder`; the anchor text is always preserved.
///
/// # Examples
/// ```
/// use lawgraph_structurer::references::extract_references;
///
/// let linked = extract_references("см. [текст](http://x)", true, "<ссылка>");
/// assert_eq!(linked.text, "см. [текст](<ссылка>)");
/// assert_eq!(linked.references[0].target, "http://x");
/// ```
#[must_use]
pub fn extract_references(text: &str, clean: bool, placeholder: &str) -> LinkedText {
    let references = LINK_PATTERN
        .captures_iter(text)
        .map(|caps| Reference::new(&caps[1], &caps[2]))
        .collect();

    let text = if clean {
        LINK_PATTERN
            .replace_all(text, |caps: &Captures<'_>| {
                format!("[{}]({placeholder})", &caps[1])
            })
            .into_owned()
    } else {
        text.to_string()
    };

    LinkedText { text, references }
}

/// Replace every link with its anchor text.
#[must_use]
pub fn resolve_links(text: &str) -> String {
    LINK_PATTERN.replace_all(text, "$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_with_clean_flag() {
        let linked = extract_references("см. [текст](http://x)", true, "<ссылка>");
        assert_eq!(linked.references, vec![Reference::new("текст", "http://x")]);
        assert_eq!(linked.text, "см. [текст](<ссылка>)");
    }

    #[test]
    fn test_extract_without_clean_flag() {
        let linked = extract_references("см. [текст](http://x)", false, "<ссылка>");
        assert_eq!(linked.text, "см. [текст](http://x)");
        assert_eq!(linked.references.len(), 1);
    }

    #[test]
    fn test_extract_multiple_in_order() {
        let text = "по [статье 5](a) и [статье 6](b)";
        let linked = extract_references(text, true, "*");
        assert_eq!(
            linked.references,
            vec![Reference::new("статье 5", "a"), Reference::new("статье 6", "b")]
        );
        assert_eq!(linked.text, "по [статье 5](*) и [статье 6](*)");
    }

    #[test]
    fn test_extract_no_links() {
        let linked = extract_references("Простой текст (без ссылок).", true, "*");
        assert!(linked.references.is_empty());
        assert_eq!(linked.text, "Простой текст (без ссылок).");
    }

    #[test]
    fn test_resolve_links() {
        assert_eq!(
            resolve_links("согласно [статье 5](http://x) закона"),
            "согласно статье 5 закона"
        );
        assert_eq!(resolve_links("[a]() остается"), "[a]() остается");
    }
}
