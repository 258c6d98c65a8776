//! Chunking strategies for header sections.

/// Trait for configurable chunking strategies.
///
/// Implementations decide how the content lines collected under one header
/// become chunk bodies.
pub trait ChunkStrategy {
    /// Turn the content lines of one section into chunk bodies.
    ///
    /// Returned bodies are non-empty and in source order.
    fn chunk_section(&self, lines: &[String]) -> Vec<String>;
}

/// One chunk per non-empty line.
///
/// Continuation lines of a paragraph become separate chunks with identical
/// metadata; the corrector coalesces them afterwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineChunkStrategy;

impl ChunkStrategy for LineChunkStrategy {
    fn chunk_section(&self, lines: &[String]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// One chunk per header section.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionChunkStrategy;

impl ChunkStrategy for SectionChunkStrategy {
    fn chunk_section(&self, lines: &[String]) -> Vec<String> {
        let body = lines
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        if body.is_empty() {
            Vec::new()
        } else {
            vec![body]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_line_strategy() {
        let chunks = LineChunkStrategy.chunk_section(&lines(&["1. Первая", "", "  вторая  "]));
        assert_eq!(chunks, vec!["1. Первая", "вторая"]);
    }

    #[test]
    fn test_section_strategy() {
        let chunks = SectionChunkStrategy.chunk_section(&lines(&["1. Первая", "", "вторая"]));
        assert_eq!(chunks, vec!["1. Первая\nвторая"]);
    }

    #[test]
    fn test_empty_section() {
        assert!(LineChunkStrategy.chunk_section(&lines(&["", " "])).is_empty());
        assert!(SectionChunkStrategy.chunk_section(&lines(&[])).is_empty());
    }
}
