//! Split engine that partitions marked-up text using a header registry.

use super::registry::HeaderRegistry;
use super::strategy::ChunkStrategy;
use crate::references::resolve_links;
use crate::types::{Chunk, ChunkMetadata};

/// Engine for splitting a marked-up codex into chunks.
///
/// Walks the lines once, tracking the header titles in effect, and hands
/// the content of each section to the strategy.
pub struct SplitEngine<S: ChunkStrategy> {
    registry: HeaderRegistry,
    strategy: S,
}

/// Section being collected.
struct Section {
    metadata: ChunkMetadata,
    lines: Vec<String>,
}

impl<S: ChunkStrategy> SplitEngine<S> {
    /// Create a new split engine.
    #[must_use]
    pub fn new(registry: HeaderRegistry, strategy: S) -> Self {
        Self { registry, strategy }
    }

    /// Split classified lines of one codex into ordered chunks.
    pub fn split<I, L>(&self, codex: &str, lines: I) -> Vec<Chunk>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        let mut chunks = Vec::new();
        let mut section = Section {
            metadata: ChunkMetadata::new(codex),
            lines: Vec::new(),
        };

        for line in lines {
            let line = line.as_ref().replace('"', "'");

            let Some(header) = self.registry.match_header(&line) else {
                section.lines.push(self.content_line(line));
                continue;
            };

            if header.spec.is_stripped {
                continue;
            }

            self.flush(&mut section, &mut chunks);
            section.metadata.enter(header.spec.level, header.title);
        }

        self.flush(&mut section, &mut chunks);

        tracing::debug!(codex = %codex, chunks = chunks.len(), "Split codex");
        chunks
    }

    fn content_line(&self, line: String) -> String {
        if self.registry.resolves_links() {
            resolve_links(&line)
        } else {
            line
        }
    }

    fn flush(&self, section: &mut Section, chunks: &mut Vec<Chunk>) {
        let lines = std::mem::take(&mut section.lines);
        chunks.extend(
            self.strategy
                .chunk_section(&lines)
                .into_iter()
                .map(|body| Chunk::new(section.metadata.clone(), body)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splitting::{
        create_holmes_scheme, create_standard_scheme, LineChunkStrategy, SectionChunkStrategy,
    };
    use pretty_assertions::assert_eq;

    const MARKED_UP: &[&str] = &[
        "# Статья 5. Название",
        "## Пункт 1",
        "1. Текст пункта один.",
        "## Пункт 2",
        "2. Текст пункта два:",
        "### Подпункт 1",
        "1) Подпункт со [ссылкой](http://x).",
        "### Подпункт 2",
        "2) Другой подпункт.",
    ];

    #[test]
    fn test_standard_split() {
        let engine = SplitEngine::new(create_standard_scheme(), LineChunkStrategy);
        let chunks = engine.split("149", MARKED_UP);

        assert_eq!(chunks.len(), 4);

        let article = ChunkMetadata::new("149").with_article("Статья 5. Название");
        assert_eq!(
            chunks[0],
            Chunk::new(article.clone().with_paragraph("Пункт 1"), "1. Текст пункта один.")
        );
        assert_eq!(
            chunks[2].metadata,
            article
                .clone()
                .with_paragraph("Пункт 2")
                .with_subparagraph("Подпункт 1")
        );
        assert_eq!(chunks[2].content, "1) Подпункт со [ссылкой](http://x).");
        assert_eq!(
            chunks[3].metadata.subparagraph.as_deref(),
            Some("Подпункт 2")
        );
    }

    #[test]
    fn test_holmes_split() {
        let engine = SplitEngine::new(create_holmes_scheme(), SectionChunkStrategy);
        let chunks = engine.split("149", MARKED_UP);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].metadata.paragraph.as_deref(), Some("Пункт 2"));
        assert_eq!(chunks[1].metadata.subparagraph, None);
        assert_eq!(
            chunks[1].content,
            "2. Текст пункта два:\n1) Подпункт со ссылкой.\n2) Другой подпункт."
        );
    }

    #[test]
    fn test_header_clears_deeper_titles() {
        let engine = SplitEngine::new(create_standard_scheme(), LineChunkStrategy);
        let chunks = engine.split(
            "149",
            [
                "# Статья 1. А",
                "## Пункт 1",
                "### Подпункт 1",
                "1) x",
                "# Статья 2. Б",
                "Вводный текст статьи.",
            ],
        );

        assert_eq!(chunks.len(), 2);
        assert_eq!(
            chunks[1].metadata,
            ChunkMetadata::new("149").with_article("Статья 2. Б")
        );
    }

    #[test]
    fn test_double_quotes_normalized() {
        let engine = SplitEngine::new(create_standard_scheme(), LineChunkStrategy);
        let chunks = engine.split("149", ["# Статья 1. А", "Термин \"данные\"."]);
        assert_eq!(chunks[0].content, "Термин 'данные'.");
    }

    #[test]
    fn test_preamble_has_codex_only() {
        let engine = SplitEngine::new(create_standard_scheme(), LineChunkStrategy);
        let chunks = engine.split("149", ["Преамбула", "# Статья 1. А"]);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].metadata, ChunkMetadata::new("149"));
        assert_eq!(chunks[0].metadata.level(), None);
    }
}
