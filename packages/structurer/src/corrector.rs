//! Repairs for systematic chunking artifacts.
//!
//! Line-level splitting leaves two kinds of damage behind: subparagraphs
//! that appear with no paragraph in effect, and units whose continuation
//! lines were split into several chunks. Chapter headings also end up as
//! chunks of the article that precedes them.

use crate::config::{CHAPTER_KEYWORD, PARAGRAPH_TITLE_PREFIX, SUBPARAGRAPH_TITLE_PREFIX};
use crate::types::Chunk;

/// Relabel subparagraph chunks that have no paragraph title as paragraphs.
#[must_use]
pub fn promote_orphans(chunks: Vec<Chunk>) -> Vec<Chunk> {
    chunks
        .into_iter()
        .map(|mut chunk| {
            let meta = &mut chunk.metadata;
            if meta.paragraph.is_none() {
                if let Some(title) = meta.subparagraph.take() {
                    tracing::debug!(metadata = %meta, title = %title, "Promoting orphan subparagraph");
                    meta.paragraph = Some(promoted_title(&title));
                }
            }
            chunk
        })
        .collect()
}

/// Remove chapter lines from a chunk; `None` when nothing else is left.
#[must_use]
pub fn strip_chapters(chunk: Chunk) -> Option<Chunk> {
    if !chunk.content.contains(CHAPTER_KEYWORD) {
        return Some(chunk);
    }

    let kept: Vec<&str> = chunk
        .content
        .lines()
        .filter(|line| !line.contains(CHAPTER_KEYWORD))
        .collect();
    tracing::debug!(metadata = %chunk.metadata, "Dropping chapter heading");

    if kept.is_empty() {
        None
    } else {
        Some(Chunk::new(chunk.metadata.clone(), kept.join("\n")))
    }
}

/// Drop chapter headings, then merge consecutive chunks with equal metadata.
///
/// Merged content is joined with a newline; the result never has two
/// adjacent chunks with identical metadata.
#[must_use]
pub fn coalesce(chunks: Vec<Chunk>) -> Vec<Chunk> {
    chunks
        .into_iter()
        .filter_map(strip_chapters)
        .fold(Vec::new(), |mut merged: Vec<Chunk>, chunk| {
            match merged.last_mut() {
                Some(last) if last.metadata == chunk.metadata => {
                    last.content.push('\n');
                    last.content.push_str(&chunk.content);
                }
                _ => merged.push(chunk),
            }
            merged
        })
}

/// Run every repair in order.
#[must_use]
pub fn correct(chunks: Vec<Chunk>) -> Vec<Chunk> {
    coalesce(promote_orphans(chunks))
}

fn promoted_title(title: &str) -> String {
    match title.strip_prefix(SUBPARAGRAPH_TITLE_PREFIX) {
        Some(rest) => format!("{PARAGRAPH_TITLE_PREFIX}{rest}"),
        None => title.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChunkMetadata, UnitKind};
    use pretty_assertions::assert_eq;

    fn article() -> ChunkMetadata {
        ChunkMetadata::new("149").with_article("Статья 5. Название")
    }

    #[test]
    fn test_promote_orphan_subparagraph() {
        let orphan = Chunk::new(article().with_subparagraph("Подпункт 3"), "3) текст");
        let promoted = promote_orphans(vec![orphan]);

        assert_eq!(promoted[0].metadata, article().with_paragraph("Пункт 3"));
        assert_eq!(promoted[0].metadata.level(), Some(UnitKind::Paragraph));
    }

    #[test]
    fn test_promote_keeps_nested_subparagraph() {
        let meta = article()
            .with_paragraph("Пункт 1")
            .with_subparagraph("Подпункт 3");
        let chunk = Chunk::new(meta.clone(), "3) текст");
        assert_eq!(promote_orphans(vec![chunk])[0].metadata, meta);
    }

    #[test]
    fn test_coalesce_merges_consecutive_equal_metadata() {
        let meta = article().with_paragraph("Пункт 1");
        let chunks = vec![
            Chunk::new(meta.clone(), "1. Начало"),
            Chunk::new(meta.clone(), "продолжение"),
            Chunk::new(article().with_paragraph("Пункт 2"), "2. Другой"),
            Chunk::new(meta.clone(), "1. Не соседний"),
        ];

        let merged = coalesce(chunks);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].content, "1. Начало\nпродолжение");
        assert_eq!(merged[2].content, "1. Не соседний");
    }

    #[test]
    fn test_coalesce_drops_chapters_before_merging() {
        let meta = article().with_paragraph("Пункт 4");
        let chunks = vec![
            Chunk::new(meta.clone(), "4. Последний пункт."),
            Chunk::new(meta.clone(), "Глава 2. Права субъекта"),
            Chunk::new(meta.clone(), "хвост"),
        ];

        let merged = coalesce(chunks);

        assert_eq!(merged, vec![Chunk::new(meta, "4. Последний пункт.\nхвост")]);
    }

    #[test]
    fn test_strip_chapters_keeps_section_text() {
        let meta = article().with_paragraph("Пункт 3");
        let chunk = Chunk::new(meta.clone(), "в) открытость.\nГлава 2. Доступ к информации");

        assert_eq!(strip_chapters(chunk), Some(Chunk::new(meta.clone(), "в) открытость.")));
        assert_eq!(strip_chapters(Chunk::new(meta, "Глава 3")), None);
    }

    #[test]
    fn test_correct_empty() {
        assert!(correct(Vec::new()).is_empty());
    }
}
