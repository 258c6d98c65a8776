//! Core data types for the structurer.
//!
//! These types describe the hierarchy of a Russian codex (Codex, Article,
//! Paragraph, Subparagraph) and the chunks the splitter produces from it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Hierarchical level of a structural unit.
///
/// The order of the variants is the order of the hierarchy, from the root
/// down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    /// A whole codex (one numbered federal law).
    Codex,

    /// Статья.
    Article,

    /// Пункт.
    Paragraph,

    /// Подпункт.
    Subparagraph,
}

impl UnitKind {
    /// All kinds that carry searchable text and share the embeddings label.
    pub const INDEXABLE: [UnitKind; 3] = [Self::Article, Self::Paragraph, Self::Subparagraph];

    /// Get the graph label for this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Codex => "Codex",
            Self::Article => "Article",
            Self::Paragraph => "Paragraph",
            Self::Subparagraph => "Subparagraph",
        }
    }

    /// The fixed kind one level up, `None` for the root.
    #[must_use]
    pub fn parent_kind(&self) -> Option<Self> {
        match self {
            Self::Codex => None,
            Self::Article => Some(Self::Codex),
            Self::Paragraph => Some(Self::Article),
            Self::Subparagraph => Some(Self::Paragraph),
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header titles in effect for a chunk.
///
/// Titles are inherited downward: a chunk under "Пункт 2" of "Статья 5"
/// carries both. A header clears all deeper slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Codex identifier (e.g., "149").
    pub codex: String,

    /// Article title (e.g., "Статья 5. Название").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article: Option<String>,

    /// Paragraph title (e.g., "Пункт 2").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraph: Option<String>,

    /// Subparagraph title (e.g., "Подпункт 1").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subparagraph: Option<String>,
}

impl ChunkMetadata {
    /// Create metadata with only the codex set.
    #[must_use]
    pub fn new(codex: impl Into<String>) -> Self {
        Self {
            codex: codex.into(),
            ..Self::default()
        }
    }

    /// Set the article title.
    #[must_use]
    pub fn with_article(mut self, title: impl Into<String>) -> Self {
        self.article = Some(title.into());
        self
    }

    /// Set the paragraph title.
    #[must_use]
    pub fn with_paragraph(mut self, title: impl Into<String>) -> Self {
        self.paragraph = Some(title.into());
        self
    }

    /// Set the subparagraph title.
    #[must_use]
    pub fn with_subparagraph(mut self, title: impl Into<String>) -> Self {
        self.subparagraph = Some(title.into());
        self
    }

    /// Deepest populated level, `None` when no article is in effect.
    #[must_use]
    pub fn level(&self) -> Option<UnitKind> {
        if self.subparagraph.is_some() {
            Some(UnitKind::Subparagraph)
        } else if self.paragraph.is_some() {
            Some(UnitKind::Paragraph)
        } else if self.article.is_some() {
            Some(UnitKind::Article)
        } else {
            None
        }
    }

    /// Set the title for a level and clear everything below it.
    pub fn enter(&mut self, level: UnitKind, title: impl Into<String>) {
        let title = Some(title.into());
        match level {
            UnitKind::Codex => {}
            UnitKind::Article => {
                self.article = title;
                self.paragraph = None;
                self.subparagraph = None;
            }
            UnitKind::Paragraph => {
                self.paragraph = title;
                self.subparagraph = None;
            }
            UnitKind::Subparagraph => {
                self.subparagraph = title;
            }
        }
    }
}

impl fmt::Display for ChunkMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "codex {}", self.codex)?;
        for title in [&self.article, &self.paragraph, &self.subparagraph]
            .into_iter()
            .flatten()
        {
            write!(f, " / {title}")?;
        }
        Ok(())
    }
}

/// A piece of codex text together with the headers in effect for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Headers in effect.
    pub metadata: ChunkMetadata,

    /// Body text.
    pub content: String,
}

impl Chunk {
    /// Create a new chunk.
    #[must_use]
    pub fn new(metadata: ChunkMetadata, content: impl Into<String>) -> Self {
        Self {
            metadata,
            content: content.into(),
        }
    }
}

/// An inline cross-reference found in unit text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Visible anchor text.
    pub anchor: String,

    /// Link target.
    pub target: String,
}

impl Reference {
    /// Create a new reference.
    #[must_use]
    pub fn new(anchor: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            anchor: anchor.into(),
            target: target.into(),
        }
    }
}
