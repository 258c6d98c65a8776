//! Dotted identifiers for structural units.
//!
//! A unit's identifier is the path of ordinals from the codex down:
//! `149.5.2.1` is subparagraph 1 of paragraph 2 of article 5 of codex 149.
//! Ordinals may be compound (`2.1`, `2-1`) when an item was inserted
//! between two existing ones by a later amendment.

use crate::error::{Result, StructurerError};
use crate::markup::paragraph_ordinal;
use crate::types::{ChunkMetadata, UnitKind};

/// Identifier, predecessor and parent of one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedId {
    pub kind: UnitKind,
    pub identifier: String,
    pub predecessor: Option<String>,
    pub parent: Option<String>,
}

impl ResolvedId {
    /// The codex root.
    #[must_use]
    pub fn codex(codex: &str) -> Self {
        Self {
            kind: UnitKind::Codex,
            identifier: codex.to_string(),
            predecessor: None,
            parent: None,
        }
    }
}

/// Resolve the unit a chunk belongs to, at the chunk's own level.
///
/// Fails when the chunk has no article title or when an ordinal on the
/// path cannot be read.
pub fn resolve(metadata: &ChunkMetadata) -> Result<ResolvedId> {
    let kind = metadata
        .level()
        .ok_or_else(|| StructurerError::MissingArticleNumber(metadata.to_string()))?;
    resolve_at(metadata, kind)
}

/// Resolve the ancestor of a chunk at `kind`.
///
/// `kind` must not be deeper than the chunk's own level.
pub fn resolve_at(metadata: &ChunkMetadata, kind: UnitKind) -> Result<ResolvedId> {
    if kind == UnitKind::Codex {
        return Ok(ResolvedId::codex(&metadata.codex));
    }

    let mut path = vec![metadata.codex.clone()];
    let mut ordinal = String::new();

    for level in UnitKind::INDEXABLE {
        if level > kind {
            break;
        }
        ordinal = ordinal_at(metadata, level)?;
        path.push(ordinal.clone());
    }

    let identifier = path.join(".");
    path.pop();
    let parent = path.join(".");
    let predecessor = predecessor_of(&parent, &ordinal)
        .ok_or_else(|| StructurerError::IrregularOrdinal {
            ordinal: ordinal.clone(),
            metadata: metadata.clone(),
        })?;

    Ok(ResolvedId {
        kind,
        identifier,
        predecessor,
        parent: Some(parent),
    })
}

/// Number of an article title: second token, trailing dot removed.
///
/// # Examples
/// ```
/// use lawgraph_structurer::resolver::article_number;
///
/// assert_eq!(article_number("Статья 12.1. Сфера").unwrap(), "12.1");
/// ```
pub fn article_number(title: &str) -> Result<String> {
    title
        .split_whitespace()
        .nth(1)
        .map(|token| token.strip_suffix('.').unwrap_or(token).to_string())
        .filter(|number| !number.is_empty())
        .ok_or_else(|| StructurerError::MissingArticleNumber(title.to_string()))
}

fn ordinal_at(metadata: &ChunkMetadata, level: UnitKind) -> Result<String> {
    let title = match level {
        UnitKind::Codex => return Ok(metadata.codex.clone()),
        UnitKind::Article => {
            let title = metadata
                .article
                .as_deref()
                .ok_or_else(|| StructurerError::MissingArticleNumber(metadata.to_string()))?;
            let number = article_number(title)?;
            return validated(number, metadata);
        }
        UnitKind::Paragraph => metadata.paragraph.as_deref(),
        UnitKind::Subparagraph => metadata.subparagraph.as_deref(),
    };

    let ordinal = title
        .and_then(|title| title.split_whitespace().last())
        .unwrap_or_default()
        .to_string();
    validated(ordinal, metadata)
}

fn validated(ordinal: String, metadata: &ChunkMetadata) -> Result<String> {
    paragraph_ordinal(&ordinal).ok_or_else(|| StructurerError::IrregularOrdinal {
        ordinal,
        metadata: metadata.clone(),
    })
}

/// Previous sibling of `ordinal` under `parent`.
///
/// The outer `None` means the ordinal could not be read; the inner one that
/// the unit is first among its siblings.
fn predecessor_of(parent: &str, ordinal: &str) -> Option<Option<String>> {
    let Some(split) = ordinal.rfind(['.', '-']) else {
        let n: u64 = ordinal.parse().ok()?;
        return Some((n > 1).then(|| format!("{parent}.{}", n - 1)));
    };

    let (head, tail) = ordinal.split_at(split);
    let separator = &tail[..1];
    let b: u64 = tail[1..].parse().ok()?;

    Some(match b {
        0 => None,
        1 => Some(format!("{parent}.{head}")),
        _ => Some(format!("{parent}.{head}{separator}{}", b - 1)),
    })
}
