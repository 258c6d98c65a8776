//! Error types for the structurer.
//!
//! Classification and splitting never fail: malformed lines are kept as plain
//! content and reported as warnings. Everything that reaches this enum is a
//! hard failure of the current document or command.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::ChunkMetadata;

/// Main error type for the structurer library.
#[derive(Debug, Error)]
pub enum StructurerError {
    /// Invalid codex identifier.
    #[error("Invalid codex id: '{0}'. Expected a short numeric string (e.g., 149)")]
    InvalidCodexId(String),

    /// The corpus folder has no document for a codex.
    #[error("No document for codex {codex} at {}", .path.display())]
    MissingDocument { codex: String, path: PathBuf },

    /// An ordinal that cannot be turned into an identifier segment.
    #[error("Irregular ordinal '{ordinal}' in {metadata}")]
    IrregularOrdinal {
        ordinal: String,
        metadata: ChunkMetadata,
    },

    /// Article title without a number token.
    #[error("Article title has no number: '{0}'")]
    MissingArticleNumber(String),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialization error.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON (de)serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for structurer operations.
pub type Result<T> = std::result::Result<T, StructurerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StructurerError::InvalidCodexId("abc".to_string());
        assert!(err.to_string().contains("abc"));
        assert!(err.to_string().contains("numeric"));
    }

    #[test]
    fn test_irregular_ordinal_carries_metadata() {
        let metadata = ChunkMetadata::new("149")
            .with_article("Статья 5. Название")
            .with_paragraph("Пункт x");
        let err = StructurerError::IrregularOrdinal {
            ordinal: "x".to_string(),
            metadata,
        };
        assert_eq!(
            err.to_string(),
            "Irregular ordinal 'x' in codex 149 / Статья 5. Название / Пункт x"
        );
    }

    #[test]
    fn test_missing_document_display() {
        let err = StructurerError::MissingDocument {
            codex: "149".to_string(),
            path: PathBuf::from("data/149/text.md"),
        };
        assert_eq!(
            err.to_string(),
            "No document for codex 149 at data/149/text.md"
        );
    }
}
