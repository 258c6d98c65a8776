//! Configuration constants, settings file and validation functions.
//!
//! Settings are loaded once from a YAML file and passed by reference into
//! every stage, so each stage can be exercised with arbitrary settings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StructurerError};

/// Keyword that marks an article line ("Статья 5. ...").
pub const ARTICLE_KEYWORD: &str = "Статья";

/// Keyword that marks a chapter line. Chapters are not modelled.
pub const CHAPTER_KEYWORD: &str = "Глава";

/// Title prefix written into synthetic paragraph headers.
pub const PARAGRAPH_TITLE_PREFIX: &str = "Пункт";

/// Title prefix written into synthetic subparagraph headers.
pub const SUBPARAGRAPH_TITLE_PREFIX: &str = "Подпункт";

/// Suffix of a codex display name ("149-ФЗ").
pub const CODEX_NAME_SUFFIX: &str = "-ФЗ";

/// Label shared by every node of the Holmes triplet graph.
pub const ENTITY_LABEL: &str = "Entity";

/// Default location of the settings file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/config.yaml";

/// Default number of similarity-search seeds kept before expansion.
pub const DEFAULT_TOP_K: usize = 3;

/// Codex id pattern: a short number ("149", "152").
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CODEX_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,6}$").expect("valid regex"));

/// Graph label pattern accepted without backtick quoting.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LABEL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex"));

/// Validate codex id format.
///
/// # Examples
/// ```
/// use lawgraph_structurer::config::validate_codex_id;
///
/// assert!(validate_codex_id("149").is_ok());
/// assert!(validate_codex_id("149-ФЗ").is_err());
/// ```
pub fn validate_codex_id(codex: &str) -> Result<()> {
    if CODEX_ID_PATTERN.is_match(codex) {
        Ok(())
    } else {
        Err(StructurerError::InvalidCodexId(codex.to_string()))
    }
}

/// How alphabetic subparagraph markers ("а)", "к)") map to numbers.
///
/// Russian enumerations conventionally skip "й"; whether a given corpus does
/// is a property of the corpus, so the mode has no default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrdinalMode {
    /// "й" is not counted: "и)" is 9, "к)" is 10.
    Skip,

    /// Plain alphabet position: "й)" is 10, "к)" is 11.
    NoSkip,
}

/// Similarity function of the vector index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityFunction {
    Cosine,
    Euclidean,
}

impl SimilarityFunction {
    /// Value used in the index options.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cosine => "cosine",
            Self::Euclidean => "euclidean",
        }
    }
}

/// Corpus folder layout: `<path_to_folder>/<codex>/<file name>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Documents {
    pub path_to_folder: PathBuf,
    pub path_to_md: String,
    pub path_to_md_cleaned: String,
}

impl Documents {
    /// Folder of a single codex.
    #[must_use]
    pub fn codex_dir(&self, codex: &str) -> PathBuf {
        self.path_to_folder.join(codex)
    }

    /// Markdown source of a codex.
    #[must_use]
    pub fn md(&self, codex: &str) -> PathBuf {
        self.codex_dir(codex).join(&self.path_to_md)
    }

    /// Markdown with synthetic headers, written by the `markup` stage.
    #[must_use]
    pub fn md_clean(&self, codex: &str) -> PathBuf {
        self.codex_dir(codex).join(&self.path_to_md_cleaned)
    }
}

/// Engine behaviour switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Data {
    /// Number of leading chunks to drop per codex.
    #[serde(default)]
    pub start_chunk: BTreeMap<String, usize>,
    pub clean_text_from_links: bool,
    pub link_placeholder: String,
    pub embeddings_label: String,
    pub embeddings_parameter: String,
    pub index_name: String,
    pub ordinal_mode: OrdinalMode,
}

impl Data {
    /// Start chunk of a codex, 0 when not configured.
    #[must_use]
    pub fn start_chunk_for(&self, codex: &str) -> usize {
        self.start_chunk.get(codex).copied().unwrap_or(0)
    }
}

/// Embedding index parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Models {
    pub embeddings_dimension: usize,
    pub similarity_function: SimilarityFunction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Retrieval {
    pub top_k: usize,
}

impl Default for Retrieval {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct System {
    /// Suppress progress output in the CLI.
    pub silent_creation: bool,
}

/// The whole settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub documents: Documents,
    pub data: Data,
    pub models: Models,
    #[serde(default)]
    pub retrieval: Retrieval,
    #[serde(default)]
    pub system: System,
}

impl Settings {
    /// Load and validate settings from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            StructurerError::Io(std::io::Error::new(
                e.kind(),
                format!("Cannot read settings {}: {e}", path.display()),
            ))
        })?;
        Self::from_yaml_str(&text)
    }

    /// Parse and validate settings from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let settings: Self = serde_yaml_ng::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        for codex in self.data.start_chunk.keys() {
            validate_codex_id(codex)?;
        }
        if !LABEL_PATTERN.is_match(&self.data.embeddings_label) {
            return Err(StructurerError::Config(format!(
                "embeddings_label '{}' is not a valid graph label",
                self.data.embeddings_label
            )));
        }
        if self.data.embeddings_parameter.trim().is_empty() {
            return Err(StructurerError::Config(
                "embeddings_parameter must not be empty".to_string(),
            ));
        }
        if self.retrieval.top_k == 0 {
            return Err(StructurerError::Config(
                "retrieval.top_k must be at least 1".to_string(),
            ));
        }
        if self.models.embeddings_dimension == 0 {
            return Err(StructurerError::Config(
                "models.embeddings_dimension must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn test_settings(ordinal_mode: OrdinalMode) -> Settings {
    Settings {
        documents: Documents {
            path_to_folder: PathBuf::from("data"),
            path_to_md: "text.md".to_string(),
            path_to_md_cleaned: "text_cleaned.md".to_string(),
        },
        data: Data {
            start_chunk: BTreeMap::new(),
            clean_text_from_links: true,
            link_placeholder: "<ссылка>".to_string(),
            embeddings_label: "Embeddable".to_string(),
            embeddings_parameter: "embedding".to_string(),
            index_name: "node-embeddings".to_string(),
            ordinal_mode,
        },
        models: Models {
            embeddings_dimension: 768,
            similarity_function: SimilarityFunction::Cosine,
        },
        retrieval: Retrieval::default(),
        system: System::default(),
    }
}
