//! LawGraph Structurer - recover the hierarchy of Russian codices and
//! compile it into property graph upserts.
//!
//! A codex arrives as loosely formatted markdown. The structurer makes its
//! Article/Paragraph/Subparagraph hierarchy explicit, gives every unit a
//! stable dotted identifier and emits idempotent Cypher commands for a
//! hierarchical graph, or chunks and triplet upserts for an entity graph.
//!
//! # Example
//!
//! ```
//! use lawgraph_structurer::markup::rus_ordinal;
//! use lawgraph_structurer::config::{validate_codex_id, OrdinalMode};
//!
//! assert!(validate_codex_id("149").is_ok());
//! assert_eq!(rus_ordinal('в', OrdinalMode::Skip), Some(3));
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants, settings file and validation
//! - [`types`]: Core data types (UnitKind, Chunk, Reference)
//! - [`error`]: Error types and Result alias
//! - [`markup`]: Header classifier and Cyrillic ordinals
//! - [`splitting`]: Header-scheme splitting into chunks
//! - [`corrector`]: Orphan promotion and chunk coalescing
//! - [`references`]: Inline link extraction
//! - [`resolver`]: Dotted identifiers, predecessors and parents
//! - [`model`]: Structural units and the document builder
//! - [`graph`]: Graph commands and their compiler
//! - [`holmes`]: Entity-relation triplets
//! - [`retrieval`]: Retrieval query templates
//! - [`pipeline`]: Per-codex and corpus batch driver
//! - [`output`]: YAML, JSON lines and script output
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod corrector;
pub mod error;
pub mod graph;
pub mod holmes;
pub mod markup;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod references;
pub mod resolver;
pub mod retrieval;
pub mod splitting;
pub mod types;

// Re-export main functions
pub use pipeline::{build_corpus, structure_codex, structure_text};

// Re-export commonly used items
pub use config::{validate_codex_id, Settings};
pub use error::{Result, StructurerError};
pub use model::{Document, StructuralUnit, UnitBody};
pub use types::{Chunk, ChunkMetadata, Reference, UnitKind};
