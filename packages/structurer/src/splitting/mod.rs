//! Header splitting system for marked-up codex text.
//!
//! This module partitions a classified codex on its `#`/`##`/`###` headers
//! into ordered chunks that carry the Article/Paragraph/Subparagraph titles
//! in effect.

mod config;
mod engine;
mod registry;
mod strategy;
mod types;

pub use config::{create_holmes_scheme, create_standard_scheme};
pub use engine::SplitEngine;
pub use registry::HeaderRegistry;
pub use strategy::{ChunkStrategy, LineChunkStrategy, SectionChunkStrategy};
pub use types::{parse_header, HeaderLine, HeaderSpec};
