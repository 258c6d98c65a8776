//! Markup stage: turn raw codex lines into explicitly headed markdown.

mod classifier;
mod ordinal;

pub use classifier::{clean_headers, clean_line, Classification, HeaderClassifier};
pub use ordinal::{paragraph_ordinal, rus_ordinal, subparagraph_ordinal};
