//! Header schemes for the two graph schemas.

use super::registry::HeaderRegistry;
use super::types::HeaderSpec;
use crate::types::UnitKind;

/// Create the three-level scheme used by the hierarchical graph.
///
/// ```text
/// #   Статья 5. Название      -> article title
/// ##  Пункт 2                 -> paragraph title
/// ### Подпункт 1              -> subparagraph title
/// ```
#[must_use]
pub fn create_standard_scheme() -> HeaderRegistry {
    let mut registry = HeaderRegistry::new();

    registry.register(HeaderSpec::new(1, UnitKind::Article));
    registry.register(HeaderSpec::new(2, UnitKind::Paragraph));
    registry.register(HeaderSpec::new(3, UnitKind::Subparagraph));

    registry
}

/// Create the two-level scheme used for triplet extraction chunks.
///
/// Subparagraph headers are dropped so that a paragraph and its
/// enumeration stay in one chunk, and links are reduced to their anchors.
#[must_use]
pub fn create_holmes_scheme() -> HeaderRegistry {
    let mut registry = HeaderRegistry::new().with_resolved_links(true);

    registry.register(HeaderSpec::new(1, UnitKind::Article));
    registry.register(HeaderSpec::new(2, UnitKind::Paragraph));
    registry.register(HeaderSpec::new(3, UnitKind::Subparagraph).with_stripped(true));

    registry
}
