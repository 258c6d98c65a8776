//! Header scheme registry.

use std::collections::HashMap;

use super::types::{parse_header, HeaderLine, HeaderSpec};

/// Registry of header specifications for one splitting scheme.
#[derive(Debug, Clone, Default)]
pub struct HeaderRegistry {
    specs: HashMap<usize, HeaderSpec>,
    resolve_links: bool,
}

impl HeaderRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a header specification.
    pub fn register(&mut self, spec: HeaderSpec) {
        self.specs.insert(spec.depth, spec);
    }

    /// Replace inline links by their anchor text in content lines.
    #[must_use]
    pub fn with_resolved_links(mut self, resolve: bool) -> Self {
        self.resolve_links = resolve;
        self
    }

    /// Whether content lines have their links resolved.
    #[must_use]
    pub fn resolves_links(&self) -> bool {
        self.resolve_links
    }

    /// Get the specification for a marker depth.
    #[must_use]
    pub fn get_spec(&self, depth: usize) -> Option<&HeaderSpec> {
        self.specs.get(&depth)
    }

    /// Recognise a header line of this scheme.
    ///
    /// Lines with an unregistered marker depth are content.
    #[must_use]
    pub fn match_header(&self, line: &str) -> Option<HeaderLine<'_>> {
        let (depth, title) = parse_header(line)?;
        let spec = self.get_spec(depth)?;
        Some(HeaderLine {
            spec,
            title: title.to_string(),
        })
    }
}
