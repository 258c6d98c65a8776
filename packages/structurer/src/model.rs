//! Structural model of a codex.
//!
//! A document is the ordered set of units recovered from one codex: its
//! codex root, the articles, paragraphs and subparagraphs below it. Every
//! unit knows its parent and its previous sibling by identifier, which is
//! all the graph compiler needs to lay out `PART_OF` and `NEXT` edges.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::config::{Settings, CODEX_NAME_SUFFIX};
use crate::error::Result;
use crate::graph::PropertyValue;
use crate::references::extract_references;
use crate::resolver::{resolve, resolve_at, ResolvedId};
use crate::types::{Chunk, Reference, UnitKind};

/// Body of a paragraph or subparagraph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Clause {
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<Reference>,
}

impl Clause {
    /// Whether the text contains at least one link.
    #[must_use]
    pub fn has_reference(&self) -> bool {
        !self.references.is_empty()
    }

    fn absorb(&mut self, other: Clause) {
        if self.text.is_empty() {
            self.text = other.text;
        } else if !other.text.is_empty() {
            self.text.push('\n');
            self.text.push_str(&other.text);
        }
        self.references.extend(other.references);
    }
}

/// Kind-specific payload of a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum UnitBody {
    Codex {
        name: String,
    },
    Article {
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
    Paragraph(Clause),
    Subparagraph(Clause),
}

/// A node of the Codex → Article → Paragraph → Subparagraph hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuralUnit {
    pub identifier: String,
    pub predecessor: Option<String>,
    pub parent: Option<String>,
    #[serde(flatten)]
    pub body: UnitBody,
}

impl StructuralUnit {
    /// The codex root unit.
    #[must_use]
    pub fn codex(codex: &str) -> Self {
        Self {
            identifier: codex.to_string(),
            predecessor: None,
            parent: None,
            body: UnitBody::Codex {
                name: format!("{codex}{CODEX_NAME_SUFFIX}"),
            },
        }
    }

    fn from_resolved(id: ResolvedId, body: UnitBody) -> Self {
        Self {
            identifier: id.identifier,
            predecessor: id.predecessor,
            parent: id.parent,
            body,
        }
    }

    #[must_use]
    pub fn kind(&self) -> UnitKind {
        match self.body {
            UnitBody::Codex { .. } => UnitKind::Codex,
            UnitBody::Article { .. } => UnitKind::Article,
            UnitBody::Paragraph(_) => UnitKind::Paragraph,
            UnitBody::Subparagraph(_) => UnitKind::Subparagraph,
        }
    }

    /// Searchable text: the title for codex and article, the body otherwise.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            UnitBody::Codex { name } => Some(name.as_str()),
            UnitBody::Article { name, text } => text.as_deref().or(name.as_deref()),
            UnitBody::Paragraph(clause) | UnitBody::Subparagraph(clause) => {
                Some(clause.text.as_str())
            }
        }
    }

    /// References found in the unit text.
    #[must_use]
    pub fn references(&self) -> &[Reference] {
        match &self.body {
            UnitBody::Paragraph(clause) | UnitBody::Subparagraph(clause) => &clause.references,
            UnitBody::Codex { .. } | UnitBody::Article { .. } => &[],
        }
    }

    /// Node properties, excluding the identifier and the relationship fields.
    #[must_use]
    pub fn properties(&self) -> Vec<(String, PropertyValue)> {
        let mut properties = Vec::new();
        match &self.body {
            UnitBody::Codex { name } => properties.push(("name".to_string(), name.as_str().into())),
            UnitBody::Article { name, text } => {
                if let Some(name) = name {
                    properties.push(("name".to_string(), name.as_str().into()));
                }
                if let Some(text) = text {
                    properties.push(("text".to_string(), text.as_str().into()));
                }
            }
            UnitBody::Paragraph(clause) | UnitBody::Subparagraph(clause) => {
                properties.push(("text".to_string(), clause.text.as_str().into()));
                properties.push(("has_reference".to_string(), clause.has_reference().into()));
            }
        }
        properties
    }

    fn absorb(&mut self, body: UnitBody) {
        match (&mut self.body, body) {
            (UnitBody::Article { text, .. }, UnitBody::Article { text: Some(more), .. }) => {
                *text = Some(match text.take() {
                    Some(existing) => format!("{existing}\n{more}"),
                    None => more,
                });
            }
            (UnitBody::Paragraph(clause), UnitBody::Paragraph(more))
            | (UnitBody::Subparagraph(clause), UnitBody::Subparagraph(more)) => clause.absorb(more),
            _ => {}
        }
    }
}

/// All units of one codex, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub codex: String,
    pub units: Vec<StructuralUnit>,
    #[serde(skip)]
    pub warnings: Vec<String>,
}

impl Document {
    /// Look up a unit by kind and identifier.
    ///
    /// Identifiers alone are ambiguous: article `15.1` and paragraph 1 of
    /// article 15 both resolve to `<codex>.15.1`.
    #[must_use]
    pub fn get(&self, kind: UnitKind, identifier: &str) -> Option<&StructuralUnit> {
        self.units
            .iter()
            .find(|unit| unit.kind() == kind && unit.identifier == identifier)
    }

    /// The unit a unit is `PART_OF`, if any.
    #[must_use]
    pub fn parent_of(&self, unit: &StructuralUnit) -> Option<&StructuralUnit> {
        let kind = unit.kind().parent_kind()?;
        self.get(kind, unit.parent.as_deref()?)
    }

    /// Units of one kind, in document order.
    pub fn units_of(&self, kind: UnitKind) -> impl Iterator<Item = &StructuralUnit> {
        self.units.iter().filter(move |unit| unit.kind() == kind)
    }
}

/// Builds a [`Document`] from corrected chunks.
///
/// Articles are materialized on first sight. A subparagraph whose paragraph
/// has no chunk of its own gets an empty paragraph stub. Chunks that resolve
/// to a unit of the same kind and identifier are merged into it.
pub struct DocumentBuilder<'a> {
    settings: &'a Settings,
    document: Document,
    index: HashMap<(UnitKind, String), usize>,
}

impl<'a> DocumentBuilder<'a> {
    /// Start a document with its codex root.
    #[must_use]
    pub fn new(codex: &str, settings: &'a Settings) -> Self {
        let mut builder = Self {
            settings,
            document: Document {
                codex: codex.to_string(),
                ..Document::default()
            },
            index: HashMap::new(),
        };
        builder.upsert(StructuralUnit::codex(codex));
        builder
    }

    /// Add one chunk.
    pub fn push(&mut self, chunk: &Chunk) -> Result<()> {
        let Some(title) = chunk.metadata.article.as_deref() else {
            tracing::warn!(content = %chunk.content, "Chunk outside any article, skipping");
            self.document
                .warnings
                .push(format!("chunk outside any article skipped: '{}'", chunk.content));
            return Ok(());
        };

        let id = resolve(&chunk.metadata)?;

        let article = resolve_at(&chunk.metadata, UnitKind::Article)?;
        self.upsert(StructuralUnit::from_resolved(
            article,
            UnitBody::Article {
                name: Some(title.to_string()),
                text: None,
            },
        ));

        match id.kind {
            UnitKind::Codex => {}
            UnitKind::Article => self.upsert(StructuralUnit::from_resolved(
                id,
                UnitBody::Article {
                    name: Some(title.to_string()),
                    text: Some(chunk.content.clone()),
                },
            )),
            UnitKind::Paragraph => {
                let clause = self.clause(&chunk.content);
                self.upsert(StructuralUnit::from_resolved(id, UnitBody::Paragraph(clause)));
            }
            UnitKind::Subparagraph => {
                let paragraph = resolve_at(&chunk.metadata, UnitKind::Paragraph)?;
                let key = (UnitKind::Paragraph, paragraph.identifier.clone());
                if !self.index.contains_key(&key) {
                    tracing::warn!(identifier = %paragraph.identifier, "Materializing missing paragraph");
                    self.upsert(StructuralUnit::from_resolved(
                        paragraph,
                        UnitBody::Paragraph(Clause::default()),
                    ));
                }
                let clause = self.clause(&chunk.content);
                self.upsert(StructuralUnit::from_resolved(id, UnitBody::Subparagraph(clause)));
            }
        }

        Ok(())
    }

    /// Close sibling order and return the document.
    ///
    /// A predecessor that names no unit of the same kind is cleared.
    #[must_use]
    pub fn finish(mut self) -> Document {
        let known: HashSet<(UnitKind, &str)> = self
            .index
            .keys()
            .map(|(kind, identifier)| (*kind, identifier.as_str()))
            .collect();

        for unit in &mut self.document.units {
            let Some(predecessor) = unit.predecessor.as_deref() else {
                continue;
            };
            if !known.contains(&(unit.kind(), predecessor)) {
                tracing::debug!(
                    identifier = %unit.identifier,
                    predecessor = %predecessor,
                    "Predecessor not in document, clearing"
                );
                self.document.warnings.push(format!(
                    "{}: predecessor {predecessor} not found",
                    unit.identifier
                ));
                unit.predecessor = None;
            }
        }

        self.document
    }

    fn clause(&self, content: &str) -> Clause {
        let linked = extract_references(
            content,
            self.settings.data.clean_text_from_links,
            &self.settings.data.link_placeholder,
        );
        Clause {
            text: linked.text,
            references: linked.references,
        }
    }

    fn upsert(&mut self, unit: StructuralUnit) {
        let key = (unit.kind(), unit.identifier.clone());
        if let Some(&position) = self.index.get(&key) {
            self.document.units[position].absorb(unit.body);
            return;
        }

        self.index.insert(key, self.document.units.len());
        self.document.units.push(unit);
    }
}

/// Build a document from corrected chunks.
pub fn build_document(codex: &str, chunks: &[Chunk], settings: &Settings) -> Result<Document> {
    let mut builder = DocumentBuilder::new(codex, settings);
    for chunk in chunks {
        builder.push(chunk)?;
    }
    Ok(builder.finish())
}
