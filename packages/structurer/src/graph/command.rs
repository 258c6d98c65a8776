//! Typed graph commands and their Cypher rendering.

use std::fmt;

use crate::config::SimilarityFunction;
use crate::types::UnitKind;

/// Relationship from a unit to its next sibling.
pub const NEXT_RELATION: &str = "NEXT";

/// Relationship from a unit to the unit that contains it.
pub const PART_OF_RELATION: &str = "PART_OF";

/// Scalar value of a node property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Text(String),
    Bool(bool),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "\"{}\"", escape(s)),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// One idempotent write against the property graph.
///
/// `Display` renders the command as a single Cypher statement without the
/// terminating semicolon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphCommand {
    /// Upsert a unit node by number and set its properties.
    MergeNode {
        kind: UnitKind,
        number: String,
        properties: Vec<(String, PropertyValue)>,
    },

    /// Upsert both siblings and the `NEXT` edge between them.
    MergeNext {
        kind: UnitKind,
        from: String,
        to: String,
    },

    /// Upsert a unit, its parent and the `PART_OF` edge.
    MergePartOf {
        kind: UnitKind,
        number: String,
        parent_kind: UnitKind,
        parent: String,
    },

    /// Add a shared label to every indexable unit.
    UnionLabel { label: String },

    /// Upsert two entities and a typed relationship.
    MergeTriplet {
        subject: String,
        relation: String,
        object: String,
    },

    /// Remove every node and relationship.
    ClearGraph,

    /// Drop a vector index when it exists.
    DropVectorIndex { name: String },

    /// Create a vector index over one property of a label.
    CreateVectorIndex {
        name: String,
        label: String,
        property: String,
        dimension: usize,
        similarity: SimilarityFunction,
    },
}

impl fmt::Display for GraphCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MergeNode {
                kind,
                number,
                properties,
            } => {
                write!(f, "MERGE (n:{kind} {{number: \"{}\"}})", escape(number))?;
                for (i, (name, value)) in properties.iter().enumerate() {
                    let keyword = if i == 0 { " SET" } else { "," };
                    write!(f, "{keyword} n.{name} = {value}")?;
                }
                Ok(())
            }
            Self::MergeNext { kind, from, to } => write!(
                f,
                "MERGE (a:{kind} {{number: \"{}\"}}) MERGE (b:{kind} {{number: \"{}\"}}) MERGE (a)-[:{NEXT_RELATION}]->(b)",
                escape(from),
                escape(to)
            ),
            Self::MergePartOf {
                kind,
                number,
                parent_kind,
                parent,
            } => write!(
                f,
                "MERGE (a:{kind} {{number: \"{}\"}}) MERGE (b:{parent_kind} {{number: \"{}\"}}) MERGE (a)-[:{PART_OF_RELATION}]->(b)",
                escape(number),
                escape(parent)
            ),
            Self::UnionLabel { label } => {
                let labels = UnitKind::INDEXABLE.map(|k| k.as_str()).join("|");
                write!(f, "MATCH (n:{labels}) SET n:{label}")
            }
            Self::MergeTriplet {
                subject,
                relation,
                object,
            } => write!(
                f,
                "MERGE (a:{entity} {{name: \"{}\"}}) MERGE (b:{entity} {{name: \"{}\"}}) MERGE (a)-[:`{relation}`]->(b)",
                escape(subject),
                escape(object),
                entity = crate::config::ENTITY_LABEL,
            ),
            Self::ClearGraph => f.write_str("MATCH (n) DETACH DELETE n"),
            Self::DropVectorIndex { name } => write!(f, "DROP INDEX `{name}` IF EXISTS"),
            Self::CreateVectorIndex {
                name,
                label,
                property,
                dimension,
                similarity,
            } => write!(
                f,
                "CREATE VECTOR INDEX `{name}` IF NOT EXISTS FOR (n:{label}) ON (n.{property}) \
                 OPTIONS {{indexConfig: {{`vector.dimensions`: {dimension}, `vector.similarity_function`: '{}'}}}}",
                similarity.as_str()
            ),
        }
    }
}

/// Render commands as a script, one statement per line.
#[must_use]
pub fn render_script(commands: &[GraphCommand]) -> String {
    commands.iter().map(|command| format!("{command};\n")).collect()
}

/// Escape a value for a double-quoted Cypher string literal.
#[must_use]
pub fn escape(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_merge_node_with_properties() {
        let command = GraphCommand::MergeNode {
            kind: UnitKind::Paragraph,
            number: "149.5.1".to_string(),
            properties: vec![
                ("text".to_string(), "1. Текст.".into()),
                ("has_reference".to_string(), false.into()),
            ],
        };
        assert_eq!(
            command.to_string(),
            "MERGE (n:Paragraph {number: \"149.5.1\"}) SET n.text = \"1. Текст.\", n.has_reference = false"
        );
    }

    #[test]
    fn test_merge_node_without_properties() {
        let command = GraphCommand::MergeNode {
            kind: UnitKind::Codex,
            number: "149".to_string(),
            properties: Vec::new(),
        };
        assert_eq!(command.to_string(), "MERGE (n:Codex {number: \"149\"})");
    }

    #[test]
    fn test_merge_next() {
        let command = GraphCommand::MergeNext {
            kind: UnitKind::Subparagraph,
            from: "149.5.2.1".to_string(),
            to: "149.5.2.2".to_string(),
        };
        assert_eq!(
            command.to_string(),
            "MERGE (a:Subparagraph {number: \"149.5.2.1\"}) MERGE (b:Subparagraph {number: \"149.5.2.2\"}) MERGE (a)-[:NEXT]->(b)"
        );
    }

    #[test]
    fn test_merge_part_of() {
        let command = GraphCommand::MergePartOf {
            kind: UnitKind::Article,
            number: "149.5".to_string(),
            parent_kind: UnitKind::Codex,
            parent: "149".to_string(),
        };
        assert_eq!(
            command.to_string(),
            "MERGE (a:Article {number: \"149.5\"}) MERGE (b:Codex {number: \"149\"}) MERGE (a)-[:PART_OF]->(b)"
        );
    }

    #[test]
    fn test_union_label() {
        let command = GraphCommand::UnionLabel {
            label: "Embeddable".to_string(),
        };
        assert_eq!(
            command.to_string(),
            "MATCH (n:Article|Paragraph|Subparagraph) SET n:Embeddable"
        );
    }

    #[test]
    fn test_merge_triplet() {
        let command = GraphCommand::MergeTriplet {
            subject: "оператор".to_string(),
            relation: "PROCESSES".to_string(),
            object: "персональные данные".to_string(),
        };
        assert_eq!(
            command.to_string(),
            "MERGE (a:Entity {name: \"оператор\"}) MERGE (b:Entity {name: \"персональные данные\"}) MERGE (a)-[:`PROCESSES`]->(b)"
        );
    }

    #[test]
    fn test_vector_index_commands() {
        let create = GraphCommand::CreateVectorIndex {
            name: "node-embeddings".to_string(),
            label: "Embeddable".to_string(),
            property: "embedding".to_string(),
            dimension: 768,
            similarity: SimilarityFunction::Cosine,
        };
        assert_eq!(
            create.to_string(),
            "CREATE VECTOR INDEX `node-embeddings` IF NOT EXISTS FOR (n:Embeddable) ON (n.embedding) \
             OPTIONS {indexConfig: {`vector.dimensions`: 768, `vector.similarity_function`: 'cosine'}}"
        );

        let drop = GraphCommand::DropVectorIndex {
            name: "node-embeddings".to_string(),
        };
        assert_eq!(drop.to_string(), "DROP INDEX `node-embeddings` IF EXISTS");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"a "b" \c"#), r#"a \"b\" \\c"#);
        assert_eq!(escape("строка\nдва"), "строка\\nдва");
        assert_eq!(PropertyValue::from("x\"y").to_string(), "\"x\\\"y\"");
    }

    #[test]
    fn test_render_script() {
        let script = render_script(&[
            GraphCommand::ClearGraph,
            GraphCommand::UnionLabel {
                label: "L".to_string(),
            },
        ]);
        assert_eq!(
            script,
            "MATCH (n) DETACH DELETE n;\nMATCH (n:Article|Paragraph|Subparagraph) SET n:L;\n"
        );
    }
}
