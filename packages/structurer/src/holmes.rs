//! Entity-relation triplets for the Holmes graph.
//!
//! Triplets come from a language model prompted with one chunk at a time,
//! so their shape is only loosely guaranteed. Parsing keeps every entry that
//! has a usable subject, relation and object and reports the rest.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::graph::GraphCommand;

/// One `(subject, relation, object)` fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triplet {
    pub subject: String,
    pub relation: String,
    pub object: String,
}

impl Triplet {
    /// Create a triplet with the relation normalized.
    ///
    /// Returns `None` when any part is blank after normalization.
    #[must_use]
    pub fn new(subject: &str, relation: &str, object: &str) -> Option<Self> {
        let subject = subject.trim();
        let object = object.trim();
        let relation = normalize_relation(relation);

        if subject.is_empty() || object.is_empty() || relation.is_empty() {
            return None;
        }

        Some(Self {
            subject: subject.to_string(),
            relation,
            object: object.to_string(),
        })
    }
}

/// Parsed triplets plus a note for every entry that was skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripletSet {
    pub triplets: Vec<Triplet>,
    pub warnings: Vec<String>,
}

/// Turn a free-form relation into a relationship type.
///
/// Spaces, slashes and dashes become underscores; commas and parentheses are
/// dropped; the result is upper-case. Any other character that is neither
/// alphanumeric nor an underscore is removed.
///
/// # Examples
/// ```
/// use lawgraph_structurer::holmes::normalize_relation;
///
/// assert_eq!(normalize_relation("was re-built in"), "WAS_RE_BUILT_IN");
/// assert_eq!(normalize_relation("founded by (co)"), "FOUNDED_BY_CO");
/// ```
#[must_use]
pub fn normalize_relation(relation: &str) -> String {
    relation
        .trim()
        .chars()
        .filter_map(|c| match c {
            ' ' | '/' | '-' => Some('_'),
            c if c.is_alphanumeric() || c == '_' => Some(c),
            _ => None,
        })
        .flat_map(char::to_uppercase)
        .collect()
}

/// Parse model output: a JSON array of triplet objects.
///
/// Nested arrays (one array per chunk) are flattened. Entries that are not
/// objects or lack a string field are skipped with a warning.
pub fn parse_triplets(json: &str) -> Result<TripletSet> {
    let value: Value = serde_json::from_str(json)?;
    let mut set = TripletSet::default();
    collect(&value, &mut set);
    Ok(set)
}

fn collect(value: &Value, set: &mut TripletSet) {
    match value {
        Value::Array(items) => items.iter().for_each(|item| collect(item, set)),
        Value::Object(map) => {
            let field = |name: &str| map.get(name).and_then(Value::as_str);
            match (field("subject"), field("relation"), field("object")) {
                (Some(subject), Some(relation), Some(object)) => {
                    match Triplet::new(subject, relation, object) {
                        Some(triplet) => set.triplets.push(triplet),
                        None => skip(set, value),
                    }
                }
                _ => skip(set, value),
            }
        }
        _ => skip(set, value),
    }
}

fn skip(set: &mut TripletSet, value: &Value) {
    tracing::warn!(entry = %value, "Skipping malformed triplet");
    set.warnings.push(format!("malformed triplet skipped: {value}"));
}

/// Compile triplets into entity upserts.
#[must_use]
pub fn compile_triplets(triplets: &[Triplet]) -> Vec<GraphCommand> {
    triplets
        .iter()
        .map(|t| GraphCommand::MergeTriplet {
            subject: t.subject.clone(),
            relation: t.relation.clone(),
            object: t.object.clone(),
        })
        .collect()
}
