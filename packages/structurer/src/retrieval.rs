//! Retrieval query templates.
//!
//! A vector search returns seed nodes with a similarity score; the templates
//! expand every seed into a passage from its graph neighbourhood. Each
//! template exists as a Cypher retrieval query, to be appended to the
//! store's vector search, and as an in-memory expansion over a
//! [`GraphView`].

use std::collections::HashMap;

use serde::Serialize;

use crate::graph::{NEXT_RELATION, PART_OF_RELATION};
use crate::holmes::Triplet;
use crate::model::Document;
use crate::types::UnitKind;

/// Cypher retrieval query for the hierarchical graph.
///
/// Expects `node` and `score` bound by the vector search. Returns `text`,
/// `score` and `source` (the unit identifier).
#[must_use]
pub fn hierarchical_query(top_k: usize) -> String {
    format!(
        "WITH node, score ORDER BY score DESC LIMIT {top_k}
OPTIONAL MATCH (child)-[:{PART_OF_RELATION}]->(node)
WITH node, score, collect(coalesce(child.text, child.name)) AS children
OPTIONAL MATCH (prev)-[:{NEXT_RELATION}]->(node)
OPTIONAL MATCH (node)-[:{NEXT_RELATION}]->(next)
WITH node, score, children,
     [t IN [coalesce(prev.text, prev.name), coalesce(node.text, node.name)] + children + [coalesce(next.text, next.name)] WHERE t IS NOT NULL] AS parts
RETURN reduce(acc = head(parts), t IN tail(parts) | acc + '\\n' + t) AS text, score, node.number AS source"
    )
}

/// Cypher retrieval query for the triplet graph.
///
/// Every relationship touching the entity becomes one fact line, written in
/// its stored direction. Returns `text`, `score` and `source` (the entity
/// name); an entity without relationships yields empty text.
#[must_use]
pub fn triplet_query(top_k: usize) -> String {
    format!(
        "WITH node, score ORDER BY score DESC LIMIT {top_k}
OPTIONAL MATCH (node)-[r]-(neighbor)
WITH node, score, collect(CASE WHEN startNode(r) = node
    THEN node.name + ' -' + type(r) + '-> ' + neighbor.name
    ELSE neighbor.name + ' -' + type(r) + '-> ' + node.name END) AS facts
RETURN coalesce(reduce(acc = head(facts), f IN tail(facts) | acc + '\\n' + f), '') AS text, score, node.name AS source"
    )
}

/// Read access to a property graph.
pub trait GraphView {
    /// Text of a node, if the node exists and has any.
    fn text(&self, node: &str) -> Option<&str>;

    /// Outgoing edges of a node as `(relation, target)`, in insertion order.
    fn outgoing(&self, node: &str) -> Vec<(&str, &str)>;

    /// Incoming edges of a node as `(relation, source)`, in insertion order.
    fn incoming(&self, node: &str) -> Vec<(&str, &str)>;
}

/// A vector search hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Seed {
    pub node: String,
    pub score: f64,
}

impl Seed {
    #[must_use]
    pub fn new(node: impl Into<String>, score: f64) -> Self {
        Self {
            node: node.into(),
            score,
        }
    }
}

/// An expanded retrieval result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Passage {
    pub text: String,
    pub score: f64,
    pub source: String,
}

/// Keep the `top_k` best seeds, best first. Ties keep input order.
#[must_use]
pub fn top_seeds(mut seeds: Vec<Seed>, top_k: usize) -> Vec<Seed> {
    seeds.sort_by(|a, b| b.score.total_cmp(&a.score));
    seeds.truncate(top_k);
    seeds
}

/// Expand seeds of the hierarchical graph.
///
/// The passage is the previous sibling, the node itself, its children and
/// the next sibling, newline-joined; missing parts are left out.
pub fn expand_hierarchical<G: GraphView>(graph: &G, seeds: Vec<Seed>, top_k: usize) -> Vec<Passage> {
    top_seeds(seeds, top_k)
        .into_iter()
        .map(|seed| {
            let node = seed.node.as_str();
            let prev = related(graph.incoming(node), NEXT_RELATION).next();
            let next = related(graph.outgoing(node), NEXT_RELATION).next();
            let children: Vec<&str> = related(graph.incoming(node), PART_OF_RELATION).collect();

            let text = prev
                .into_iter()
                .chain(std::iter::once(node))
                .chain(children)
                .chain(next)
                .filter_map(|id| graph.text(id))
                .collect::<Vec<_>>()
                .join("\n");

            Passage {
                text,
                score: seed.score,
                source: seed.node,
            }
        })
        .collect()
}

/// Expand seeds of the triplet graph into "subject -RELATION-> object" lines.
///
/// Outgoing facts come first, then the facts where the seed is the object.
pub fn expand_triplets<G: GraphView>(graph: &G, seeds: Vec<Seed>, top_k: usize) -> Vec<Passage> {
    top_seeds(seeds, top_k)
        .into_iter()
        .map(|seed| {
            let node = seed.node.as_str();
            let outgoing = graph
                .outgoing(node)
                .into_iter()
                .map(|(relation, neighbor)| format!("{node} -{relation}-> {neighbor}"));
            let incoming = graph
                .incoming(node)
                .into_iter()
                .map(|(relation, neighbor)| format!("{neighbor} -{relation}-> {node}"));
            let text = outgoing.chain(incoming).collect::<Vec<_>>().join("\n");

            Passage {
                text,
                score: seed.score,
                source: seed.node,
            }
        })
        .collect()
}

fn related<'a>(
    edges: Vec<(&'a str, &'a str)>,
    relation: &'a str,
) -> impl Iterator<Item = &'a str> {
    edges
        .into_iter()
        .filter(move |(r, _)| *r == relation)
        .map(|(_, node)| node)
}

#[derive(Debug, Clone)]
struct Edge {
    from: String,
    relation: String,
    to: String,
}

/// Node key of a structural unit in a [`MemoryGraph`], e.g. `Article:149.15.1`.
///
/// Stored nodes are identified by label and number together, so the key
/// carries both.
#[must_use]
pub fn node_key(kind: UnitKind, identifier: &str) -> String {
    format!("{}:{identifier}", kind.as_str())
}

/// In-memory graph built from compiled units or triplets.
#[derive(Debug, Clone, Default)]
pub struct MemoryGraph {
    texts: HashMap<String, String>,
    edges: Vec<Edge>,
}

impl MemoryGraph {
    /// Graph of structural units keyed by [`node_key`].
    #[must_use]
    pub fn from_documents(documents: &[Document]) -> Self {
        let mut graph = Self::default();
        for unit in documents.iter().flat_map(|d| &d.units) {
            let kind = unit.kind();
            let key = node_key(kind, &unit.identifier);
            if let Some(text) = unit.text() {
                graph.texts.insert(key.clone(), text.to_string());
            }
            if let Some(predecessor) = &unit.predecessor {
                graph.add_edge(&node_key(kind, predecessor), NEXT_RELATION, &key);
            }
            if let (Some(parent), Some(parent_kind)) = (&unit.parent, kind.parent_kind()) {
                graph.add_edge(&key, PART_OF_RELATION, &node_key(parent_kind, parent));
            }
        }
        graph
    }

    /// Graph of entities keyed by name.
    #[must_use]
    pub fn from_triplets(triplets: &[Triplet]) -> Self {
        let mut graph = Self::default();
        for triplet in triplets {
            for name in [&triplet.subject, &triplet.object] {
                graph.texts.insert(name.clone(), name.clone());
            }
            graph.add_edge(&triplet.subject, &triplet.relation, &triplet.object);
        }
        graph
    }

    fn add_edge(&mut self, from: &str, relation: &str, to: &str) {
        let exists = self
            .edges
            .iter()
            .any(|e| e.from == from && e.relation == relation && e.to == to);
        if !exists {
            self.edges.push(Edge {
                from: from.to_string(),
                relation: relation.to_string(),
                to: to.to_string(),
            });
        }
    }
}

impl GraphView for MemoryGraph {
    fn text(&self, node: &str) -> Option<&str> {
        self.texts.get(node).map(String::as_str)
    }

    fn outgoing(&self, node: &str) -> Vec<(&str, &str)> {
        self.edges
            .iter()
            .filter(|e| e.from == node)
            .map(|e| (e.relation.as_str(), e.to.as_str()))
            .collect()
    }

    fn incoming(&self, node: &str) -> Vec<(&str, &str)> {
        self.edges
            .iter()
            .filter(|e| e.to == node)
            .map(|e| (e.relation.as_str(), e.from.as_str()))
            .collect()
    }
}
