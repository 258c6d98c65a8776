//! Compile structural units into graph commands.

use super::command::GraphCommand;
use crate::config::Settings;
use crate::model::{Document, StructuralUnit};

/// Commands for one unit: node upsert, sibling edge, containment edge.
///
/// The sibling edge is emitted only with a predecessor; the containment
/// edge is omitted for the codex root.
#[must_use]
pub fn compile_unit(unit: &StructuralUnit) -> Vec<GraphCommand> {
    let kind = unit.kind();
    let mut commands = vec![GraphCommand::MergeNode {
        kind,
        number: unit.identifier.clone(),
        properties: unit.properties(),
    }];

    if let Some(predecessor) = &unit.predecessor {
        commands.push(GraphCommand::MergeNext {
            kind,
            from: predecessor.clone(),
            to: unit.identifier.clone(),
        });
    }

    if let (Some(parent), Some(parent_kind)) = (&unit.parent, kind.parent_kind()) {
        commands.push(GraphCommand::MergePartOf {
            kind,
            number: unit.identifier.clone(),
            parent_kind,
            parent: parent.clone(),
        });
    }

    commands
}

/// Commands for every unit of a document, in document order.
#[must_use]
pub fn compile_document(document: &Document) -> Vec<GraphCommand> {
    document.units.iter().flat_map(compile_unit).collect()
}

/// Commands that reset the store before a rebuild.
#[must_use]
pub fn corpus_prologue(settings: &Settings) -> Vec<GraphCommand> {
    vec![
        GraphCommand::DropVectorIndex {
            name: settings.data.index_name.clone(),
        },
        GraphCommand::ClearGraph,
    ]
}

/// Commands that label and index the rebuilt graph.
#[must_use]
pub fn corpus_epilogue(settings: &Settings) -> Vec<GraphCommand> {
    vec![
        GraphCommand::UnionLabel {
            label: settings.data.embeddings_label.clone(),
        },
        GraphCommand::CreateVectorIndex {
            name: settings.data.index_name.clone(),
            label: settings.data.embeddings_label.clone(),
            property: settings.data.embeddings_parameter.clone(),
            dimension: settings.models.embeddings_dimension,
            similarity: settings.models.similarity_function,
        },
    ]
}

/// Whole from-scratch rebuild script for a corpus.
#[must_use]
pub fn compile_corpus(documents: &[Document], settings: &Settings) -> Vec<GraphCommand> {
    let mut commands = corpus_prologue(settings);
    for document in documents {
        commands.extend(compile_document(document));
    }
    commands.extend(corpus_epilogue(settings));
    commands
}
