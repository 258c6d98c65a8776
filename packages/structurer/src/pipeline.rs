//! Batch pipeline that ties all stages together.
//!
//! ```text
//! raw lines -> HeaderClassifier -> SplitEngine -> start chunk -> corrector
//!           -> DocumentBuilder -> graph compiler
//! ```
//!
//! Codices are processed one at a time in sorted order; nothing is shared
//! between them except the settings.

use std::fs;
use std::path::PathBuf;

use crate::config::{validate_codex_id, Settings};
use crate::corrector::correct;
use crate::error::{Result, StructurerError};
use crate::graph::{compile_corpus, GraphCommand};
use crate::markup::HeaderClassifier;
use crate::model::{build_document, Document};
use crate::splitting::{
    create_holmes_scheme, create_standard_scheme, LineChunkStrategy, SectionChunkStrategy,
    SplitEngine,
};
use crate::types::Chunk;

/// Result of a whole-corpus build.
#[derive(Debug, Clone)]
pub struct Corpus {
    /// One document per codex, in codex order.
    pub documents: Vec<Document>,

    /// Rebuild script: reset, per-codex units, label union, vector index.
    pub commands: Vec<GraphCommand>,

    /// Non-fatal issues from every stage, prefixed with the codex id.
    pub warnings: Vec<String>,
}

/// Chunks of one codex prepared for triplet extraction.
#[derive(Debug, Clone)]
pub struct HolmesChunks {
    pub chunks: Vec<Chunk>,

    /// Classifier warnings.
    pub warnings: Vec<String>,
}

/// Classified markup written for one codex.
#[derive(Debug, Clone)]
pub struct Markup {
    /// Where the markup was written.
    pub path: PathBuf,

    /// Classifier warnings.
    pub warnings: Vec<String>,
}

/// Codex ids present in the corpus folder, sorted.
///
/// Every sub-folder whose name is a valid codex id counts; other entries
/// are ignored.
pub fn list_codexes(settings: &Settings) -> Result<Vec<String>> {
    let folder = &settings.documents.path_to_folder;
    let mut codexes = Vec::new();

    for entry in fs::read_dir(folder).map_err(|e| {
        StructurerError::Io(std::io::Error::new(
            e.kind(),
            format!("Cannot read corpus folder {}: {e}", folder.display()),
        ))
    })? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if validate_codex_id(&name).is_ok() {
            codexes.push(name);
        } else {
            tracing::debug!(folder = %name, "Ignoring non-codex folder");
        }
    }

    codexes.sort_by(|a, b| natural_key(a).cmp(&natural_key(b)));
    Ok(codexes)
}

/// Numeric codex order: "9" before "149".
fn natural_key(codex: &str) -> (usize, &str) {
    (codex.len(), codex)
}

/// Read the raw markdown of a codex.
pub fn read_codex(settings: &Settings, codex: &str) -> Result<String> {
    validate_codex_id(codex)?;
    let path = settings.documents.md(codex);
    if !path.is_file() {
        return Err(StructurerError::MissingDocument {
            codex: codex.to_string(),
            path,
        });
    }
    Ok(fs::read_to_string(path)?)
}

/// Classified lines of a document and the classifier warnings.
fn classify(text: &str, settings: &Settings) -> (Vec<String>, Vec<String>) {
    let classification = HeaderClassifier::from_settings(settings).classify(text.lines());
    (classification.lines, classification.warnings)
}

fn skip_start(codex: &str, chunks: Vec<Chunk>, settings: &Settings) -> Vec<Chunk> {
    let start = settings.data.start_chunk_for(codex);
    if start > 0 {
        tracing::debug!(codex = %codex, start, "Dropping leading chunks");
    }
    chunks.into_iter().skip(start).collect()
}

/// Structure the text of one codex.
pub fn structure_text(codex: &str, text: &str, settings: &Settings) -> Result<Document> {
    validate_codex_id(codex)?;

    let (lines, mut warnings) = classify(text, settings);

    let engine = SplitEngine::new(create_standard_scheme(), LineChunkStrategy);
    let chunks = skip_start(codex, engine.split(codex, &lines), settings);
    let chunks = correct(chunks);

    let mut document = build_document(codex, &chunks, settings)?;
    warnings.append(&mut document.warnings);
    document.warnings = warnings;

    tracing::info!(codex = %codex, units = document.units.len(), "Structured codex");
    Ok(document)
}

/// Read and structure one codex of the corpus.
pub fn structure_codex(settings: &Settings, codex: &str) -> Result<Document> {
    let text = read_codex(settings, codex)?;
    structure_text(codex, &text, settings)
}

/// Chunks for triplet extraction from the text of one codex.
pub fn holmes_chunks_text(codex: &str, text: &str, settings: &Settings) -> Result<HolmesChunks> {
    validate_codex_id(codex)?;

    let (lines, warnings) = classify(text, settings);
    let engine = SplitEngine::new(create_holmes_scheme(), SectionChunkStrategy);
    let chunks = skip_start(codex, engine.split(codex, &lines), settings);
    Ok(HolmesChunks {
        chunks: correct(chunks),
        warnings,
    })
}

/// Read one codex and chunk it for triplet extraction.
pub fn holmes_chunks(settings: &Settings, codex: &str) -> Result<HolmesChunks> {
    let text = read_codex(settings, codex)?;
    holmes_chunks_text(codex, &text, settings)
}

/// Write the classified markup of a codex next to its source.
pub fn markup_codex(settings: &Settings, codex: &str) -> Result<Markup> {
    let text = read_codex(settings, codex)?;
    let (lines, warnings) = classify(&text, settings);

    let path = settings.documents.md_clean(codex);
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(&path, content)?;

    tracing::debug!(codex = %codex, path = %path.display(), "Wrote markup");
    Ok(Markup { path, warnings })
}

/// Structure every codex of the corpus and compile the rebuild script.
///
/// A codex that fails to structure fails the whole build.
pub fn build_corpus(settings: &Settings) -> Result<Corpus> {
    let codexes = list_codexes(settings)?;
    build_codexes(settings, &codexes)
}

/// Structure the given codices and compile the rebuild script.
pub fn build_codexes(settings: &Settings, codexes: &[String]) -> Result<Corpus> {
    let mut documents = Vec::with_capacity(codexes.len());
    let mut warnings = Vec::new();

    for codex in codexes {
        let document = structure_codex(settings, codex)?;
        warnings.extend(document.warnings.iter().map(|w| format!("{codex}: {w}")));
        documents.push(document);
    }

    let commands = compile_corpus(&documents, settings);
    Ok(Corpus {
        documents,
        commands,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{test_settings, OrdinalMode};
    use crate::types::UnitKind;
    use pretty_assertions::assert_eq;

    const CODEX: &str = "Глава 1. Общие положения
Статья 5. Название
1. Текст пункта один.
2. Текст пункта два.
1) Подпункт.
2) Другой подпункт.
";

    #[test]
    fn test_structure_text_scenario() {
        let settings = test_settings(OrdinalMode::Skip);
        let document = structure_text("149", CODEX, &settings).unwrap();

        let ids: Vec<&str> = document.units.iter().map(|u| u.identifier.as_str()).collect();
        assert_eq!(
            ids,
            vec!["149", "149.5", "149.5.1", "149.5.2", "149.5.2.1", "149.5.2.2"]
        );
        assert_eq!(
            document.get(UnitKind::Paragraph, "149.5.2").unwrap().predecessor.as_deref(),
            Some("149.5.1")
        );
        assert_eq!(
            document
                .get(UnitKind::Subparagraph, "149.5.2.2")
                .unwrap()
                .predecessor
                .as_deref(),
            Some("149.5.2.1")
        );
    }

    #[test]
    fn test_start_chunk_drops_prefix() {
        let mut settings = test_settings(OrdinalMode::Skip);
        settings.data.start_chunk.insert("149".to_string(), 2);

        let document = structure_text("149", CODEX, &settings).unwrap();

        assert!(document.get(UnitKind::Paragraph, "149.5.1").is_none());
        assert!(document.get(UnitKind::Paragraph, "149.5.2").is_some());
    }

    #[test]
    fn test_holmes_chunks_text() {
        let settings = test_settings(OrdinalMode::Skip);
        let set = holmes_chunks_text("149", CODEX, &settings).unwrap();

        assert_eq!(set.chunks.len(), 2);
        assert_eq!(
            set.chunks[1].content,
            "2. Текст пункта два.\n1) Подпункт.\n2) Другой подпункт."
        );
        assert!(set.warnings.is_empty());
    }

    #[test]
    fn test_holmes_chunks_keep_classifier_warnings() {
        let settings = test_settings(OrdinalMode::Skip);
        let text = "Статья 1. А\n1. Пункт\nab) странный маркер\n";

        let set = holmes_chunks_text("149", text, &settings).unwrap();

        assert_eq!(set.warnings, vec!["line 3: malformed marker 'ab)'"]);
        assert_eq!(set.chunks.len(), 1);
    }

    #[test]
    fn test_markup_codex_writes_file_and_keeps_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = test_settings(OrdinalMode::Skip);
        settings.documents.path_to_folder = dir.path().to_path_buf();
        fs::create_dir_all(dir.path().join("149")).unwrap();
        fs::write(
            dir.path().join("149").join("text.md"),
            "Статья 1. А\n1. Пункт\nab) странный маркер\n",
        )
        .unwrap();

        let markup = markup_codex(&settings, "149").unwrap();

        assert_eq!(markup.path, dir.path().join("149").join("text_cleaned.md"));
        assert_eq!(
            fs::read_to_string(&markup.path).unwrap(),
            "# Статья 1. А\n## Пункт 1\n1. Пункт\nab) странный маркер\n"
        );
        assert_eq!(markup.warnings, vec!["line 3: malformed marker 'ab)'"]);
    }

    #[test]
    fn test_structure_text_rejects_bad_codex() {
        let settings = test_settings(OrdinalMode::Skip);
        assert!(matches!(
            structure_text("x", CODEX, &settings),
            Err(StructurerError::InvalidCodexId(_))
        ));
    }

    #[test]
    fn test_natural_codex_order() {
        let mut codexes = vec!["149", "9", "152", "27"];
        codexes.sort_by(|a, b| natural_key(a).cmp(&natural_key(b)));
        assert_eq!(codexes, vec!["9", "27", "149", "152"]);
    }

    #[test]
    fn test_classifier_warnings_reach_document() {
        let settings = test_settings(OrdinalMode::Skip);
        let text = "Статья 1. А\n1. Пункт\nab) странный маркер\n";
        let document = structure_text("149", text, &settings).unwrap();
        assert!(document
            .warnings
            .iter()
            .any(|w| w.contains("malformed marker")));
        assert_eq!(document.units_of(UnitKind::Paragraph).count(), 1);
    }
}
