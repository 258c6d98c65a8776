//! Serialized forms of the pipeline results and file output.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, StructurerError};
use crate::graph::{render_script, GraphCommand};
use crate::model::Document;
use crate::types::Chunk;

/// Indent YAML sequences under their parent key.
///
/// serde_yaml_ng places sequence items (`- `) at the same indent as their
/// parent key:
///
/// ```yaml
/// # Before:              # After:
/// units:                 units:
/// - identifier: '149'      - identifier: '149'
///   kind: Codex              kind: Codex
/// ```
fn indent_yaml_sequences(yaml: &str) -> String {
    let mut result: Vec<String> = Vec::new();
    // Stack of indent levels where sequences start
    let mut seq_indents: Vec<usize> = Vec::new();

    for line in yaml.lines() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            result.push(line.to_string());
            continue;
        }

        let indent = line.len() - trimmed.len();

        while let Some(&seq_indent) = seq_indents.last() {
            if indent < seq_indent || (indent == seq_indent && !trimmed.starts_with("- ")) {
                seq_indents.pop();
            } else {
                break;
            }
        }

        if trimmed.starts_with("- ") && seq_indents.last() != Some(&indent) {
            seq_indents.push(indent);
        }

        let extra = seq_indents.len() * 2;
        result.push(format!("{}{trimmed}", " ".repeat(indent + extra)));
    }

    result.join("\n")
}

/// Structural units of a document as YAML.
pub fn generate_units_yaml(document: &Document) -> Result<String> {
    let yaml = serde_yaml_ng::to_string(document)?;
    let yaml = indent_yaml_sequences(&yaml);

    let lines: Vec<&str> = yaml.lines().map(str::trim_end).collect();
    Ok(format!("---\n{}\n", lines.join("\n")))
}

/// Chunks as JSON lines, one object per chunk.
pub fn generate_chunks_jsonl(chunks: &[Chunk]) -> Result<String> {
    let mut out = String::new();
    for chunk in chunks {
        out.push_str(&serde_json::to_string(chunk)?);
        out.push('\n');
    }
    Ok(out)
}

/// Commands as a Cypher script.
#[must_use]
pub fn generate_script(commands: &[GraphCommand]) -> String {
    render_script(commands)
}

/// Write `content` to `path`.
///
/// Writes a temp file next to the target, syncs it, then renames it over
/// the target so a crash never leaves a half-written file.
pub fn save_output(content: &str, path: &Path) -> Result<PathBuf> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !dir.is_dir() {
        return Err(StructurerError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Output directory does not exist: {}", dir.display()),
        )));
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            StructurerError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Output path has no file name: {}", path.display()),
            ))
        })?;
    let temp_file = dir.join(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StructuralUnit;
    use crate::types::ChunkMetadata;
    use tempfile::tempdir;

    fn document() -> Document {
        Document {
            codex: "149".to_string(),
            units: vec![StructuralUnit::codex("149")],
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_generate_units_yaml() {
        let yaml = generate_units_yaml(&document()).unwrap();

        assert!(yaml.starts_with("---\n"));
        assert!(yaml.contains("units:\n  - identifier:"));
        assert!(yaml.contains("kind: Codex"));
        assert!(!yaml.contains("warnings"));
    }

    #[test]
    fn test_indent_yaml_sequences() {
        let input = "units:\n- a: 1\n  b:\n  - x\n- a: 2";
        let expected = "units:\n  - a: 1\n    b:\n      - x\n  - a: 2";
        assert_eq!(indent_yaml_sequences(input), expected);
    }

    #[test]
    fn test_generate_chunks_jsonl() {
        let chunks = vec![
            Chunk::new(ChunkMetadata::new("149").with_article("Статья 1. А"), "текст"),
            Chunk::new(ChunkMetadata::new("149"), "ещё"),
        ];
        let jsonl = generate_chunks_jsonl(&chunks).unwrap();
        let lines: Vec<&str> = jsonl.lines().collect();

        assert_eq!(lines.len(), 2);
        let parsed: Chunk = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed, chunks[0]);
    }

    #[test]
    fn test_save_output() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("graph.cypher");

        let saved = save_output("MATCH (n) DETACH DELETE n;\n", &path).unwrap();

        assert_eq!(saved, path);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "MATCH (n) DETACH DELETE n;\n"
        );
        assert!(!dir.path().join(".graph.cypher.tmp").exists());
    }

    #[test]
    fn test_save_output_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("graph.cypher");
        assert!(save_output("x", &path).is_err());
    }
}
