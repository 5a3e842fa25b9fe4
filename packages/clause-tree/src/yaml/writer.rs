//! YAML writer for records and chunks.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{ClauseTreeError, Result};
use crate::records::{LineRecord, NonTextBlock};
use crate::splitting::Chunk;

/// Record listing for YAML serialization.
#[derive(Debug, Serialize)]
struct YamlRecords<'a> {
    records: &'a [LineRecord],
    #[serde(skip_serializing_if = "is_empty")]
    blocks: &'a [NonTextBlock],
}

/// Chunk listing for YAML serialization.
#[derive(Debug, Serialize)]
struct YamlChunks<'a> {
    token_budget: usize,
    total_tokens: usize,
    chunks: &'a [Chunk],
}

/// Serialize records (and any extracted blocks) to a YAML document.
pub fn records_to_yaml(records: &[LineRecord], blocks: &[NonTextBlock]) -> Result<String> {
    to_document(&YamlRecords { records, blocks })
}

/// Serialize the chunks of one split to a YAML document.
pub fn chunks_to_yaml(chunks: &[Chunk], token_budget: usize) -> Result<String> {
    to_document(&YamlChunks {
        token_budget,
        total_tokens: chunks.iter().map(|c| c.token_count).sum(),
        chunks,
    })
}

fn is_empty<T>(items: &&[T]) -> bool {
    items.is_empty()
}

fn to_document<T: Serialize>(value: &T) -> Result<String> {
    let yaml = serde_yaml_ng::to_string(value)?;
    Ok(format!("---\n{yaml}"))
}

/// Write `content` to `path` atomically and return the path.
///
/// Parent directories are created as needed. Content goes to a hidden
/// temporary file next to the target, which is then renamed into place.
pub fn save_yaml(content: &str, path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            ClauseTreeError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Output path has no file name: {}", path.display()),
            ))
        })?;

    let output_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&output_dir)?;

    let output_file = output_dir.join(file_name);
    let temp_file = output_dir.join(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if output_file.exists() {
        fs::remove_file(&output_file)?;
    }

    fs::rename(&temp_file, &output_file)?;
    tracing::debug!(path = %output_file.display(), bytes = content.len(), "Wrote YAML");

    Ok(output_file)
}
