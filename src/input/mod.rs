use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

pub mod corpus;
pub mod manifest;

use corpus::read_text_maybe_gz;
use manifest::{EntrySource, ManifestLine, parse_manifest};

/// Ordered item labels with their positionally aligned corpus text.
#[derive(Debug, Clone)]
pub struct InputBundle {
    pub manifest_path: PathBuf,
    pub items: Vec<String>,
    pub corpus: Vec<String>,
    pub n_from_files: usize,
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error at {path}:{line}: {msg}")]
    Parse {
        path: PathBuf,
        line: usize,
        msg: String,
    },
    #[error("manifest {0} lists no items")]
    Empty(PathBuf),
}

impl InputError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        InputError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub fn load_input(manifest_path: &Path) -> Result<InputBundle, InputError> {
    let lines = parse_manifest(manifest_path)?;
    if lines.is_empty() {
        return Err(InputError::Empty(manifest_path.to_path_buf()));
    }
    let base = manifest_path.parent().unwrap_or_else(|| Path::new("."));

    let mut seen = HashSet::with_capacity(lines.len());
    let mut items = Vec::with_capacity(lines.len());
    let mut corpus = Vec::with_capacity(lines.len());
    let mut n_from_files = 0usize;

    for ManifestLine {
        line_no,
        label,
        source,
    } in lines
    {
        if !seen.insert(label.clone()) {
            warn!(
                "duplicate item label {label} at line {line_no}; pairwise scores for it will be ambiguous"
            );
        }
        let text = match source {
            EntrySource::Inline(text) => text,
            EntrySource::File(rel) => {
                let path = resolve_entry_path(base, &rel);
                n_from_files += 1;
                read_text_maybe_gz(&path)?
            }
        };
        items.push(label);
        corpus.push(text);
    }

    info!(
        "loaded {} items from {} ({} corpus files)",
        items.len(),
        manifest_path.display(),
        n_from_files
    );

    Ok(InputBundle {
        manifest_path: manifest_path.to_path_buf(),
        items,
        corpus,
        n_from_files,
    })
}

fn resolve_entry_path(base: &Path, rel: &Path) -> PathBuf {
    if rel.is_absolute() {
        rel.to_path_buf()
    } else {
        base.join(rel)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
