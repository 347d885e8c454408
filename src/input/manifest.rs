use std::path::{Path, PathBuf};

use crate::input::InputError;
use crate::input::corpus::open_maybe_gz;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrySource {
    Inline(String),
    /// `@path`, relative to the manifest directory unless absolute.
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestLine {
    pub line_no: usize,
    pub label: String,
    pub source: EntrySource,
}

/// Reads `label<TAB>source` lines. Blank lines and `#` comments are skipped.
pub fn parse_manifest(path: &Path) -> Result<Vec<ManifestLine>, InputError> {
    let mut reader = open_maybe_gz(path)?;
    let mut buf = String::new();
    let mut out = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        let read = reader
            .read_line(&mut buf)
            .map_err(|e| InputError::io(path, e))?;
        if read == 0 {
            break;
        }
        line_no += 1;
        if let Some(line) = parse_line(&buf, line_no).map_err(|msg| InputError::Parse {
            path: path.to_path_buf(),
            line: line_no,
            msg,
        })? {
            out.push(line);
        }
    }
    Ok(out)
}

fn parse_line(raw: &str, line_no: usize) -> Result<Option<ManifestLine>, String> {
    let line = raw.trim_end_matches(['\n', '\r']);
    if line.trim().is_empty() || line.trim_start().starts_with('#') {
        return Ok(None);
    }
    let Some((label, source)) = line.split_once('\t') else {
        return Err("expected label<TAB>source".to_string());
    };
    let label = label.trim();
    if label.is_empty() {
        return Err("empty item label".to_string());
    }
    let source = match source.strip_prefix('@') {
        Some(path) if !path.trim().is_empty() => EntrySource::File(PathBuf::from(path.trim())),
        Some(_) => return Err("empty corpus path after @".to_string()),
        None => EntrySource::Inline(source.to_string()),
    };
    Ok(Some(ManifestLine {
        line_no,
        label: label.to_string(),
        source,
    }))
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/manifest.rs"]
mod tests;
