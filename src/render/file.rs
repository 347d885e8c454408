use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::model::ScoreMatrix;
use crate::render::{RenderError, RenderSpec, Renderer, check_labels};

pub const HEATMAP_FILE: &str = "heatmap.json";

/// Writes a JSON render request; NaN cells become `null`.
pub struct FileRenderer {
    out_dir: PathBuf,
}

#[derive(Serialize)]
struct RenderRequest<'a> {
    spec: &'a RenderSpec,
    matrix: &'a ScoreMatrix,
}

impl FileRenderer {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.out_dir.join(HEATMAP_FILE)
    }
}

impl Renderer for FileRenderer {
    fn render(&self, matrix: &ScoreMatrix, spec: &RenderSpec) -> Result<(), RenderError> {
        check_labels(matrix, spec)?;
        fs::create_dir_all(&self.out_dir)?;
        let path = self.path();
        let mut w = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut w, &RenderRequest { spec, matrix })?;
        w.write_all(b"\n")?;
        w.flush()?;
        info!("wrote render request to {}", path.display());
        Ok(())
    }
}
