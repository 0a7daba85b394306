use std::io::Write;
use std::path::{Path, PathBuf};

use orion_error::compat_prelude::*;
use orion_error::prelude::*;

use super::IngestionSink;
use crate::error::GenResult;
use crate::output::BulkBatch;

/// Writes each batch to `<dir>/<index>-<seq>.ndjson`, `seq` counting from 0.
#[derive(Debug)]
pub struct FileSink {
    dir: PathBuf,
    seq: usize,
}

impl FileSink {
    pub fn create(dir: impl Into<PathBuf>) -> GenResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .owe_sys()
            .position(dir.display().to_string())?;
        cov_debug!(sink, dir = %dir.display(), "file sink ready");
        Ok(Self { dir, seq: 0 })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl IngestionSink for FileSink {
    fn send(&mut self, index: &str, batch: &BulkBatch) -> GenResult<()> {
        let path = self.dir.join(format!("{index}-{:05}.ndjson", self.seq));
        let mut file = std::fs::File::create(&path)
            .owe_sys()
            .position(path.display().to_string())?;
        file.write_all(batch.payload.as_bytes())
            .owe_sys()
            .position(path.display().to_string())?;
        self.seq += 1;
        cov_trace!(sink, path = %path.display(), documents = batch.documents, "batch written");
        Ok(())
    }
}
