use std::io::Read;
use std::path::Path;

use cov_config::FilesConfig;
use orion_error::StructError;
use orion_error::compat_prelude::*;
use orion_error::prelude::*;
use rand::Rng;
use serde::Serialize;
use uuid::{Builder, Uuid};

use crate::error::{GenReason, GenResult};

/// A document that access records can reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportFile {
    pub filename: String,
    pub id: String,
}

/// Read the file pool CSV at `path`.
pub fn load_file_pool<R: Rng + ?Sized>(
    path: &Path,
    config: &FilesConfig,
    rng: &mut R,
) -> GenResult<Vec<ReportFile>> {
    let file = std::fs::File::open(path)
        .owe_sys()
        .position(path.display().to_string())?;
    let files = read_file_pool(file, config, rng).position(path.display().to_string())?;
    cov_debug!(conf, path = %path.display(), files = files.len(), "loaded file pool");
    Ok(files)
}

/// Parse a file pool from CSV with a header row.
///
/// The filename column is required. Rows with an empty filename are skipped.
/// When the id column is missing or a row leaves it blank, the id is a v4
/// UUID built from `rng`, so a seeded run always assigns the same ids.
pub fn read_file_pool<Rd: Read, R: Rng + ?Sized>(
    reader: Rd,
    config: &FilesConfig,
    rng: &mut R,
) -> GenResult<Vec<ReportFile>> {
    let mut csv = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = csv.headers().owe(GenReason::Config)?.clone();

    let filename_col = headers
        .iter()
        .position(|h| h == config.filename_column)
        .ok_or_else(|| {
            StructError::from(GenReason::Config)
                .with_detail(format!("missing column {:?}", config.filename_column))
        })?;
    let id_col = headers.iter().position(|h| h == config.id_column);
    if id_col.is_none() {
        cov_warn!(conf, column = %config.id_column, "no id column, deriving ids from the rng");
    }

    let mut files = Vec::new();
    for row in csv.records() {
        let row = row.owe(GenReason::Config)?;
        let filename = row.get(filename_col).unwrap_or_default();
        if filename.is_empty() {
            continue;
        }
        let id = match id_col.and_then(|c| row.get(c)).filter(|id| !id.is_empty()) {
            Some(id) => id.to_string(),
            None => random_uuid(rng).to_string(),
        };
        files.push(ReportFile {
            filename: filename.to_string(),
            id,
        });
    }
    Ok(files)
}

fn random_uuid<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes[..]);
    Builder::from_random_bytes(bytes).into_uuid()
}
