//! CSV export of the raw scraped tables and the joined analysis table.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::types::{AnalysisRecord, RawTables};

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the three raw tables plus the joined table into `dir` and return
/// the paths written.
pub fn write_tables(
    raw: &RawTables,
    records: &[AnalysisRecord],
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("create export dir {}", dir.display()))?;
    let paths = vec![
        dir.join("measures.csv"),
        dir.join("readability.csv"),
        dir.join("contributions.csv"),
        dir.join("joined.csv"),
    ];
    write_csv(&paths[0], &raw.measures)?;
    write_csv(&paths[1], &raw.readability)?;
    write_csv(&paths[2], &raw.contributions)?;
    write_csv(&paths[3], records)?;
    log::info!("wrote {} CSV files to {}", paths.len(), dir.display());
    Ok(paths)
}
