use std::path::Path;

use anyhow::Context;
use csv::Writer;
use serde::Serialize;

/// Serializes records to a delimited file with a header row, overwriting
/// whatever was there.
pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> anyhow::Result<()> {
    let mut writer =
        Writer::from_path(path).with_context(|| format!("failed to create {}", path.display()))?;
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Single-column exports (season labels, team names) get an explicit
/// header row.
pub fn write_column(path: &Path, header: &str, values: &[String]) -> anyhow::Result<()> {
    let mut writer =
        Writer::from_path(path).with_context(|| format!("failed to create {}", path.display()))?;
    writer.write_record([header])?;
    for value in values {
        writer.write_record([value.as_str()])?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
