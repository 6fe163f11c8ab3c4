//! CSV ingestion and output for import runs.
//!
//! Input files are read as raw byte records so a single malformed customer
//! value does not abort the run: such rows are kept unchanged and flagged in
//! the audit columns.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use csv::{ByteRecord, ReaderBuilder, WriterBuilder};
use custid_core::{ImportSession, NameSource, RowResolution, RowStatus};
use custid_model::is_blank;
use tracing::{debug, info, info_span};

/// Columns appended to every output row.
pub const AUDIT_COLUMNS: [&str; 3] = ["resolved_confidence", "resolved_outcome", "resolved_reason"];

/// Historical customer names stored in one column of a CSV file.
#[derive(Debug, Clone)]
pub struct CsvNameSource {
    path: PathBuf,
    column: String,
}

impl CsvNameSource {
    pub fn new(path: impl Into<PathBuf>, column: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            column: column.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NameSource for CsvNameSource {
    fn customer_names(&self) -> Result<Vec<String>> {
        let path = &self.path;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("read csv: {}", path.display()))?;
        let headers = reader
            .byte_headers()
            .with_context(|| format!("read headers: {}", path.display()))?
            .clone();
        let index = find_column(&headers, &self.column).ok_or_else(|| {
            anyhow!("column `{}` not found in {}", self.column, path.display())
        })?;

        let mut names = Vec::new();
        for record in reader.byte_records() {
            let record = record.with_context(|| format!("read record: {}", path.display()))?;
            let Some(value) = record.get(index) else {
                continue;
            };
            match std::str::from_utf8(value) {
                Ok(name) if !is_blank(name) => names.push(name.trim().to_string()),
                Ok(_) => {}
                Err(error) => debug!(%error, "skipping history name that is not UTF-8"),
            }
        }
        Ok(names)
    }
}

/// Case-insensitive header lookup.
pub fn find_column(headers: &ByteRecord, name: &str) -> Option<usize> {
    let wanted = name.trim();
    headers.iter().position(|header| {
        std::str::from_utf8(header).is_ok_and(|header| header.trim().eq_ignore_ascii_case(wanted))
    })
}

/// Default output path: `sales.csv` becomes `sales.resolved.csv`.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("resolved.csv")
}

/// Audit label for the outcome column.
pub fn outcome_label(resolution: &RowResolution) -> &'static str {
    match &resolution.status {
        RowStatus::Resolved(result) => result.outcome.as_str(),
        RowStatus::Placeholder(_) => "placeholder",
        RowStatus::Retained { .. } => "retained",
    }
}

/// Resolves the customer column of `input` and writes the result to `output`.
///
/// Returns the number of data rows written.
///
/// # Errors
///
/// Fails when either file cannot be opened, the column is missing, or the CSV
/// stream itself is unreadable. Per-row problems never fail the run.
pub fn resolve_csv(
    input: &Path,
    output: &Path,
    column: &str,
    session: &mut ImportSession,
) -> Result<usize> {
    let span = info_span!("resolve_csv", input = %input.display(), output = %output.display());
    let _guard = span.enter();
    let reader = File::open(input).with_context(|| format!("open input: {}", input.display()))?;
    let writer =
        File::create(output).with_context(|| format!("create output: {}", output.display()))?;
    let rows = resolve_records(reader, writer, column, session)
        .with_context(|| format!("resolve customers in {}", input.display()))?;
    info!(rows, "wrote resolved file");
    Ok(rows)
}

/// Streams CSV records from `reader` to `writer`, replacing the customer
/// column with the resolved name and appending [`AUDIT_COLUMNS`].
///
/// # Errors
///
/// Fails when the customer column is missing or the CSV stream cannot be
/// read or written.
pub fn resolve_records<R, W>(
    reader: R,
    writer: W,
    column: &str,
    session: &mut ImportSession,
) -> Result<usize>
where
    R: Read,
    W: Write,
{
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let mut writer = WriterBuilder::new().flexible(true).from_writer(writer);

    let headers = reader.byte_headers().context("read headers")?.clone();
    let index =
        find_column(&headers, column).ok_or_else(|| anyhow!("column `{column}` not found"))?;
    let mut output_headers = headers.clone();
    for name in AUDIT_COLUMNS {
        output_headers.push_field(name.as_bytes());
    }
    writer
        .write_byte_record(&output_headers)
        .context("write headers")?;

    let mut rows = 0usize;
    for record in reader.byte_records() {
        let record = record.context("read record")?;
        let resolution = resolve_record(&record, index, headers.len(), session);
        let output = output_record(&record, index, headers.len(), &resolution);
        writer.write_byte_record(&output).context("write record")?;
        rows += 1;
    }
    writer.flush().context("flush output")?;
    Ok(rows)
}

fn resolve_record(
    record: &ByteRecord,
    index: usize,
    expected_fields: usize,
    session: &mut ImportSession,
) -> RowResolution {
    let raw = record.get(index).unwrap_or_default();
    if record.len() != expected_fields {
        let original = String::from_utf8_lossy(raw);
        let error = format!(
            "row has {} fields, header has {expected_fields}",
            record.len()
        );
        return session.retain_row(&original, &error);
    }
    match std::str::from_utf8(raw) {
        Ok(name) => session.resolve_row(Some(name)),
        Err(error) => {
            let original = String::from_utf8_lossy(raw);
            session.retain_row(&original, &error)
        }
    }
}

fn output_record(
    record: &ByteRecord,
    index: usize,
    expected_fields: usize,
    resolution: &RowResolution,
) -> ByteRecord {
    let retained = matches!(resolution.status, RowStatus::Retained { .. });
    let mut output = ByteRecord::new();
    for (position, field) in record.iter().enumerate() {
        if position == index && !retained {
            output.push_field(resolution.resolved_name.as_bytes());
        } else {
            output.push_field(field);
        }
    }
    for _ in record.len()..expected_fields {
        output.push_field(b"");
    }
    let confidence = resolution
        .confidence()
        .map(|confidence| format!("{confidence:.2}"))
        .unwrap_or_default();
    output.push_field(confidence.as_bytes());
    output.push_field(outcome_label(resolution).as_bytes());
    output.push_field(resolution.reason().as_bytes());
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_columns_ignoring_case_and_padding() {
        let headers = ByteRecord::from(vec!["order_id", " Customer ", "total"]);
        assert_eq!(find_column(&headers, "customer"), Some(1));
        assert_eq!(find_column(&headers, "buyer"), None);
    }

    #[test]
    fn output_path_keeps_directory() {
        let path = default_output_path(Path::new("imports/sales.csv"));
        assert_eq!(path, PathBuf::from("imports/sales.resolved.csv"));
    }
}
