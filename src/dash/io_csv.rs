// Primitives for reading CSV files.

use std::path::Path;

use review_sentiment::builder::{DatasetBuilder, RawReview};
use review_sentiment::{Dataset, SentimentCounts};

use crate::dash::{
    io_common::{decode_bytes, normalize_header, simplify_file_name},
    schema::*,
    *,
};

/// One line of a data file.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RawRow {
    /// Line number in the file, 1-based, the header being line 1.
    pub lineno: u64,
    pub cells: Vec<String>,
}

impl RawRow {
    /// Missing cells at the end of a short line read as empty.
    pub fn cell(&self, idx: usize) -> &str {
        self.cells.get(idx).map(|s| s.as_str()).unwrap_or("")
    }
}

/// The content of a data file, with normalized headers. Cells are not interpreted.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RawTable {
    pub path: String,
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

pub fn read_table(path: &Path) -> DashResult<RawTable> {
    let path_s = path.display().to_string();
    let bytes = fs::read(path).context(OpeningFileSnafu {
        path: path_s.clone(),
    })?;
    let text = decode_bytes(&bytes, path);

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers: Vec<String> = rdr
        .headers()
        .context(ParsingCsvSnafu {
            path: path_s.clone(),
        })?
        .iter()
        .map(normalize_header)
        .collect();
    debug!("read_table: {}: headers {:?}", path_s, headers);

    let mut rows: Vec<RawRow> = Vec::new();
    for (idx, record_r) in rdr.records().enumerate() {
        let record = record_r.context(ParsingCsvSnafu {
            path: path_s.clone(),
        })?;
        let lineno = record
            .position()
            .map(|p| p.line())
            .unwrap_or((idx + 2) as u64);
        // Blank lines are skipped by the reader, but a line of empty cells is not.
        if record.iter().all(|c| c.trim().is_empty()) {
            debug!("read_table: {}: skipping empty line {}", path_s, lineno);
            continue;
        }
        rows.push(RawRow {
            lineno,
            cells: record.iter().map(|c| c.to_string()).collect(),
        });
    }
    info!(
        "Read {} rows from {}",
        rows.len(),
        simplify_file_name(path)
    );
    Ok(RawTable {
        path: path_s,
        headers,
        rows,
    })
}

/// Converts a validated table into a typed dataset for the given view.
pub fn to_dataset(table: &RawTable, view: View) -> DashResult<Dataset> {
    let col = |name: &str| -> DashResult<usize> {
        table
            .column_index(name)
            .context(SchemaInvalidSnafu {
                app: table.path.clone(),
                missing: vec![name.to_string()],
            })
    };
    let month_idx = col(MONTH)?;
    let positive_idx = col(POSITIVE)?;
    let neutral_idx = col(NEUTRAL)?;
    let negative_idx = col(NEGATIVE)?;
    let title_idx = col(FEATURE_TITLE)?;
    let description_idx = table.column_index(FEATURE_DESCRIPTION);
    let type_idx = table.column_index(FEATURE_TYPE);
    let version_idx = table.column_index(VERSION);

    let mut builder = DatasetBuilder::new(view.dataset_kind());
    for row in table.rows.iter() {
        let counts = SentimentCounts {
            positive: parse_count(row.cell(positive_idx), POSITIVE, row.lineno)?,
            neutral: parse_count(row.cell(neutral_idx), NEUTRAL, row.lineno)?,
            negative: parse_count(row.cell(negative_idx), NEGATIVE, row.lineno)?,
        };
        builder
            .add_review(&RawReview {
                line: row.lineno,
                month: row.cell(month_idx),
                counts,
                feature_title: row.cell(title_idx),
                feature_description: description_idx.map(|idx| row.cell(idx)),
                feature_type: type_idx.map(|idx| row.cell(idx)),
                version: version_idx.map(|idx| row.cell(idx)),
            })
            .context(SentimentSnafu {})?;
    }
    Ok(builder.build())
}

/// Reads a review count. Empty cells count as zero, and whole numbers written with a
/// decimal point (`12.0`) are accepted.
pub fn parse_count(value: &str, column: &str, lineno: u64) -> DashResult<u64> {
    let v = value.trim();
    if v.is_empty() {
        return Ok(0);
    }
    if let Ok(x) = v.parse::<u64>() {
        return Ok(x);
    }
    let f = v.parse::<f64>().ok().filter(|f| {
        f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64
    });
    f.map(|f| f as u64).context(MalformedCountSnafu {
        lineno,
        column,
        value: v,
    })
}
