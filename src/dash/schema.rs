// Column sets required by each view.

use std::collections::HashSet;

use review_sentiment::DatasetKind;

use crate::dash::io_csv::RawTable;
use crate::dash::*;

pub const MONTH: &str = "Month";
pub const POSITIVE: &str = "Positive";
pub const NEUTRAL: &str = "Neutral";
pub const NEGATIVE: &str = "Negative";
pub const FEATURE_TITLE: &str = "Feature Title";
pub const FEATURE_DESCRIPTION: &str = "Feature Description";
pub const FEATURE_TYPE: &str = "Feature Type";
pub const VERSION: &str = "Version";

const BASE_COLUMNS: [&str; 5] = [MONTH, POSITIVE, NEUTRAL, NEGATIVE, FEATURE_TITLE];

/// The reporting views. Each one reads one kind of dataset and needs its own columns.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum View {
    Basic,
    Versioned,
    /// The basic dataset with the feature descriptions and types.
    Detailed,
}

impl View {
    pub fn parse(s: &str) -> DashResult<View> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(View::Basic),
            "versioned" | "versions" => Ok(View::Versioned),
            "detailed" => Ok(View::Detailed),
            _ => UnknownViewSnafu { view: s }.fail(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            View::Basic => "basic",
            View::Versioned => "versioned",
            View::Detailed => "detailed",
        }
    }

    pub fn dataset_kind(&self) -> DatasetKind {
        match self {
            View::Versioned => DatasetKind::Versioned,
            View::Basic | View::Detailed => DatasetKind::Basic,
        }
    }

    pub fn required_columns(&self) -> Vec<&'static str> {
        let mut cols = BASE_COLUMNS.to_vec();
        match self {
            View::Basic => {}
            View::Versioned => cols.extend([VERSION, FEATURE_DESCRIPTION]),
            View::Detailed => cols.extend([FEATURE_DESCRIPTION, FEATURE_TYPE]),
        }
        cols
    }
}

/// The outcome of checking the columns of a table.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Validation {
    Ok,
    /// In the order of the required columns.
    MissingColumns(Vec<String>),
}

pub fn missing_columns(headers: &[String], required: &[&str]) -> Vec<String> {
    let present: HashSet<&str> = headers.iter().map(|h| h.as_str()).collect();
    required
        .iter()
        .filter(|c| !present.contains(*c))
        .map(|c| c.to_string())
        .collect()
}

pub fn validate(table: &RawTable, required: &[&str]) -> Validation {
    let missing = missing_columns(&table.headers, required);
    if missing.is_empty() {
        Validation::Ok
    } else {
        debug!(
            "validate: {} lacks {:?} (has {:?})",
            table.path, missing, table.headers
        );
        Validation::MissingColumns(missing)
    }
}
