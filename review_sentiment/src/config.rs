// ********* Input data structures ***********

use chrono::NaiveDate;
use std::error::Error;
use std::fmt::Display;

/// The raw sentiment counts of one review row.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct SentimentCounts {
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
}

impl SentimentCounts {
    /// None if the sum does not fit in a `u64`.
    pub fn checked_total(&self) -> Option<u64> {
        self.positive
            .checked_add(self.neutral)?
            .checked_add(self.negative)
    }
}

/// One row of a review dataset.
///
/// `month` keeps the day that was written in the file. Grouping and resampling only
/// look at the year and the month.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ReviewRecord {
    /// The line of the row in its file. Rows built in memory are numbered from 1.
    pub line: u64,
    pub month: NaiveDate,
    pub counts: SentimentCounts,
    pub feature_title: String,
    pub feature_description: Option<String>,
    pub feature_type: Option<String>,
}

/// A review row from a version-aware dataset.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VersionedReview {
    pub version: String,
    pub review: ReviewRecord,
}

/// The two flavours of datasets. They come from different files and are never mixed.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum DatasetKind {
    /// `{app}.csv`
    Basic,
    /// `{app}_with_versions.csv`
    Versioned,
}

/// All the rows loaded for one application.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Dataset {
    Basic(Vec<ReviewRecord>),
    Versioned(Vec<VersionedReview>),
}

impl Dataset {
    pub fn kind(&self) -> DatasetKind {
        match self {
            Dataset::Basic(_) => DatasetKind::Basic,
            Dataset::Versioned(_) => DatasetKind::Versioned,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Dataset::Basic(v) => v.len(),
            Dataset::Versioned(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The reviews in file order, along with their version if the dataset has versions.
    pub fn reviews(&self) -> Vec<(&ReviewRecord, Option<&str>)> {
        match self {
            Dataset::Basic(v) => v.iter().map(|r| (r, None)).collect(),
            Dataset::Versioned(v) => v
                .iter()
                .map(|vr| (&vr.review, Some(vr.version.as_str())))
                .collect(),
        }
    }
}

// ********* Options ***********

/// What to do with rows that have no review at all (positive + neutral + negative == 0).
///
/// Their proportions are undefined.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum DegenerateRowPolicy {
    /// Keep the row for the raw-count projections, but without proportions.
    /// The row is reported through `NormalizedTable::degenerate_rows`.
    Exclude,
    /// Fail the normalization on the first such row.
    Reject,
}

impl Default for DegenerateRowPolicy {
    fn default() -> Self {
        DegenerateRowPolicy::Exclude
    }
}

/// Selects the rows of the feature table.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum TableSelector {
    /// All the distinct (title, description) pairs of a version.
    Version(String),
    /// Mean counts per feature for a month, given as a label like `March 2023`.
    Month(String),
}

// ******** Output data structures *********

/// The share of each sentiment in a total. Always sums to 1.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Proportions {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

impl Proportions {
    /// Returns None when there is nothing to divide, or when the total overflows.
    pub fn from_counts(counts: &SentimentCounts) -> Option<Proportions> {
        let total = counts.checked_total()?;
        if total == 0 {
            return None;
        }
        let t = total as f64;
        Some(Proportions {
            positive: counts.positive as f64 / t,
            neutral: counts.neutral as f64 / t,
            negative: counts.negative as f64 / t,
        })
    }
}

/// A review row after normalization.
#[derive(PartialEq, Debug, Clone)]
pub struct SentimentRow {
    /// Line of the row in its file.
    pub line: u64,
    pub month: NaiveDate,
    pub feature_title: String,
    pub feature_description: Option<String>,
    pub feature_type: Option<String>,
    pub version: Option<String>,
    pub counts: SentimentCounts,
    pub total_reviews: u64,
    /// Missing for degenerate rows.
    pub proportions: Option<Proportions>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct NormalizedTable {
    pub kind: DatasetKind,
    pub rows: Vec<SentimentRow>,
}

impl NormalizedTable {
    /// The rows that carry no proportions.
    pub fn degenerate_rows(&self) -> Vec<&SentimentRow> {
        self.rows.iter().filter(|r| r.proportions.is_none()).collect()
    }
}

/// One point of the stacked area chart.
#[derive(PartialEq, Debug, Clone)]
pub struct AreaPoint {
    pub month: NaiveDate,
    /// The feature title for basic datasets, the version for versioned ones.
    pub grouping_key: String,
    pub positive_pct: f64,
    pub neutral_pct: f64,
    pub negative_pct: f64,
}

/// Total reviews for one calendar month. `month` is the first day of the month.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TrendPoint {
    pub month: NaiveDate,
    pub total_reviews: u64,
}

/// Overall share of each sentiment, for the pie chart.
#[derive(PartialEq, Debug, Clone)]
pub struct SentimentShare {
    pub counts: SentimentCounts,
    pub proportions: Proportions,
}

#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct FeatureListing {
    pub feature_title: String,
    pub feature_description: String,
}

#[derive(PartialEq, Debug, Clone)]
pub struct FeatureMeans {
    pub feature_title: String,
    pub mean_positive: f64,
    pub mean_neutral: f64,
    pub mean_negative: f64,
    /// Number of rows that were averaged.
    pub rows: usize,
}

#[derive(PartialEq, Debug, Clone)]
pub enum FeatureTable {
    Features(Vec<FeatureListing>),
    MonthlyMeans(Vec<FeatureMeans>),
}

impl FeatureTable {
    pub fn len(&self) -> usize {
        match self {
            FeatureTable::Features(v) => v.len(),
            FeatureTable::MonthlyMeans(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Errors that prevent the pipeline from completing successfully.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum SentimentErrors {
    /// The month cell could not be understood.
    MalformedDate { line: u64, value: String },
    /// A row with zero reviews, under the `Reject` policy.
    DegenerateRow { line: u64 },
    /// The counts of a row, or of the whole dataset, do not fit in a `u64`.
    CountOverflow { line: u64 },
    /// A version was requested on a dataset without versions.
    VersionModeUnavailable,
}

impl Error for SentimentErrors {}

impl Display for SentimentErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentErrors::MalformedDate { line, value } => {
                write!(f, "line {}: cannot parse month {:?}", line, value)
            }
            SentimentErrors::DegenerateRow { line } => {
                write!(
                    f,
                    "line {}: positive, neutral and negative counts are all zero",
                    line
                )
            }
            SentimentErrors::CountOverflow { line } => {
                write!(f, "line {}: the review counts are too large", line)
            }
            SentimentErrors::VersionModeUnavailable => {
                write!(f, "this dataset has no versions")
            }
        }
    }
}
