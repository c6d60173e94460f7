pub use crate::config::*;

use log::debug;

/// The cells of one row, as read from a file.
///
/// Only the month still needs to be parsed.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct RawReview<'a> {
    /// The line in the file, reported in errors.
    pub line: u64,
    pub month: &'a str,
    pub counts: SentimentCounts,
    pub feature_title: &'a str,
    pub feature_description: Option<&'a str>,
    pub feature_type: Option<&'a str>,
    pub version: Option<&'a str>,
}

/// A builder for assembling a dataset row by row.
///
/// ```
/// pub use review_sentiment::builder::DatasetBuilder;
/// pub use review_sentiment::DatasetKind;
/// # use review_sentiment::SentimentErrors;
///
/// let mut builder = DatasetBuilder::new(DatasetKind::Basic);
///
/// builder.add_review_simple("2023-01-01", 10, 5, 1, "Screen sharing")?;
/// builder.add_review_simple("Feb 2023", 3, 0, 7, "Screen sharing")?;
///
/// let dataset = builder.build();
/// assert_eq!(dataset.len(), 2);
///
/// # Ok::<(), SentimentErrors>(())
/// ```
pub struct DatasetBuilder {
    pub(crate) _kind: DatasetKind,
    pub(crate) _basic: Vec<ReviewRecord>,
    pub(crate) _versioned: Vec<VersionedReview>,
}

impl DatasetBuilder {
    pub fn new(kind: DatasetKind) -> DatasetBuilder {
        DatasetBuilder {
            _kind: kind,
            _basic: Vec::new(),
            _versioned: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self._basic.len() + self._versioned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds a row with only the mandatory cells. The row is numbered after its position.
    pub fn add_review_simple(
        &mut self,
        month: &str,
        positive: u64,
        neutral: u64,
        negative: u64,
        feature_title: &str,
    ) -> Result<(), SentimentErrors> {
        self.add_review(&RawReview {
            line: self.len() as u64 + 1,
            month,
            counts: SentimentCounts {
                positive,
                neutral,
                negative,
            },
            feature_title,
            feature_description: None,
            feature_type: None,
            version: None,
        })
    }

    /// Adds a row read from a file.
    ///
    /// Fails with `MalformedDate` if the month cannot be parsed.
    pub fn add_review(&mut self, raw: &RawReview) -> Result<(), SentimentErrors> {
        let month = crate::parse_month(raw.month).ok_or_else(|| {
            SentimentErrors::MalformedDate {
                line: raw.line,
                value: raw.month.to_string(),
            }
        })?;
        let record = ReviewRecord {
            line: raw.line,
            month,
            counts: raw.counts,
            feature_title: raw.feature_title.trim().to_string(),
            feature_description: raw.feature_description.map(|s| s.trim().to_string()),
            feature_type: raw
                .feature_type
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        };
        debug!("add_review: line {}: {:?}", raw.line, record);
        let version = raw.version.map(|s| s.trim().to_string());
        self.add_record(record, version);
        Ok(())
    }

    /// Adds an already typed record.
    ///
    /// The version is ignored by basic builders. Versioned builders use an empty version
    /// when none is given.
    pub fn add_record(&mut self, record: ReviewRecord, version: Option<String>) {
        match self._kind {
            DatasetKind::Basic => self._basic.push(record),
            DatasetKind::Versioned => self._versioned.push(VersionedReview {
                version: version.unwrap_or_default(),
                review: record,
            }),
        }
    }

    pub fn build(self) -> Dataset {
        match self._kind {
            DatasetKind::Basic => Dataset::Basic(self._basic),
            DatasetKind::Versioned => Dataset::Versioned(self._versioned),
        }
    }
}
