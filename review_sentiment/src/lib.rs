mod config;
use log::{debug, info, warn};

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};
use std::{
    cmp::Ordering,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
};

pub use crate::config::*;

pub mod builder;
pub mod manual;

// **** Dates ****

/// Formats that carry a full date.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d %b %Y"];

/// Formats that carry a date and a time. Only the date is kept.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parses the content of a month cell.
///
/// Accepted inputs: `2023-01-15`, `2023/01/15`, `01/15/2023`, `2023-01`, `2023/01`,
/// `Jan 2023`, `January 2023`, and timestamps such as `2023-01-15T10:00:00`.
/// When no day is given, the first of the month is used.
pub fn parse_month(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS.iter() {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS.iter() {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    // Year and month only
    for (sep, fmt) in [("-", "%Y-%m-%d"), ("/", "%Y/%m/%d")] {
        if let Ok(d) = NaiveDate::parse_from_str(&format!("{}{}01", s, sep), fmt) {
            return Some(d);
        }
    }
    // Month name and year. %b also accepts the full month name.
    NaiveDate::parse_from_str(&format!("1 {}", s), "%d %b %Y").ok()
}

/// The first day of the month of a date.
pub fn month_start(d: NaiveDate) -> NaiveDate {
    d.with_day(1).unwrap_or(d)
}

/// The label of a month, as displayed in selectors: `January 2023`.
pub fn month_label(d: NaiveDate) -> String {
    d.format("%B %Y").to_string()
}

// **** Normalization ****

/// Computes the total and the proportions of each row.
///
/// The rows stay in the same order. Rows without any review do not get proportions: they are
/// either flagged (and logged) or rejected, depending on the policy.
///
/// Fails with `CountOverflow` if the total of a row, or the total of all the rows, does not
/// fit in a `u64`. Every sum computed by the projections is bounded by that last total.
pub fn normalize(
    dataset: &Dataset,
    policy: DegenerateRowPolicy,
) -> Result<NormalizedTable, SentimentErrors> {
    info!(
        "normalize: processing {} rows of a {:?} dataset",
        dataset.len(),
        dataset.kind()
    );
    let mut rows: Vec<SentimentRow> = Vec::with_capacity(dataset.len());
    let mut grand_total: u64 = 0;
    for (review, version) in dataset.reviews() {
        let line = review.line;
        let total_reviews = review
            .counts
            .checked_total()
            .ok_or(SentimentErrors::CountOverflow { line })?;
        grand_total = grand_total
            .checked_add(total_reviews)
            .ok_or(SentimentErrors::CountOverflow { line })?;

        let proportions = Proportions::from_counts(&review.counts);
        if proportions.is_none() {
            match policy {
                DegenerateRowPolicy::Reject => {
                    return Err(SentimentErrors::DegenerateRow { line });
                }
                DegenerateRowPolicy::Exclude => {
                    warn!(
                        "normalize: line {} ({}, {:?}) has no reviews, excluded from proportions",
                        line, review.month, review.feature_title
                    );
                }
            }
        }
        rows.push(SentimentRow {
            line,
            month: review.month,
            feature_title: review.feature_title.clone(),
            feature_description: review.feature_description.clone(),
            feature_type: review.feature_type.clone(),
            version: version.map(|s| s.to_string()),
            counts: review.counts,
            total_reviews,
            proportions,
        });
    }
    Ok(NormalizedTable {
        kind: dataset.kind(),
        rows,
    })
}

// **** Projections ****

/// The points of the stacked area chart, sorted by month.
///
/// Rows with the same month keep their relative order. Degenerate rows are skipped.
pub fn project_area(table: &NormalizedTable) -> Vec<AreaPoint> {
    let mut points: Vec<AreaPoint> = table
        .rows
        .iter()
        .filter_map(|r| {
            r.proportions.map(|p| AreaPoint {
                month: r.month,
                grouping_key: match table.kind {
                    DatasetKind::Basic => r.feature_title.clone(),
                    DatasetKind::Versioned => r.version.clone().unwrap_or_default(),
                },
                positive_pct: p.positive,
                neutral_pct: p.neutral,
                negative_pct: p.negative,
            })
        })
        .collect();
    points.sort_by_key(|p| p.month);
    debug!("project_area: {} points", points.len());
    points
}

/// Total reviews per calendar month, without gaps.
///
/// Every month between the first and the last observed month is present. Months without
/// any row have a total of zero.
pub fn project_trend(table: &NormalizedTable) -> Vec<TrendPoint> {
    let mut totals: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for r in table.rows.iter() {
        let e = totals.entry(month_start(r.month)).or_insert(0);
        *e = e.saturating_add(r.total_reviews);
    }

    let (first, last) = match (totals.keys().next(), totals.keys().next_back()) {
        (Some(f), Some(l)) => (*f, *l),
        _ => return vec![],
    };

    let mut res: Vec<TrendPoint> = Vec::new();
    let mut cur = Some(first);
    while let Some(month) = cur {
        if month > last {
            break;
        }
        res.push(TrendPoint {
            month,
            total_reviews: totals.get(&month).cloned().unwrap_or(0),
        });
        cur = month.checked_add_months(Months::new(1));
    }
    debug!(
        "project_trend: {} months from {} to {} ({} observed)",
        res.len(),
        first,
        last,
        totals.len()
    );
    res
}

/// The overall share of each sentiment, for the pie chart.
///
/// Returns None if there is no review at all.
pub fn project_share(table: &NormalizedTable) -> Option<SentimentShare> {
    let mut counts = SentimentCounts::default();
    for r in table.rows.iter().filter(|r| r.proportions.is_some()) {
        add_counts(&mut counts, &r.counts);
    }
    Proportions::from_counts(&counts).map(|proportions| SentimentShare {
        counts,
        proportions,
    })
}

fn add_counts(acc: &mut SentimentCounts, counts: &SentimentCounts) {
    acc.positive = acc.positive.saturating_add(counts.positive);
    acc.neutral = acc.neutral.saturating_add(counts.neutral);
    acc.negative = acc.negative.saturating_add(counts.negative);
}

/// The feature table.
///
/// - by version: the distinct (title, description) pairs of the version, in the order they
/// first appear.
/// - by month: the mean counts of each feature during the month, highest mean positive count
/// first. Features with the same mean are sorted by title.
pub fn project_table(
    table: &NormalizedTable,
    selector: &TableSelector,
) -> Result<FeatureTable, SentimentErrors> {
    match selector {
        TableSelector::Version(version) => {
            if table.kind != DatasetKind::Versioned {
                return Err(SentimentErrors::VersionModeUnavailable);
            }
            Ok(FeatureTable::Features(features_for_version(
                table,
                version.trim(),
            )))
        }
        TableSelector::Month(label) => Ok(FeatureTable::MonthlyMeans(means_for_month(
            table,
            label.trim(),
        ))),
    }
}

fn features_for_version(table: &NormalizedTable, version: &str) -> Vec<FeatureListing> {
    let mut seen: HashSet<FeatureListing> = HashSet::new();
    let mut res: Vec<FeatureListing> = Vec::new();
    for r in table
        .rows
        .iter()
        .filter(|r| r.version.as_deref() == Some(version))
    {
        let listing = FeatureListing {
            feature_title: r.feature_title.clone(),
            feature_description: r.feature_description.clone().unwrap_or_default(),
        };
        if seen.insert(listing.clone()) {
            res.push(listing);
        }
    }
    debug!(
        "features_for_version: version {:?}: {} distinct features",
        version,
        res.len()
    );
    res
}

fn means_for_month(table: &NormalizedTable, label: &str) -> Vec<FeatureMeans> {
    // Sums in the order the features first appear.
    let mut sums: Vec<(String, SentimentCounts, usize)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for r in table.rows.iter().filter(|r| month_label(r.month) == label) {
        let pos = *positions.entry(r.feature_title.clone()).or_insert_with(|| {
            sums.push((r.feature_title.clone(), SentimentCounts::default(), 0));
            sums.len() - 1
        });
        let (_, acc, n) = &mut sums[pos];
        add_counts(acc, &r.counts);
        *n += 1;
    }

    let mut res: Vec<FeatureMeans> = sums
        .into_iter()
        .map(|(feature_title, acc, n)| {
            let count = n as f64;
            FeatureMeans {
                feature_title,
                mean_positive: acc.positive as f64 / count,
                mean_neutral: acc.neutral as f64 / count,
                mean_negative: acc.negative as f64 / count,
                rows: n,
            }
        })
        .collect();
    res.sort_by(|a, b| {
        b.mean_positive
            .partial_cmp(&a.mean_positive)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.feature_title.cmp(&b.feature_title))
    });
    debug!("means_for_month: {:?}: {} features", label, res.len());
    res
}

// **** Selectors ****

/// The distinct versions, the most recent first.
///
/// A version is as recent as the latest month it appears in. Versions seen in the same month
/// are ordered by version number, highest first, and then by the version string itself
/// (`1.1` before `1.01`). Empty for datasets without versions.
pub fn versions_latest_first(table: &NormalizedTable) -> Vec<String> {
    let mut latest: HashMap<String, NaiveDate> = HashMap::new();
    for r in table.rows.iter() {
        if let Some(v) = r.version.as_ref() {
            let m = month_start(r.month);
            let e = latest.entry(v.clone()).or_insert(m);
            if m > *e {
                *e = m;
            }
        }
    }
    let mut versions: Vec<(String, NaiveDate)> = latest.into_iter().collect();
    versions.sort_by(|(va, ma), (vb, mb)| {
        mb.cmp(ma)
            .then_with(|| compare_versions(vb, va))
            .then_with(|| vb.cmp(va))
    });
    versions.into_iter().map(|(v, _)| v).collect()
}

/// The labels of all the months present, in chronological order.
pub fn month_labels(table: &NormalizedTable) -> Vec<String> {
    let months: BTreeSet<NaiveDate> = table.rows.iter().map(|r| month_start(r.month)).collect();
    months.into_iter().map(month_label).collect()
}

/// Compares version strings segment by segment, numerically when both segments are numbers.
fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut sa = a.split('.');
    let mut sb = b.split('.');
    loop {
        match (sa.next(), sb.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let c = match (x.parse::<u64>(), y.parse::<u64>()) {
                    (Ok(nx), Ok(ny)) => nx.cmp(&ny),
                    _ => x.cmp(y),
                };
                if c != Ordering::Equal {
                    return c;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::builder::{DatasetBuilder, RawReview};
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn basic(rows: &[(&str, u64, u64, u64, &str)]) -> Dataset {
        let mut builder = DatasetBuilder::new(DatasetKind::Basic);
        for (month, p, n, neg, title) in rows {
            builder
                .add_review_simple(month, *p, *n, *neg, title)
                .unwrap();
        }
        builder.build()
    }

    fn versioned(rows: &[(&str, &str, &str, &str)]) -> Dataset {
        let mut builder = DatasetBuilder::new(DatasetKind::Versioned);
        for (idx, (month, version, title, description)) in rows.iter().enumerate() {
            builder
                .add_review(&RawReview {
                    line: idx as u64 + 1,
                    month: *month,
                    counts: SentimentCounts {
                        positive: 2,
                        neutral: 1,
                        negative: 1,
                    },
                    feature_title: *title,
                    feature_description: Some(*description),
                    feature_type: None,
                    version: Some(*version),
                })
                .unwrap();
        }
        builder.build()
    }

    fn normalized(ds: &Dataset) -> NormalizedTable {
        normalize(ds, DegenerateRowPolicy::Exclude).unwrap()
    }

    #[test]
    fn parse_month_formats() {
        assert_eq!(parse_month("2023-01-15"), Some(date(2023, 1, 15)));
        assert_eq!(parse_month(" 2023/02/03 "), Some(date(2023, 2, 3)));
        assert_eq!(parse_month("03/20/2023"), Some(date(2023, 3, 20)));
        assert_eq!(parse_month("2023-04"), Some(date(2023, 4, 1)));
        assert_eq!(parse_month("2023/05"), Some(date(2023, 5, 1)));
        assert_eq!(parse_month("Jun 2023"), Some(date(2023, 6, 1)));
        assert_eq!(parse_month("July 2023"), Some(date(2023, 7, 1)));
        assert_eq!(parse_month("2023-08-09T10:11:12"), Some(date(2023, 8, 9)));
        assert_eq!(parse_month("2023-13"), None);
        assert_eq!(parse_month(""), None);
        assert_eq!(parse_month("soon"), None);
    }

    #[test]
    fn month_label_is_human_readable() {
        assert_eq!(month_label(date(2023, 1, 31)), "January 2023");
    }

    #[test]
    fn proportions_sum_to_one() {
        let ds = basic(&[
            ("2023-01-01", 1, 1, 1, "A"),
            ("2023-01-01", 7, 0, 3, "B"),
            ("2023-02-01", 0, 0, 9, "A"),
            ("2023-02-01", 123, 456, 789, "C"),
        ]);
        let table = normalized(&ds);
        assert_eq!(table.rows.len(), 4);
        for r in table.rows.iter() {
            let p = r.proportions.unwrap();
            assert!((p.positive + p.neutral + p.negative - 1.0).abs() < 1e-9);
            assert_eq!(
                r.total_reviews,
                r.counts.positive + r.counts.neutral + r.counts.negative
            );
        }
        assert_eq!(table.rows[1].proportions.unwrap().positive, 0.7);
    }

    #[test]
    fn degenerate_rows_are_flagged_not_nan() {
        let ds = basic(&[
            ("2023-01-01", 2, 2, 0, "A"),
            ("2023-01-01", 0, 0, 0, "B"),
            ("2023-02-01", 1, 0, 0, "C"),
        ]);
        let table = normalized(&ds);
        let degenerate = table.degenerate_rows();
        assert_eq!(degenerate.len(), 1);
        assert_eq!(degenerate[0].line, 2);
        assert_eq!(degenerate[0].feature_title, "B");

        let area = project_area(&table);
        assert_eq!(area.len(), 2);
        for p in area.iter() {
            assert!(p.positive_pct.is_finite());
            assert!(p.neutral_pct.is_finite());
            assert!(p.negative_pct.is_finite());
        }
        assert!(area.iter().all(|p| p.grouping_key != "B"));
    }

    #[test]
    fn degenerate_rows_rejected_on_demand() {
        let ds = basic(&[("2023-01-01", 2, 2, 0, "A"), ("2023-01-01", 0, 0, 0, "B")]);
        let err = normalize(&ds, DegenerateRowPolicy::Reject).unwrap_err();
        assert_eq!(err, SentimentErrors::DegenerateRow { line: 2 });
    }

    #[test]
    fn oversized_counts_are_a_data_error() {
        let ds = basic(&[("2023-01-01", 1, 1, 1, "A"), ("2023-01-01", u64::MAX, 1, 0, "B")]);
        assert_eq!(
            normalize(&ds, DegenerateRowPolicy::Exclude).unwrap_err(),
            SentimentErrors::CountOverflow { line: 2 }
        );

        // Each row fits, but not their sum.
        let half = u64::MAX / 2 + 1;
        let ds = basic(&[
            ("2023-01-01", half, 0, 0, "A"),
            ("2023-01-01", half, 0, 0, "A"),
        ]);
        assert_eq!(
            normalize(&ds, DegenerateRowPolicy::Exclude).unwrap_err(),
            SentimentErrors::CountOverflow { line: 2 }
        );

        let ds = basic(&[("2023-01-01", u64::MAX, 0, 0, "A")]);
        let table = normalized(&ds);
        assert_eq!(table.rows[0].total_reviews, u64::MAX);
        assert_eq!(project_trend(&table)[0].total_reviews, u64::MAX);
        assert_eq!(project_share(&table).unwrap().proportions.positive, 1.0);
    }

    #[test]
    fn area_sorted_by_month_with_stable_ties() {
        let ds = basic(&[
            ("2023-03-01", 1, 0, 0, "late"),
            ("2023-01-01", 1, 0, 0, "first"),
            ("2023-01-01", 0, 1, 0, "second"),
        ]);
        let area = project_area(&normalized(&ds));
        let keys: Vec<&str> = area.iter().map(|p| p.grouping_key.as_str()).collect();
        assert_eq!(keys, vec!["first", "second", "late"]);
        assert_eq!(area[0].month, date(2023, 1, 1));
    }

    #[test]
    fn area_groups_by_version_for_versioned_data() {
        let ds = versioned(&[("2023-01-01", "5.13", "Chat", "Send messages")]);
        let area = project_area(&normalized(&ds));
        assert_eq!(area[0].grouping_key, "5.13");
    }

    #[test]
    fn trend_fills_missing_months() {
        let ds = basic(&[
            ("2023-01-10", 10, 5, 5, "A"),
            ("2023-03-05", 1, 1, 1, "A"),
            ("2023-01-20", 3, 0, 0, "B"),
        ]);
        let trend = project_trend(&normalized(&ds));
        assert_eq!(
            trend,
            vec![
                TrendPoint {
                    month: date(2023, 1, 1),
                    total_reviews: 23
                },
                TrendPoint {
                    month: date(2023, 2, 1),
                    total_reviews: 0
                },
                TrendPoint {
                    month: date(2023, 3, 1),
                    total_reviews: 3
                },
            ]
        );
    }

    #[test]
    fn trend_crosses_year_boundary() {
        let ds = basic(&[("2022-11-01", 1, 0, 0, "A"), ("2023-02-01", 1, 0, 0, "A")]);
        let months: Vec<NaiveDate> = project_trend(&normalized(&ds))
            .iter()
            .map(|p| p.month)
            .collect();
        assert_eq!(
            months,
            vec![
                date(2022, 11, 1),
                date(2022, 12, 1),
                date(2023, 1, 1),
                date(2023, 2, 1)
            ]
        );
    }

    #[test]
    fn trend_of_empty_table_is_empty() {
        let ds = basic(&[]);
        assert!(project_trend(&normalized(&ds)).is_empty());
    }

    #[test]
    fn month_mode_averages_per_feature() {
        let ds = basic(&[
            ("2023-01-01", 10, 2, 0, "Feature X"),
            ("2023-01-15", 20, 4, 1, "Feature X"),
            ("2023-01-03", 30, 0, 0, "Feature Y"),
            ("2023-02-01", 99, 0, 0, "Feature X"),
        ]);
        let res = project_table(
            &normalized(&ds),
            &TableSelector::Month("January 2023".to_string()),
        )
        .unwrap();
        match res {
            FeatureTable::MonthlyMeans(means) => {
                assert_eq!(means.len(), 2);
                assert_eq!(means[0].feature_title, "Feature Y");
                assert_eq!(means[1].feature_title, "Feature X");
                assert_eq!(means[1].mean_positive, 15.0);
                assert_eq!(means[1].mean_neutral, 3.0);
                assert_eq!(means[1].mean_negative, 0.5);
                assert_eq!(means[1].rows, 2);
            }
            other => panic!("unexpected table {:?}", other),
        }
    }

    #[test]
    fn month_mode_ties_sorted_by_title() {
        let ds = basic(&[("2023-01-01", 5, 0, 0, "b"), ("2023-01-01", 5, 0, 0, "a")]);
        let res = project_table(
            &normalized(&ds),
            &TableSelector::Month("January 2023".to_string()),
        )
        .unwrap();
        match res {
            FeatureTable::MonthlyMeans(means) => {
                let titles: Vec<&str> = means.iter().map(|m| m.feature_title.as_str()).collect();
                assert_eq!(titles, vec!["a", "b"]);
            }
            other => panic!("unexpected table {:?}", other),
        }
    }

    #[test]
    fn version_mode_deduplicates_in_first_seen_order() {
        let ds = versioned(&[
            ("2023-01-01", "2.0", "Chat", "Send messages"),
            ("2023-01-01", "1.0", "Old", "Legacy"),
            ("2023-02-01", "2.0", "Audio", "Noise suppression"),
            ("2023-03-01", "2.0", "Chat", "Send messages"),
            ("2023-03-01", "2.0", "Chat", "Send files"),
        ]);
        let res = project_table(&normalized(&ds), &TableSelector::Version("2.0".to_string()))
            .unwrap();
        let listing = |t: &str, d: &str| FeatureListing {
            feature_title: t.to_string(),
            feature_description: d.to_string(),
        };
        assert_eq!(
            res,
            FeatureTable::Features(vec![
                listing("Chat", "Send messages"),
                listing("Audio", "Noise suppression"),
                listing("Chat", "Send files"),
            ])
        );
    }

    #[test]
    fn version_mode_needs_versions() {
        let ds = basic(&[("2023-01-01", 1, 0, 0, "A")]);
        let err = project_table(&normalized(&ds), &TableSelector::Version("1".to_string()))
            .unwrap_err();
        assert_eq!(err, SentimentErrors::VersionModeUnavailable);
    }

    #[test]
    fn share_ignores_degenerate_rows() {
        let ds = basic(&[
            ("2023-01-01", 6, 3, 1, "A"),
            ("2023-01-01", 0, 0, 0, "B"),
            ("2023-02-01", 4, 1, 5, "A"),
        ]);
        let share = project_share(&normalized(&ds)).unwrap();
        assert_eq!(
            share.counts,
            SentimentCounts {
                positive: 10,
                neutral: 4,
                negative: 6
            }
        );
        assert!((share.proportions.positive - 0.5).abs() < 1e-9);
        assert!(project_share(&normalized(&basic(&[("2023-01-01", 0, 0, 0, "A")]))).is_none());
    }

    #[test]
    fn versions_ordered_latest_first() {
        let ds = versioned(&[
            ("2023-01-01", "5.9", "A", ""),
            ("2023-02-01", "5.10", "A", ""),
            ("2023-02-01", "5.11", "A", ""),
            ("2023-01-01", "5.11", "B", ""),
        ]);
        assert_eq!(
            versions_latest_first(&normalized(&ds)),
            vec!["5.11".to_string(), "5.10".to_string(), "5.9".to_string()]
        );
    }

    #[test]
    fn equivalent_version_numbers_have_a_stable_order() {
        let ds = versioned(&[
            ("2023-01-01", "01.1", "A", ""),
            ("2023-01-01", "1.1", "A", ""),
            ("2023-01-01", "1.001", "A", ""),
            ("2023-01-01", "1.01", "A", ""),
        ]);
        let expected: Vec<String> = ["1.1", "1.01", "1.001", "01.1"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        for _ in 0..20 {
            assert_eq!(versions_latest_first(&normalized(&ds)), expected);
        }
    }

    #[test]
    fn month_labels_are_chronological() {
        let ds = basic(&[
            ("2023-02-01", 1, 0, 0, "A"),
            ("2022-12-01", 1, 0, 0, "A"),
            ("2023-02-20", 1, 0, 0, "A"),
        ]);
        assert_eq!(
            month_labels(&normalized(&ds)),
            vec!["December 2022".to_string(), "February 2023".to_string()]
        );
    }

    #[test]
    fn projections_are_repeatable() {
        let ds = basic(&[
            ("2023-01-01", 10, 2, 0, "Feature X"),
            ("2023-03-01", 20, 4, 1, "Feature Y"),
            ("2023-01-01", 5, 5, 5, "Feature Z"),
        ]);
        let selector = TableSelector::Month("January 2023".to_string());
        let first = normalized(&ds);
        let second = normalized(&ds);
        assert_eq!(first, second);
        assert_eq!(project_area(&first), project_area(&second));
        assert_eq!(project_trend(&first), project_trend(&second));
        assert_eq!(
            project_table(&first, &selector),
            project_table(&second, &selector)
        );
    }
}
