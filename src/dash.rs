use log::{debug, info, warn};

use review_sentiment::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::dash::cache::{DatasetCache, LoadOutcome};
use crate::dash::config_reader::*;
use crate::dash::schema::{Validation, View};

pub mod cache;
pub mod config_reader;
mod io_common;
pub mod io_csv;
pub mod schema;

#[derive(Debug, Snafu)]
pub enum DashError {
    #[snafu(display("CSV file for '{app}' not found ({path})"))]
    NotFound { app: String, path: String },
    #[snafu(display("The CSV for '{app}' must contain the columns: {}", missing.join(", ")))]
    SchemaInvalid { app: String, missing: Vec<String> },
    #[snafu(display("line {lineno}: cannot read {column:?} value {value:?} as a count"))]
    MalformedCount {
        lineno: u64,
        column: String,
        value: String,
    },
    #[snafu(display("Cannot process the reviews"))]
    Sentiment { source: SentimentErrors },
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing file {path}"))]
    WritingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading CSV file {path}"))]
    ParsingCsv { source: csv::Error, path: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Unknown view {view:?} (expected basic, versioned or detailed)"))]
    UnknownView { view: String },
    #[snafu(display("Difference detected between the summary and the reference {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type DashResult<T> = Result<T, DashError>;

/// What the user is looking at. Owned by the caller and passed explicitly to each render.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RenderRequest {
    pub app: String,
    /// The name displayed for the application.
    pub label: String,
    pub view: View,
    pub table: Option<TableSelector>,
    pub policy: DegenerateRowPolicy,
}

/// One full pass: load, validate, normalize, project.
///
/// Any failure stops the pass. Nothing is rendered from a table that failed validation.
pub fn render(cache: &DatasetCache, request: &RenderRequest) -> DashResult<JSValue> {
    let kind = request.view.dataset_kind();
    let raw = match cache.load(&request.app, kind)? {
        LoadOutcome::Loaded(t) => t,
        LoadOutcome::NotFound { path } => {
            return NotFoundSnafu {
                app: request.app.clone(),
                path: path.display().to_string(),
            }
            .fail();
        }
    };

    if let Validation::MissingColumns(missing) =
        schema::validate(&raw, &request.view.required_columns())
    {
        return SchemaInvalidSnafu {
            app: request.app.clone(),
            missing,
        }
        .fail();
    }

    let dataset = io_csv::to_dataset(&raw, request.view)?;
    let table = normalize(&dataset, request.policy).context(SentimentSnafu {})?;

    let feature_table = match request.table.as_ref() {
        Some(selector) => Some(project_table(&table, selector).context(SentimentSnafu {})?),
        None => None,
    };

    info!(
        "Rendered {:?} ({} view): {} rows, {} without reviews",
        request.app,
        request.view.name(),
        table.rows.len(),
        table.degenerate_rows().len()
    );
    Ok(build_summary_js(request, &table, feature_table.as_ref()))
}

fn date_js(d: chrono::NaiveDate) -> JSValue {
    json!(d.format("%Y-%m-%d").to_string())
}

fn proportions_js(p: &Proportions) -> JSValue {
    json!({"positive": p.positive, "neutral": p.neutral, "negative": p.negative})
}

fn feature_table_js(selector: &TableSelector, ft: &FeatureTable) -> JSValue {
    match (selector, ft) {
        (TableSelector::Version(version), FeatureTable::Features(features)) => {
            let rows: Vec<JSValue> = features
                .iter()
                .map(|f| {
                    json!({
                        "featureTitle": f.feature_title,
                        "featureDescription": f.feature_description
                    })
                })
                .collect();
            json!({"mode": "version", "version": version, "features": rows})
        }
        (TableSelector::Month(month), FeatureTable::MonthlyMeans(means)) => {
            let rows: Vec<JSValue> = means
                .iter()
                .map(|m| {
                    json!({
                        "featureTitle": m.feature_title,
                        "meanPositive": m.mean_positive,
                        "meanNeutral": m.mean_neutral,
                        "meanNegative": m.mean_negative,
                        "rows": m.rows
                    })
                })
                .collect();
            json!({"mode": "month", "month": month, "features": rows})
        }
        (s, t) => {
            warn!("feature_table_js: table {:?} does not match {:?}", t, s);
            JSValue::Null
        }
    }
}

fn build_summary_js(
    request: &RenderRequest,
    table: &NormalizedTable,
    feature_table: Option<&FeatureTable>,
) -> JSValue {
    let area: Vec<JSValue> = project_area(table)
        .iter()
        .map(|p| {
            json!({
                "month": date_js(p.month),
                "key": p.grouping_key,
                "positive": p.positive_pct,
                "neutral": p.neutral_pct,
                "negative": p.negative_pct
            })
        })
        .collect();

    let trend: Vec<JSValue> = project_trend(table)
        .iter()
        .map(|p| json!({"month": date_js(p.month), "totalReviews": p.total_reviews}))
        .collect();

    let share = project_share(table).map(|s| {
        json!({
            "positive": s.counts.positive,
            "neutral": s.counts.neutral,
            "negative": s.counts.negative,
            "proportions": proportions_js(&s.proportions)
        })
    });

    let degenerate: Vec<JSValue> = table
        .degenerate_rows()
        .iter()
        .map(|r| {
            json!({
                "line": r.line,
                "month": date_js(r.month),
                "featureTitle": r.feature_title
            })
        })
        .collect();

    let table_js = match (request.table.as_ref(), feature_table) {
        (Some(selector), Some(ft)) => feature_table_js(selector, ft),
        _ => JSValue::Null,
    };

    json!({
        "application": request.app,
        "label": request.label,
        "view": request.view.name(),
        "area": area,
        "trend": trend,
        "share": share,
        "versions": versions_latest_first(table),
        "months": month_labels(table),
        "table": table_js,
        "degenerateRows": degenerate
    })
}

/// Builds the request from the command line, on top of the configuration.
pub fn build_request(args: &Args, config: &DashboardConfig) -> DashResult<RenderRequest> {
    let app = match args.app.clone().or_else(|| config.default_app()) {
        Some(a) => a.trim().to_lowercase(),
        None => whatever!("No application requested and none configured"),
    };
    let label = match config.application(&app) {
        Some(entry) => entry.label.clone().unwrap_or_else(|| app.clone()),
        None => {
            debug!("build_request: {:?} is not a configured application", app);
            app.clone()
        }
    };

    let view = match args.view.as_deref() {
        Some(v) => View::parse(v)?,
        None if config
            .application(&app)
            .and_then(|a| a.versioned)
            .unwrap_or(false) =>
        {
            View::Versioned
        }
        None => View::Basic,
    };

    let table = match (args.feature_version.clone(), args.month.clone()) {
        (Some(_), Some(_)) => {
            whatever!("Select the feature table either by version or by month, not both")
        }
        (Some(v), None) => Some(TableSelector::Version(v)),
        (None, Some(m)) => Some(TableSelector::Month(m)),
        (None, None) => None,
    };

    let policy = if args.reject_degenerate {
        DegenerateRowPolicy::Reject
    } else {
        config.degenerate_row_policy()?
    };

    Ok(RenderRequest {
        app,
        label,
        view,
        table,
        policy,
    })
}

/// The data directory: the command line first, then the configuration (relative to the
/// configuration file), then the current directory.
fn data_directory(args: &Args, config: &DashboardConfig) -> PathBuf {
    if let Some(d) = args.data_dir.as_ref() {
        return PathBuf::from(d);
    }
    match (config.data_directory.as_ref(), args.config.as_ref()) {
        (Some(d), Some(config_path)) => {
            let root = Path::new(config_path).parent().unwrap_or_else(|| Path::new(""));
            root.join(d)
        }
        (Some(d), None) => PathBuf::from(d),
        (None, _) => PathBuf::from("."),
    }
}

fn write_output(out: Option<&str>, contents: &str) -> DashResult<()> {
    match out {
        None | Some("") | Some("stdout") => {
            println!("{}", contents);
        }
        Some(path) => {
            fs::write(path, contents).context(WritingFileSnafu { path })?;
            info!("Summary written to {}", path);
        }
    }
    Ok(())
}

pub fn run_dashboard(args: &Args) -> DashResult<()> {
    let config = match args.config.as_ref() {
        Some(p) => read_config(p)?,
        None => DashboardConfig::default(),
    };
    let request = build_request(args, &config)?;
    info!("request: {:?}", request);

    let cache = DatasetCache::new(data_directory(args, &config));
    info!("Reading data from {:?}", cache.data_dir());
    let summary = render(&cache, &request)?;
    let pretty_js = serde_json::to_string_pretty(&summary).context(ParsingJsonSnafu {})?;
    write_output(args.out.as_deref(), &pretty_js)?;

    // The reference summary, if provided for comparison
    if let Some(reference_p) = args.reference.as_ref() {
        let reference = read_summary(reference_p)?;
        let pretty_js_reference =
            serde_json::to_string_pretty(&reference).context(ParsingJsonSnafu {})?;
        if pretty_js_reference != pretty_js {
            warn!("Found differences with the reference summary");
            print_diff(pretty_js_reference.as_str(), pretty_js.as_str(), "\n");
            return ReferenceMismatchSnafu {
                path: reference_p.clone(),
            }
            .fail();
        }
        info!("The summary matches the reference {}", reference_p);
    }
    Ok(())
}
