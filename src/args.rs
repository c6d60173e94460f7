use clap::Parser;

/// Sentiment reporting over review datasets.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the data directory and the applications.
    /// See the manual of the review_sentiment crate for the format.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (directory, default: current directory) Where the `{app}.csv` files are. Overrides
    /// the directory given in the configuration.
    #[clap(short, long, value_parser)]
    pub data_dir: Option<String>,

    /// (name) The application to report on, for instance `zoom`. Defaults to the first
    /// configured application.
    #[clap(short, long, value_parser)]
    pub app: Option<String>,

    /// (basic, versioned or detailed, default basic) Which dataset and which set of columns to use.
    /// `versioned` reads `{app}_with_versions.csv`.
    #[clap(long, value_parser)]
    pub view: Option<String>,

    /// (version string, optional) Lists the features of this version in the feature table.
    /// Only for the versioned view.
    #[clap(long = "feature-version", value_parser)]
    pub feature_version: Option<String>,

    /// (month label, optional) Averages the counts of each feature for this month in the
    /// feature table, for example "January 2023".
    #[clap(short, long, value_parser)]
    pub month: Option<String>,

    /// (file path, 'stdout' or empty) Where to write the JSON summary. Prints to the standard output by default.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference JSON summary. If provided, revdash checks that its output matches it.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// Stops at the first row without any review instead of leaving it out of the charts.
    #[clap(long, takes_value = false)]
    pub reject_degenerate: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
