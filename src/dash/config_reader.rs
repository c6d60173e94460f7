use crate::dash::*;

use review_sentiment::DegenerateRowPolicy;
use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

/// The applications known without any configuration.
pub const DEFAULT_APPLICATIONS: [&str; 3] = ["zoom", "webex", "firefox"];

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationEntry {
    pub name: String,
    pub label: Option<String>,
    /// Reads `{name}_with_versions.csv` by default.
    pub versioned: Option<bool>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(rename = "dataDirectory")]
    pub data_directory: Option<String>,
    #[serde(rename = "defaultApplication")]
    pub default_application: Option<String>,
    #[serde(rename = "degenerateRows")]
    pub degenerate_rows: Option<String>,
    pub applications: Option<Vec<ApplicationEntry>>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            data_directory: None,
            default_application: None,
            degenerate_rows: None,
            applications: Some(
                DEFAULT_APPLICATIONS
                    .iter()
                    .map(|name| ApplicationEntry {
                        name: name.to_string(),
                        label: None,
                        versioned: None,
                    })
                    .collect(),
            ),
        }
    }
}

impl DashboardConfig {
    pub fn degenerate_row_policy(&self) -> DashResult<DegenerateRowPolicy> {
        match self.degenerate_rows.as_deref().map(|s| s.trim()) {
            None | Some("exclude") => Ok(DegenerateRowPolicy::Exclude),
            Some("reject") => Ok(DegenerateRowPolicy::Reject),
            Some(x) => whatever!(
                "unknown degenerateRows option {:?} (expected exclude or reject)",
                x
            ),
        }
    }

    pub fn application(&self, name: &str) -> Option<&ApplicationEntry> {
        let name = name.trim().to_lowercase();
        self.applications
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .find(|a| a.name.trim().to_lowercase() == name)
    }

    /// The application shown when none is requested.
    pub fn default_app(&self) -> Option<String> {
        self.default_application.clone().or_else(|| {
            self.applications
                .as_ref()
                .and_then(|apps| apps.first())
                .map(|a| a.name.clone())
        })
    }
}

pub fn read_config(path: &str) -> DashResult<DashboardConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: DashboardConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

/// Reads a reference summary.
pub fn read_summary(path: &str) -> DashResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}
