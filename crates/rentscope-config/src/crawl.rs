use serde::{Deserialize, Serialize};

fn default_busy_lock() -> bool {
    true
}

/// How a crawler HTTP 500 is reported to the user
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ServerErrorPolicy {
    /// Same "no results" message as HTTP 400. Matches the deployed page.
    #[default]
    ReportAsNoResults,
    /// Distinct server-failure message
    ReportAsServerFailure,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct CrawlConfig {
    /// Disable the crawl trigger while a request is in flight
    #[serde(default = "default_busy_lock")]
    pub busy_lock: bool,
    #[serde(default)]
    pub server_error_policy: ServerErrorPolicy,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            busy_lock: default_busy_lock(),
            server_error_policy: ServerErrorPolicy::default(),
        }
    }
}
