use std::env;

use serde::{Deserialize, Serialize};

use self::crawl::CrawlConfig;
use self::network::NetworkConfig;
use self::predict::PredictConfig;
use self::ui::UiConfig;

pub mod crawl;
pub mod network;
pub mod predict;
pub mod ui;

pub use crawl::ServerErrorPolicy;

fn default_check_health() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Config {
    pub network: NetworkConfig,
    pub predict: PredictConfig,
    pub crawl: CrawlConfig,
    pub ui: UiConfig,

    /// Ping the predict service once at startup
    #[serde(default = "default_check_health")]
    pub check_health_on_start: bool,
}

impl Config {
    pub fn new() -> Self {
        let check_health_on_start = env::var("CHECK_HEALTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default_check_health());

        Config {
            network: NetworkConfig::new(),
            predict: PredictConfig::default(),
            crawl: CrawlConfig::default(),
            ui: UiConfig::new(),

            check_health_on_start,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            predict: PredictConfig::default(),
            crawl: CrawlConfig::default(),
            ui: UiConfig::default(),
            check_health_on_start: default_check_health(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_profile_fills_in_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"network": {"crawl_url": "http://crawler:9000/api/crawl"}}"#)
                .unwrap();

        assert_eq!(config.network.crawl_url, "http://crawler:9000/api/crawl");
        assert_eq!(config.network.predict_base_url, "http://127.0.0.1:8000");
        assert!(!config.predict.busy_lock);
        assert!(config.crawl.busy_lock);
        assert_eq!(
            config.crawl.server_error_policy,
            ServerErrorPolicy::ReportAsNoResults
        );
        assert!(config.check_health_on_start);
    }

    #[test]
    fn server_error_policy_uses_snake_case() {
        let config: CrawlConfig =
            serde_json::from_str(r#"{"server_error_policy": "report_as_server_failure"}"#).unwrap();

        assert_eq!(
            config.server_error_policy,
            ServerErrorPolicy::ReportAsServerFailure
        );
        assert!(config.busy_lock);
    }
}
