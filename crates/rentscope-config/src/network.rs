use std::env;

use serde::{Deserialize, Serialize};

fn default_predict_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_crawl_url() -> String {
    "http://127.0.0.1:8000/api/crawl".to_string()
}

/// Where the two remote capabilities live
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct NetworkConfig {
    /// Origin serving the page; `/predict` is resolved against it
    #[serde(default = "default_predict_base_url")]
    pub predict_base_url: String,
    /// Absolute crawler endpoint, usually on another origin
    #[serde(default = "default_crawl_url")]
    pub crawl_url: String,
}

impl NetworkConfig {
    pub fn new() -> Self {
        let predict_base_url =
            env::var("PREDICT_BASE_URL").unwrap_or_else(|_| default_predict_base_url());
        let crawl_url = env::var("CRAWL_URL").unwrap_or_else(|_| default_crawl_url());

        Self {
            predict_base_url,
            crawl_url,
        }
    }

    pub fn predict_url(&self) -> String {
        format!("{}/predict", self.predict_base_url.trim_end_matches('/'))
    }

    pub fn health_url(&self) -> String {
        format!("{}/health", self.predict_base_url.trim_end_matches('/'))
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            predict_base_url: default_predict_base_url(),
            crawl_url: default_crawl_url(),
        }
    }
}
