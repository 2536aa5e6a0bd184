use std::env;

use serde::{Deserialize, Serialize};

fn default_color() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct UiConfig {
    /// Paint the crawl button color with ANSI escapes
    #[serde(default = "default_color")]
    pub color: bool,
}

impl UiConfig {
    pub fn new() -> Self {
        let color = env::var("NO_COLOR").is_err();

        Self { color }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}
