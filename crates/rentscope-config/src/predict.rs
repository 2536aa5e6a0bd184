use serde::{Deserialize, Serialize};

#[derive(Default, Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct PredictConfig {
    /// Disable the predict trigger while a request is in flight.
    /// Off: concurrent predictions race and the last to resolve is shown.
    pub busy_lock: bool,
}
