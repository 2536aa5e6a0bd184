pub mod classify;
pub mod crawl;
pub mod error;
pub mod format;
pub mod lifecycle;
pub mod ports;
pub mod predict;

pub use classify::{StatusClass, classify_status};
pub use crawl::{CrawlController, CrawlMessages};
pub use error::{RenderError, RequestError};
pub use lifecycle::{BusyLock, Claim, TriggerOutcome};
pub use ports::{
    CrawlInput, CrawlOutput, PredictionDisplay, PredictionInput, PredictionOutput, TableRow,
    TriggerAppearance,
};
pub use predict::PredictionController;
pub use rentscope_config::ServerErrorPolicy;

#[cfg(test)]
mod tests;
