use std::io::Write;
use std::sync::Arc;

use rentscope_client::ApiClient;
use rentscope_config::Config;
use rentscope_core::{BusyLock, CrawlController, PredictionController};
use rentscope_ui::{FormState, TerminalView};

use crate::status::AppStatus;

/// The page view; boxed so tests can capture it
pub type PageView = TerminalView<Box<dyn Write + Send>>;

pub struct AppState {
    pub form: Arc<FormState>,
    pub view: Arc<PageView>,
    pub predict: Arc<PredictionController>,
    pub crawl: Arc<CrawlController>,
    pub status: AppStatus,
}

impl AppState {
    /// Wire both controllers to one form and one view
    pub fn new(config: Config, client: ApiClient, view: PageView) -> Self {
        let form = Arc::new(FormState::new());
        let view = Arc::new(view);

        let predict = PredictionController::new(
            client.clone(),
            config.network.predict_url(),
            form.clone(),
            view.clone(),
        )
        .with_busy_lock(BusyLock::from(config.predict.busy_lock));

        let crawl = CrawlController::new(
            client,
            config.network.crawl_url.clone(),
            form.clone(),
            view.clone(),
        )
        .with_busy_lock(BusyLock::from(config.crawl.busy_lock))
        .with_server_error_policy(config.crawl.server_error_policy);

        Self {
            form,
            view,
            predict: Arc::new(predict),
            crawl: Arc::new(crawl),
            status: AppStatus::new(),
        }
    }
}
