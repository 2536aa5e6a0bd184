use std::sync::Arc;

use rentscope_client::{ApiClient, RemoteOutcome};
use rentscope_config::ServerErrorPolicy;
use rentscope_types::{CrawlRequest, CrawlResponse, RequestUiState};
use tracing::Instrument;
use uuid::Uuid;

use crate::classify::{reads_as_no_results, status_error};
use crate::error::RequestError;
use crate::lifecycle::{BusyLock, Claim, StateCell, TriggerLock, TriggerOutcome};
use crate::ports::{CrawlInput, CrawlOutput, TableRow, TriggerAppearance};

/// User-facing crawl failure texts
pub struct CrawlMessages;

impl CrawlMessages {
    pub const ALERT_PREFIX: &'static str = "오류 발생: ";
    pub const NO_RESULTS: &'static str = "검색 결과 없음";
    pub const SERVER_FAILURE: &'static str = "서버 오류";
    pub const UNKNOWN: &'static str = "알 수 없는 오류";

    /// Alert body for a failed crawl
    pub fn alert_text(error: &RequestError, policy: ServerErrorPolicy) -> String {
        let message = if reads_as_no_results(error, policy) {
            Self::NO_RESULTS.to_string()
        } else {
            match error {
                RequestError::ServerFailure { .. } => Self::SERVER_FAILURE.to_string(),
                RequestError::UnknownHttp { .. } => Self::UNKNOWN.to_string(),
                other => other.to_string(),
            }
        };

        format!("{}{message}", Self::ALERT_PREFIX)
    }
}

/// Drives the rental listing search.
///
/// Every accepted click locks the trigger first, before the form is even
/// read, and unlocks it exactly once when the lifecycle ends, whichever way
/// it ends. Failures are raised as alerts.
pub struct CrawlController {
    client: ApiClient,
    url: String,
    input: Arc<dyn CrawlInput>,
    output: Arc<dyn CrawlOutput>,
    lock: TriggerLock,
    server_error_policy: ServerErrorPolicy,
    state: StateCell,
}

impl CrawlController {
    pub fn new(
        client: ApiClient,
        url: impl Into<String>,
        input: Arc<dyn CrawlInput>,
        output: Arc<dyn CrawlOutput>,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            input,
            output,
            lock: TriggerLock::new(BusyLock::Enabled),
            server_error_policy: ServerErrorPolicy::default(),
            state: StateCell::default(),
        }
    }

    pub fn with_busy_lock(mut self, busy_lock: BusyLock) -> Self {
        self.lock = TriggerLock::new(busy_lock);
        self
    }

    pub fn with_server_error_policy(mut self, policy: ServerErrorPolicy) -> Self {
        self.server_error_policy = policy;
        self
    }

    pub fn busy_lock(&self) -> BusyLock {
        self.lock.mode()
    }

    pub fn server_error_policy(&self) -> ServerErrorPolicy {
        self.server_error_policy
    }

    pub fn state(&self) -> RequestUiState {
        self.state.get()
    }

    /// Whether a request currently holds the trigger
    pub fn in_flight(&self) -> bool {
        self.lock.is_engaged()
    }

    /// Handle one click on the search button
    pub async fn trigger(&self) -> TriggerOutcome {
        match self.claim() {
            Some(claim) => self.run(claim).await,
            None => TriggerOutcome::Ignored,
        }
    }

    /// Accept a click and lock the UI, before the form is read.
    ///
    /// `None` while another search holds the trigger. The returned claim
    /// restores the trigger and hides the loading indicator when dropped.
    pub fn claim(&self) -> Option<Claim> {
        let Some(engaged) = self.lock.try_engage() else {
            tracing::debug!("crawl trigger ignored while busy");
            return None;
        };

        self.state.set(RequestUiState::Busy);
        self.output.set_trigger(&TriggerAppearance::searching());
        self.output.set_loading_visible(true);
        self.output.clear_rows();
        self.output.set_result_area_visible(false);

        let output = self.output.clone();
        Some(Claim::with_cleanup(engaged, move || {
            output.set_loading_visible(false);
            output.set_trigger(&TriggerAppearance::idle());
        }))
    }

    /// Run the lifecycle for an accepted click
    pub async fn run(&self, claim: Claim) -> TriggerOutcome {
        let _claim = claim;

        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("crawl", %request_id);

        let state = async {
            match self.search().await {
                Ok(rows) => {
                    tracing::info!(rows, "crawl rendered");
                    RequestUiState::Success
                }
                Err(e) => {
                    tracing::warn!(kind = e.kind(), error = %e, "crawl failed");
                    self.output
                        .alert(&CrawlMessages::alert_text(&e, self.server_error_policy));
                    RequestUiState::Error
                }
            }
        }
        .instrument(span)
        .await;

        self.state.set(state);
        TriggerOutcome::Completed(state)
    }

    async fn search(&self) -> Result<usize, RequestError> {
        let request = self.input.read_form().to_request()?;
        let response = self.request(&request).await?;
        self.render(&response)
    }

    async fn request(&self, request: &CrawlRequest) -> Result<CrawlResponse, RequestError> {
        match self.client.post(&self.url, request).await {
            RemoteOutcome::Ok(response) => Ok(response),
            RemoteOutcome::Status(status) => Err(status_error(status)),
            RemoteOutcome::NetworkFailure(e) => Err(RequestError::Network(e)),
            RemoteOutcome::DecodeFailure(e) => Err(RequestError::Decode(e)),
        }
    }

    fn render(&self, response: &CrawlResponse) -> Result<usize, RequestError> {
        let rows = response.rows();

        if rows.is_empty() {
            self.output.append_row(TableRow::no_results())?;
            self.output.set_result_area_visible(true);
            return Ok(0);
        }

        for row in rows {
            self.output.append_row(TableRow::Cells(row.cells()))?;
            self.output.set_result_area_visible(true);
        }

        Ok(rows.len())
    }
}
