use std::sync::Arc;

use rentscope_client::{ApiClient, RemoteOutcome};
use rentscope_types::{PredictionRequest, PredictionResult, RequestUiState};
use tracing::Instrument;
use uuid::Uuid;

use crate::classify::status_error;
use crate::error::RequestError;
use crate::lifecycle::{BusyLock, Claim, StateCell, TriggerLock, TriggerOutcome};
use crate::ports::{PredictionDisplay, PredictionInput, PredictionOutput};

/// Drives the price prediction form.
///
/// Failures of every kind end in the same inline message; nothing is
/// raised to the user as an alert. The trigger is not locked by default,
/// so overlapping clicks each run and the last response to arrive is the
/// one left on screen.
pub struct PredictionController {
    client: ApiClient,
    url: String,
    input: Arc<dyn PredictionInput>,
    output: Arc<dyn PredictionOutput>,
    lock: TriggerLock,
    state: StateCell,
}

impl PredictionController {
    pub fn new(
        client: ApiClient,
        url: impl Into<String>,
        input: Arc<dyn PredictionInput>,
        output: Arc<dyn PredictionOutput>,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            input,
            output,
            lock: TriggerLock::new(BusyLock::Disabled),
            state: StateCell::default(),
        }
    }

    pub fn with_busy_lock(mut self, busy_lock: BusyLock) -> Self {
        self.lock = TriggerLock::new(busy_lock);
        self
    }

    pub fn busy_lock(&self) -> BusyLock {
        self.lock.mode()
    }

    pub fn state(&self) -> RequestUiState {
        self.state.get()
    }

    /// Handle one click on the predict button
    pub async fn trigger(&self) -> TriggerOutcome {
        match self.claim() {
            Some(claim) => self.run(claim).await,
            None => TriggerOutcome::Ignored,
        }
    }

    /// Accept a click. Only refuses when the busy lock is enabled and a
    /// request is still in flight.
    pub fn claim(&self) -> Option<Claim> {
        let claim = self.lock.try_engage().map(Claim::new);
        if claim.is_none() {
            tracing::debug!("predict trigger ignored while busy");
        }
        claim
    }

    /// Run the lifecycle for an accepted click
    pub async fn run(&self, claim: Claim) -> TriggerOutcome {
        let _claim = claim;

        let request = self.input.read_form().to_request();

        if request.address.is_empty() {
            let error = RequestError::Validation { field: "address" };
            tracing::info!(kind = error.kind(), "{error}");
            self.output.render(PredictionDisplay::AddressPrompt);
            return TriggerOutcome::Completed(self.state.get());
        }

        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("predict", %request_id);

        let state = self.settle(&request).instrument(span).await;
        self.state.set(state);

        TriggerOutcome::Completed(state)
    }

    async fn settle(&self, request: &PredictionRequest) -> RequestUiState {
        self.state.set(RequestUiState::Busy);
        self.output.render(PredictionDisplay::Loading);

        match self.request(request).await {
            Ok(result) => {
                tracing::info!(
                    deposit = result.deposit_pred,
                    monthly = result.monthly_pred,
                    "prediction received"
                );
                self.output.render(PredictionDisplay::Estimate {
                    deposit: result.deposit_pred,
                    monthly: result.monthly_pred,
                });
                RequestUiState::Success
            }
            Err(e) => {
                tracing::warn!(kind = e.kind(), error = %e, "prediction failed");
                self.output.render(PredictionDisplay::Failed);
                RequestUiState::Error
            }
        }
    }

    async fn request(&self, request: &PredictionRequest) -> Result<PredictionResult, RequestError> {
        match self.client.post(&self.url, request).await {
            RemoteOutcome::Ok(result) => Ok(result),
            RemoteOutcome::Status(status) => Err(status_error(status)),
            RemoteOutcome::NetworkFailure(e) => Err(RequestError::Network(e)),
            RemoteOutcome::DecodeFailure(e) => Err(RequestError::Decode(e)),
        }
    }
}
