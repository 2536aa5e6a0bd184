use std::sync::Arc;

use rentscope_core::Claim;
use rentscope_types::Trigger;

use crate::state::AppState;

pub async fn handle_predict_trigger(state: Arc<AppState>, claim: Claim) {
    tracing::debug!(">>> [PREDICT] Triggered");

    let outcome = state.predict.run(claim).await;
    state.status.for_trigger(Trigger::Predict).record(outcome);

    tracing::debug!(?outcome, ">>> [PREDICT] Settled");
}
