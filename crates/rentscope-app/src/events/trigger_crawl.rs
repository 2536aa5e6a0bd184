use std::sync::Arc;

use rentscope_core::{Claim, TriggerOutcome};
use rentscope_types::Trigger;

use crate::state::AppState;

pub async fn handle_crawl_trigger(state: Arc<AppState>, claim: Claim) {
    tracing::debug!(">>> [CRAWL] Triggered");

    let outcome = state.crawl.run(claim).await;
    state.status.for_trigger(Trigger::Crawl).record(outcome);

    if let TriggerOutcome::Completed(ui_state) = outcome {
        tracing::debug!(?ui_state, ">>> [CRAWL] Settled");
    }
}
