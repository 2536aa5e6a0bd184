use std::sync::Arc;

use kanal::AsyncReceiver;
use rentscope_core::TriggerOutcome;
use rentscope_types::{AppEvent, Trigger};
use tokio::task::JoinSet;

use crate::state::AppState;

pub mod trigger_crawl;
pub mod trigger_predict;

use trigger_crawl::handle_crawl_trigger;
use trigger_predict::handle_predict_trigger;

/// App's main loop.
///
/// Edits are applied in order. A click claims its trigger right here, before
/// the next event is read, so a second click on a locked button is refused
/// even if the first request has not started yet. The accepted lifecycle then
/// runs on its own task and the loop keeps taking input while it is pending.
/// On shutdown, in-flight requests are allowed to settle first.
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
) -> anyhow::Result<()> {
    let mut in_flight = JoinSet::new();

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    while let Ok(event) = ui_to_app_rx.recv().await {
        tracing::debug!("[EVENT_LOOP] event: {:?}", event);

        // Reap finished triggers so the set does not grow unbounded
        while let Some(joined) = in_flight.try_join_next() {
            log_join(joined);
        }

        if rentscope_ui::apply_edit(&state.form, &event) {
            continue;
        }

        match event {
            AppEvent::Click(Trigger::Predict) => match state.predict.claim() {
                Some(claim) => {
                    in_flight.spawn(handle_predict_trigger(state.clone(), claim));
                }
                None => ignored(&state, Trigger::Predict),
            },
            AppEvent::Click(Trigger::Crawl) => match state.crawl.claim() {
                Some(claim) => {
                    in_flight.spawn(handle_crawl_trigger(state.clone(), claim));
                }
                None => ignored(&state, Trigger::Crawl),
            },
            AppEvent::Dump => {
                tracing::info!(
                    predict = ?state.form.predict_form(),
                    crawl = ?state.form.crawl_form(),
                    "form contents"
                );
                println!("{:#?}\n{:#?}", state.form.predict_form(), state.form.crawl_form());
            }
            AppEvent::Shutdown => {
                tracing::info!("[EVENT_LOOP] Shutdown requested");
                break;
            }
            _ => {}
        }
    }

    if !in_flight.is_empty() {
        tracing::info!(pending = in_flight.len(), "waiting for in-flight requests");
    }
    while let Some(joined) = in_flight.join_next().await {
        log_join(joined);
    }

    state.status.log_summary();
    Ok(())
}

fn ignored(state: &AppState, trigger: Trigger) {
    tracing::info!(?trigger, "Button is disabled while its request is running");
    state.status.for_trigger(trigger).record(TriggerOutcome::Ignored);
}

fn log_join(joined: Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined {
        tracing::error!("trigger task panicked: {e}");
    }
}
