use rentscope_types::AppEvent;

use crate::state::FormState;

/// Apply a form edit to the page state. Returns `false` for events that are
/// not edits (clicks, shutdown) so the caller can route them elsewhere.
pub fn apply_edit(form: &FormState, event: &AppEvent) -> bool {
    match event {
        AppEvent::PredictInput { field, value } => {
            tracing::debug!(?field, "predict field edited");
            form.set_predict(*field, value.clone());
        }
        AppEvent::CrawlInput { field, value } if !field.is_radio() => {
            tracing::debug!(?field, "crawl field edited");
            form.set_crawl(*field, value.clone());
        }
        AppEvent::CrawlSelect { field, value } if field.is_radio() => {
            tracing::debug!(?field, %value, "radio checked");
            form.set_crawl(*field, value.clone());
        }
        AppEvent::CrawlInput { field, .. } | AppEvent::CrawlSelect { field, .. } => {
            tracing::warn!(?field, "edit does not match the field kind, ignoring");
        }
        AppEvent::Click(_) | AppEvent::Dump | AppEvent::Shutdown => return false,
    }

    true
}
