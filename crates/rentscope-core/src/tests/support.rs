//! Scripted transport and recording views for controller tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rentscope_client::{ApiClient, ClientError, HttpResponse, Transport};
use rentscope_types::{CrawlForm, PredictionForm};
use serde_json::Value;
use tokio::sync::Notify;

use crate::error::RenderError;
use crate::ports::{
    CrawlInput, CrawlOutput, PredictionDisplay, PredictionInput, PredictionOutput, TableRow,
    TriggerAppearance,
};

pub enum Reply {
    Status(u16, String),
    Refused,
    /// Hold the call until the gate is notified, then answer
    Gated(Arc<Notify>, Box<Reply>),
}

impl Reply {
    pub fn json(status: u16, body: Value) -> Self {
        Reply::Status(status, body.to_string())
    }

    pub fn text(status: u16, body: &str) -> Self {
        Reply::Status(status, body.to_string())
    }

    pub fn gated(self, gate: &Arc<Notify>) -> Self {
        Reply::Gated(gate.clone(), Box::new(self))
    }
}

#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl ScriptedTransport {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: Mutex::default(),
        })
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub async fn wait_for_calls(&self, n: usize) {
        tokio::time::timeout(Duration::from_secs(2), async {
            while self.call_count() < n {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("timed out waiting for transport calls");
    }

    pub fn client(self: &Arc<Self>) -> ApiClient {
        ApiClient::new(self.clone())
    }
}

async fn answer(reply: Reply) -> Result<HttpResponse, ClientError> {
    let mut reply = reply;
    loop {
        match reply {
            Reply::Status(status, body) => {
                return Ok(HttpResponse {
                    status,
                    body: body.into_bytes(),
                });
            }
            Reply::Refused => {
                return Err(ClientError::Transport("connection refused".to_string()));
            }
            Reply::Gated(gate, inner) => {
                gate.notified().await;
                reply = *inner;
            }
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpResponse, ClientError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), body.clone()));
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted call");
        answer(reply).await
    }

    async fn get(&self, _url: &str) -> Result<HttpResponse, ClientError> {
        answer(Reply::json(200, serde_json::json!({"status": "ok"}))).await
    }
}

pub struct StaticPredictForm(pub Mutex<PredictionForm>);

impl StaticPredictForm {
    pub fn new(form: PredictionForm) -> Arc<Self> {
        Arc::new(Self(Mutex::new(form)))
    }
}

impl PredictionInput for StaticPredictForm {
    fn read_form(&self) -> PredictionForm {
        self.0.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct RecordingPredictView {
    pub renders: Mutex<Vec<PredictionDisplay>>,
}

impl RecordingPredictView {
    pub fn renders(&self) -> Vec<PredictionDisplay> {
        self.renders.lock().unwrap().clone()
    }

    pub fn last_text(&self) -> String {
        self.renders
            .lock()
            .unwrap()
            .last()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

impl PredictionOutput for RecordingPredictView {
    fn render(&self, display: PredictionDisplay) {
        self.renders.lock().unwrap().push(display);
    }
}

pub struct StaticCrawlForm(pub CrawlForm);

impl CrawlInput for StaticCrawlForm {
    fn read_form(&self) -> CrawlForm {
        self.0.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFault {
    None,
    ErrorAt(usize),
    PanicAt(usize),
}

pub struct RecordingCrawlView {
    pub trigger: Mutex<TriggerAppearance>,
    pub trigger_history: Mutex<Vec<TriggerAppearance>>,
    pub loading: Mutex<bool>,
    pub rows: Mutex<Vec<TableRow>>,
    pub area_visible: Mutex<bool>,
    pub alerts: Mutex<Vec<String>>,
    pub fault: RenderFault,
}

impl RecordingCrawlView {
    pub fn new() -> Arc<Self> {
        Self::with_fault(RenderFault::None)
    }

    pub fn with_fault(fault: RenderFault) -> Arc<Self> {
        Arc::new(Self {
            trigger: Mutex::new(TriggerAppearance::idle()),
            trigger_history: Mutex::default(),
            loading: Mutex::new(false),
            rows: Mutex::default(),
            area_visible: Mutex::new(false),
            alerts: Mutex::default(),
            fault,
        })
    }

    pub fn rows(&self) -> Vec<TableRow> {
        self.rows.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn loading(&self) -> bool {
        *self.loading.lock().unwrap()
    }

    pub fn area_visible(&self) -> bool {
        *self.area_visible.lock().unwrap()
    }

    pub fn unlock_count(&self) -> usize {
        self.trigger_history
            .lock()
            .unwrap()
            .iter()
            .filter(|a| **a == TriggerAppearance::idle())
            .count()
    }

    /// Trigger re-enabled, label and color reset, loading hidden
    pub fn assert_settled(&self) {
        assert_eq!(*self.trigger.lock().unwrap(), TriggerAppearance::idle());
        assert!(!self.loading(), "loading indicator still visible");
    }
}

impl CrawlOutput for RecordingCrawlView {
    fn set_trigger(&self, appearance: &TriggerAppearance) {
        *self.trigger.lock().unwrap() = appearance.clone();
        self.trigger_history.lock().unwrap().push(appearance.clone());
    }

    fn set_loading_visible(&self, visible: bool) {
        *self.loading.lock().unwrap() = visible;
    }

    fn clear_rows(&self) {
        self.rows.lock().unwrap().clear();
    }

    fn append_row(&self, row: TableRow) -> Result<(), RenderError> {
        let index = self.rows.lock().unwrap().len();
        match self.fault {
            RenderFault::ErrorAt(at) if at == index => {
                return Err(RenderError("table detached".to_string()));
            }
            RenderFault::PanicAt(at) if at == index => panic!("renderer crashed"),
            _ => {}
        }
        self.rows.lock().unwrap().push(row);
        Ok(())
    }

    fn set_result_area_visible(&self, visible: bool) {
        *self.area_visible.lock().unwrap() = visible;
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}
