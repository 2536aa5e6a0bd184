use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use rentscope_client::ApiClient;
use rentscope_config::Config;
use rentscope_core::{TableRow, TriggerAppearance};
use rentscope_types::{AppEvent, RequestUiState};
use serde_json::{Value, json};
use tokio::io::BufReader;
use tokio::net::TcpListener;
use tokio::sync::{Mutex, Notify};
use tokio::time::timeout;

use crate::controller::AppController;
use crate::events::event_loop;
use crate::io::{parse_command, watcher_io};
use crate::state::AppState;
use crate::ui::stdout_view;

#[derive(Clone, Default)]
struct Backend {
    predict_bodies: Arc<Mutex<Vec<Value>>>,
    crawl_calls: Arc<AtomicUsize>,
    crawl_gate: Option<Arc<Notify>>,
}

async fn predict(State(backend): State<Backend>, Json(body): Json<Value>) -> Json<Value> {
    backend.predict_bodies.lock().await.push(body);
    Json(json!({"deposit_pred": 23456.5, "monthly_pred": 45}))
}

async fn crawl(State(backend): State<Backend>, Json(body): Json<Value>) -> Response {
    backend.crawl_calls.fetch_add(1, Ordering::SeqCst);
    if let Some(gate) = &backend.crawl_gate {
        gate.notified().await;
    }

    if body["bldg"] == "없는빌라" {
        return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
    }

    Json(json!({"result": [{
        "전용면적(m^2)": 41.3,
        "계약기간": "2024.03~2026.03",
        "보증금(만원)": "18,000",
        "월세(만원)": "0",
        "계약구분": "신규",
    }]}))
    .into_response()
}

async fn spawn_backend(backend: Backend) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");

    let app = Router::new()
        .route("/predict", post(predict))
        .route("/api/crawl", post(crawl))
        .with_state(backend);

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    format!("http://{addr}")
}

fn app_state(base: &str) -> Arc<AppState> {
    let mut config = Config::default();
    config.network.predict_base_url = base.to_string();
    config.network.crawl_url = format!("{base}/api/crawl");

    let out: Box<dyn io::Write + Send> = Box::new(io::sink());
    let view = rentscope_ui::TerminalView::new(out, false);
    Arc::new(AppState::new(config, ApiClient::reqwest(), view))
}

fn commands(script: &str) -> Vec<AppEvent> {
    script
        .lines()
        .filter_map(|line| parse_command(line).expect("valid command"))
        .collect()
}

/// Feed a script and wait for the loop to settle every request
async fn drive(state: &Arc<AppState>, script: &str) {
    let (tx, rx) = kanal::unbounded_async();
    for event in commands(script) {
        tx.send(event).await.unwrap();
    }
    tx.send(AppEvent::Shutdown).await.unwrap();

    timeout(Duration::from_secs(5), event_loop(state.clone(), rx))
        .await
        .expect("event loop settles")
        .unwrap();
}

const CRAWL_FORM: &str = "
check tp 연립다세대
check addrType 도로명
set sido 서울특별시
set sigungu 광진구
set road 아차산로
set bldg 한빛빌라
";

#[tokio::test]
async fn predict_click_renders_formatted_estimate() {
    let backend = Backend::default();
    let base = spawn_backend(backend.clone()).await;
    let state = app_state(&base);

    drive(
        &state,
        "
set address  서울특별시 광진구 화양동
set area 29.7㎡
set floor 3층
click predict
",
    )
    .await;

    assert_eq!(
        state.view.widgets().predict_result,
        "💰 보증금 예측: 23,456.5 만원\n🧾 월세 예측: 45 만원"
    );
    assert_eq!(state.predict.state(), RequestUiState::Success);

    let bodies = backend.predict_bodies.lock().await;
    assert_eq!(
        bodies[0],
        json!({
            "address": "서울특별시 광진구 화양동",
            "area": 29.7,
            "floor": 3,
            "year_built": null,
            "housing_type": "연립다세대",
            "rent_type": "전세",
        })
    );
}

#[tokio::test]
async fn predict_without_address_prompts_and_sends_nothing() {
    let backend = Backend::default();
    let base = spawn_backend(backend.clone()).await;
    let state = app_state(&base);

    drive(&state, "set address   \nclick predict").await;

    assert_eq!(state.view.widgets().predict_result, "❗ 주소를 입력해주세요.");
    assert!(backend.predict_bodies.lock().await.is_empty());
}

#[tokio::test]
async fn crawl_click_renders_rows_and_unlocks() {
    let backend = Backend::default();
    let base = spawn_backend(backend.clone()).await;
    let state = app_state(&base);

    drive(&state, &format!("{CRAWL_FORM}click crawl")).await;

    let widgets = state.view.widgets();
    assert_eq!(
        widgets.rows,
        vec![TableRow::Cells(
            ["41.3", "2024.03~2026.03", "18,000", "0", "신규"].map(String::from)
        )]
    );
    assert!(widgets.result_area_visible);
    assert!(!widgets.loading_visible);
    assert_eq!(widgets.crawl_trigger, TriggerAppearance::idle());
    assert_eq!(widgets.alerts, 0);
}

#[tokio::test]
async fn crawl_server_error_alerts_no_results() {
    let backend = Backend::default();
    let base = spawn_backend(backend.clone()).await;
    let state = app_state(&base);

    drive(&state, &format!("{CRAWL_FORM}set bldg 없는빌라\nclick crawl")).await;

    let widgets = state.view.widgets();
    assert_eq!(widgets.alerts, 1);
    assert!(widgets.rows.is_empty());
    assert_eq!(widgets.crawl_trigger, TriggerAppearance::idle());
    assert_eq!(state.crawl.state(), RequestUiState::Error);
}

#[tokio::test]
async fn double_click_on_crawl_sends_one_request() {
    let gate = Arc::new(Notify::new());
    let backend = Backend {
        crawl_gate: Some(gate.clone()),
        ..Backend::default()
    };
    let base = spawn_backend(backend.clone()).await;
    let state = app_state(&base);

    let (tx, rx) = kanal::unbounded_async();
    let running = tokio::spawn(event_loop(state.clone(), rx));

    for event in commands(&format!("{CRAWL_FORM}click crawl\nclick crawl")) {
        tx.send(event).await.unwrap();
    }

    // The second click is refused by the loop itself, before any request lands
    timeout(Duration::from_secs(5), async {
        while state.status.crawl.ignored.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("second click is ignored");
    assert!(!state.view.widgets().crawl_trigger.enabled);

    gate.notify_one();
    tx.send(AppEvent::Shutdown).await.unwrap();
    timeout(Duration::from_secs(5), running)
        .await
        .expect("event loop settles")
        .unwrap()
        .unwrap();

    assert_eq!(backend.crawl_calls.load(Ordering::SeqCst), 1);
    let (clicks, succeeded, failed, ignored) = state.status.crawl.summary();
    assert_eq!((clicks, succeeded, failed, ignored), (2, 1, 0, 1));
    assert_eq!(state.view.widgets().crawl_trigger, TriggerAppearance::idle());
}

#[tokio::test]
async fn overlapping_predict_clicks_all_run() {
    let backend = Backend::default();
    let base = spawn_backend(backend.clone()).await;
    let state = app_state(&base);

    drive(&state, "set address 화양동\nclick predict\nclick predict").await;

    assert_eq!(backend.predict_bodies.lock().await.len(), 2);
    assert_eq!(state.status.predict.summary(), (2, 2, 0, 0));
}

#[tokio::test]
async fn watcher_reads_commands_until_eof() {
    let backend = Backend::default();
    let base = spawn_backend(backend.clone()).await;
    let state = app_state(&base);

    let script = "set address 화양동\n\n# comment\nbogus line\nclick predict\n";
    let (tx, rx) = kanal::unbounded_async();
    let cancel = tokio_util::sync::CancellationToken::new();

    watcher_io(BufReader::new(script.as_bytes()), cancel, tx)
        .await
        .unwrap();
    timeout(Duration::from_secs(5), event_loop(state.clone(), rx))
        .await
        .expect("eof shuts the loop down")
        .unwrap();

    assert_eq!(backend.predict_bodies.lock().await.len(), 1);
    assert_eq!(state.form.predict_form().address, "화양동");
}

#[tokio::test]
async fn unreadable_input_still_shuts_the_loop_down() {
    let (tx, rx) = kanal::unbounded_async();
    let cancel = tokio_util::sync::CancellationToken::new();

    let result = watcher_io(BufReader::new(&b"set address \xff\xfe\n"[..]), cancel, tx).await;

    assert!(result.is_err());
    assert!(matches!(rx.recv().await, Ok(AppEvent::Shutdown)));
}

#[tokio::test]
async fn controller_tasks_drain_after_invalid_utf8_input() {
    let backend = Backend::default();
    let base = spawn_backend(backend.clone()).await;
    let controller = AppController::new(app_state(&base));

    let mut tasks =
        controller.spawn_tasks(BufReader::new(&b"set address \xff\xfe\nclick predict\n"[..]));

    let results = timeout(Duration::from_secs(3), async {
        let mut results = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            results.push(joined.unwrap());
        }
        results
    })
    .await
    .expect("both tasks exit without a shutdown signal");

    assert_eq!(results.len(), 2);
    assert_eq!(results.iter().filter(|r| r.is_err()).count(), 1);
    assert!(backend.predict_bodies.lock().await.is_empty());
}

#[test]
fn stdout_view_is_plain_when_color_is_off() {
    let config = rentscope_config::ui::UiConfig { color: false };
    let view = stdout_view(&config);

    assert_eq!(view.widgets().crawl_trigger, TriggerAppearance::idle());
}
