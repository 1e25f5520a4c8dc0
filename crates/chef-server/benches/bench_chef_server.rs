use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use chef_core::SystemClock;
use chef_llm::{Completion, CompletionClient, CompletionError, CompletionRequest};
use chef_server::{app_with_state, service::CompletionSettings, state::AppState};
use chef_session::{SessionLimits, SessionStore};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tower::ServiceExt;

struct InstantClient;

#[async_trait]
impl CompletionClient for InstantClient {
    fn name(&self) -> &str {
        "instant"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<Completion, CompletionError> {
        Ok(Completion {
            content: format!("- noted {} turns", request.turns.len()),
            model: "bench".into(),
            finish_reason: None,
            latency_ms: 0,
        })
    }
}

fn state() -> AppState {
    // lift the rate limit so the loop measures the request path, not 429s
    let limits = SessionLimits { max_requests_per_window: u32::MAX, ..SessionLimits::default() };
    AppState::with_parts(
        Arc::new(SessionStore::with_limits(limits)),
        Arc::new(InstantClient),
        Arc::new(SystemClock),
        CompletionSettings::default(),
    )
}

fn bench_http_status(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let state = state();
    c.bench_function("http_status_1000", |b| {
        b.iter(|| {
            rt.block_on(async {
                for _ in 0..1000 {
                    let req = Request::builder().uri("/").body(Body::empty()).unwrap();
                    let resp = app_with_state(state.clone()).oneshot(req).await.unwrap();
                    black_box(resp.status());
                }
            })
        })
    });
}

fn bench_http_chat(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    c.bench_function("http_chat_100_sessions_x10", |b| {
        b.iter(|| {
            rt.block_on(async {
                let state = state();
                for i in 0..1000 {
                    let body = serde_json::json!({
                        "message": "What's a quick high-protein lunch?",
                        "session_id": format!("bench-{}", i % 100),
                    });
                    let req = Request::builder()
                        .method("POST")
                        .uri("/chat")
                        .header("content-type", "application/json")
                        .body(Body::from(serde_json::to_vec(&body).unwrap()))
                        .unwrap();
                    let resp = app_with_state(state.clone()).oneshot(req).await.unwrap();
                    black_box(resp.status());
                }
            })
        })
    });
}

criterion_group!(benches, bench_http_status, bench_http_chat);
criterion_main!(benches);
