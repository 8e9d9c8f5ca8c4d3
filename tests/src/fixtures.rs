//! Shared fixtures for the suite and the benchmarks.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use ph_01_signature_verification::signature_header;
use ph_02_event_dedup::{DedupStore, InMemoryDedupStore};
use ph_03_subscriber_registry::{handler_fn, EventHandler, SubscriberRegistry};
use ph_06_webhook_gateway::{HubConfig, PaymentHub};
use serde_json::{json, Value};
use shared_types::{MockTimeSource, TimeSource};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

pub const SECRET: &str = "whsec_suite_current";
pub const PREVIOUS_SECRET: &str = "whsec_suite_previous";
pub const NOW: u64 = 1_700_000_000;

/// Handler that only counts invocations.
pub fn counting_handler(name: &str) -> (Arc<dyn EventHandler>, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    let handler = handler_fn(name.to_string(), move |_| {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    });
    (handler, count)
}

pub fn config() -> HubConfig {
    HubConfig {
        webhook_secret: SECRET.into(),
        ..HubConfig::default()
    }
}

/// A hub wired to a mock clock and an inspectable in-memory store.
pub struct TestHub {
    pub hub: PaymentHub,
    pub router: Router,
    pub store: Arc<InMemoryDedupStore>,
    pub time: Arc<MockTimeSource>,
}

impl TestHub {
    pub fn new(config: HubConfig, registry: SubscriberRegistry) -> Self {
        let store = Arc::new(InMemoryDedupStore::new());
        let time = Arc::new(MockTimeSource::new(NOW));
        let dyn_store: Arc<dyn DedupStore> = store.clone();
        let dyn_time: Arc<dyn TimeSource> = time.clone();

        let hub = PaymentHub::with_time_source(config, registry, dyn_store, dyn_time)
            .expect("valid test config");
        let router = hub.router();
        Self {
            hub,
            router,
            store,
            time,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }
}

pub fn event_body(id: &str, event_type: &str) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "id": id,
        "object": "event",
        "type": event_type,
        "created": NOW,
        "livemode": false,
        "data": {"object": {"id": "in_1", "object": "invoice", "amount_paid": 2000}},
    }))
    .expect("serializable")
}

/// `POST /webhook` with an arbitrary signature header value.
pub fn webhook_request(body: Vec<u8>, signature: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("content-type", "application/json")
        .header("Stripe-Signature", signature)
        .body(Body::from(body))
        .expect("valid request")
}

/// `POST /webhook` signed with `secret` at time `t`.
pub fn signed_request(body: Vec<u8>, secret: &str, t: u64) -> Request<Body> {
    let signature = signature_header(&body, secret.as_bytes(), t);
    webhook_request(body, &signature)
}
