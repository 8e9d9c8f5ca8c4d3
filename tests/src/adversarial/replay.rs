//! # Replay
//!
//! A captured, correctly signed request is sent again later.

#[cfg(test)]
mod tests {
    use crate::fixtures::{
        config, counting_handler, event_body, signed_request, webhook_request, TestHub, NOW,
        SECRET,
    };
    use axum::http::StatusCode;
    use ph_01_signature_verification::signature_header;
    use ph_03_subscriber_registry::SubscriberRegistry;
    use serde_json::json;
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn test_replay_outside_tolerance_is_stale() {
        let (handler, count) = counting_handler("h");
        let mut registry = SubscriberRegistry::new();
        registry.register_event_handler("*", handler).unwrap();
        let hub = TestHub::new(config(), registry);

        let body = event_body("evt_r1", "charge.succeeded");
        let captured = signature_header(&body, SECRET.as_bytes(), NOW);
        hub.time.advance(3_600);

        let (status, response) = hub
            .send(webhook_request(body, &captured))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"], json!("stale_signature"));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_replay_within_tolerance_is_deduplicated() {
        let (handler, count) = counting_handler("h");
        let mut registry = SubscriberRegistry::new();
        registry.register_event_handler("*", handler).unwrap();
        let hub = TestHub::new(config(), registry);

        let body = event_body("evt_r2", "charge.succeeded");
        hub.send(signed_request(body.clone(), SECRET, NOW)).await;
        hub.time.advance(60);
        let (status, response) = hub.send(signed_request(body, SECRET, NOW)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(response["status"], json!("duplicate"));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_refreshed_timestamp_with_old_signature_fails() {
        let hub = TestHub::new(config(), SubscriberRegistry::new());
        let body = event_body("evt_r3", "charge.succeeded");
        let old = signature_header(&body, SECRET.as_bytes(), NOW - 3_600);
        let v1 = old.split(",v1=").nth(1).unwrap();

        let (status, response) = hub
            .send(webhook_request(body, &format!("t={NOW},v1={v1}")))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"], json!("signature_mismatch"));
    }

    #[tokio::test]
    async fn test_future_timestamp_outside_tolerance_is_stale() {
        let hub = TestHub::new(config(), SubscriberRegistry::new());
        let (status, response) = hub
            .send(signed_request(
                event_body("evt_r4", "charge.succeeded"),
                SECRET,
                NOW + 301,
            ))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"], json!("stale_signature"));
    }
}
