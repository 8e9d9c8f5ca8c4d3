//! # Webhook Flow
//!
//! verify -> claim -> dispatch through the HTTP router, with a mock clock
//! and an in-memory dedup store.

#[cfg(test)]
mod tests {
    use crate::fixtures::{
        config, counting_handler, event_body, signed_request, TestHub, NOW, PREVIOUS_SECRET,
        SECRET,
    };
    use axum::http::StatusCode;
    use ph_01_signature_verification::signature_header;
    use ph_03_subscriber_registry::{handler_fn, SubscriberRegistry};
    use ph_04_event_dispatch::{DispatchHandlerError, DispatchReport, HandlerOutcome};
    use ph_06_webhook_gateway::{HubConfig, WebhookOutcome};
    use serde_json::json;
    use shared_types::HandlerError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    // =========================================================================
    // END-TO-END: FIRST DELIVERY AND PROVIDER RETRY
    // =========================================================================

    #[tokio::test]
    async fn test_two_subscribers_invoked_once_and_retry_short_circuits() {
        let (first, first_count) = counting_handler("ledger");
        let (second, second_count) = counting_handler("mailer");
        let mut registry = SubscriberRegistry::new();
        registry.register_event_handler("invoice.*", first).unwrap();
        registry.register_event_handler("invoice.*", second).unwrap();
        let hub = TestHub::new(config(), registry);

        let body = event_body("evt_1", "invoice.payment_succeeded");

        let (status, response) = hub
            .send(signed_request(body.clone(), SECRET, NOW))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response["status"], json!("processed"));
        assert_eq!(response["report"]["matched_count"], json!(2));
        assert_eq!(first_count.load(Ordering::SeqCst), 1);
        assert_eq!(second_count.load(Ordering::SeqCst), 1);

        // Provider retry of the identical request
        let (status, response) = hub.send(signed_request(body, SECRET, NOW)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response["status"], json!("duplicate"));
        assert_eq!(first_count.load(Ordering::SeqCst), 1);
        assert_eq!(second_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failing_subscriber_still_acknowledged() {
        let (before, before_count) = counting_handler("before");
        let (after, after_count) = counting_handler("after");
        let mut registry = SubscriberRegistry::new();
        registry.register_event_handler("invoice.*", before).unwrap();
        registry
            .register_event_handler(
                "invoice.payment_succeeded",
                handler_fn("crm-sync", |_| async {
                    Err(HandlerError::new("crm returned 502"))
                }),
            )
            .unwrap();
        registry.register_event_handler("*", after).unwrap();
        let hub = TestHub::new(config(), registry);

        let (status, response) = hub
            .send(signed_request(
                event_body("evt_2", "invoice.payment_succeeded"),
                SECRET,
                NOW,
            ))
            .await;

        assert_eq!(status, StatusCode::OK);
        let per_handler = &response["report"]["per_handler"];
        assert_eq!(per_handler[0]["status"], json!("ok"));
        assert_eq!(per_handler[1]["status"], json!("failed"));
        assert_eq!(per_handler[1]["reason"], json!("crm returned 502"));
        assert_eq!(per_handler[2]["status"], json!("ok"));
        assert_eq!(before_count.load(Ordering::SeqCst), 1);
        assert_eq!(after_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unsubscribed_event_type_is_acknowledged() {
        let (handler, count) = counting_handler("invoices");
        let mut registry = SubscriberRegistry::new();
        registry.register_event_handler("invoice.*", handler).unwrap();
        let hub = TestHub::new(config(), registry);

        let (status, response) = hub
            .send(signed_request(
                event_body("evt_3", "customer.created"),
                SECRET,
                NOW,
            ))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(response["report"]["matched_count"], json!(0));
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(hub.store.contains("evt_3"));
    }

    #[tokio::test]
    async fn test_slow_subscriber_times_out_without_blocking_others() {
        let (fast, fast_count) = counting_handler("fast");
        let mut registry = SubscriberRegistry::new();
        registry
            .register_event_handler(
                "*",
                handler_fn("slow", |_| async {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok(())
                }),
            )
            .unwrap();
        registry.register_event_handler("*", fast).unwrap();
        let hub = TestHub::new(
            HubConfig {
                handler_timeout_ms: 50,
                ..config()
            },
            registry,
        );

        let (status, response) = hub
            .send(signed_request(event_body("evt_4", "plan.updated"), SECRET, NOW))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(response["report"]["per_handler"][0]["status"], json!("timeout"));
        assert_eq!(response["report"]["per_handler"][0]["timeout_ms"], json!(50));
        assert_eq!(fast_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_thread_blocking_subscriber_reported_as_timeout() {
        let (after, after_count) = counting_handler("after");
        let mut registry = SubscriberRegistry::new();
        registry
            .register_event_handler(
                "invoice.*",
                handler_fn("legacy-sync", |_| async {
                    std::thread::sleep(Duration::from_millis(400));
                    Ok(())
                }),
            )
            .unwrap();
        registry.register_event_handler("invoice.*", after).unwrap();
        let hub = TestHub::new(
            HubConfig {
                handler_timeout_ms: 50,
                ..config()
            },
            registry,
        );

        let body = event_body("evt_block", "invoice.payment_failed");
        let header = signature_header(&body, SECRET.as_bytes(), NOW);
        let outcome = hub.hub.gateway().handle(&body, Some(&header)).await.unwrap();
        let report: DispatchReport = match outcome {
            WebhookOutcome::Processed { report, .. } => report,
            other => panic!("expected Processed, got {other:?}"),
        };

        assert_eq!(report.matched_count, 2);
        assert!(!report.all_succeeded());
        let failed: Vec<&HandlerOutcome> = report.failures().collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].handler_name, "legacy-sync");
        assert_eq!(
            failed[0].outcome,
            Err(DispatchHandlerError::HandlerTimeout { timeout_ms: 50 })
        );
        assert!(failed[0].elapsed_ms < 400);
        assert!(report.per_handler[1].is_ok());
        assert_eq!(after_count.load(Ordering::SeqCst), 1);
    }

    // =========================================================================
    // KEY ROTATION
    // =========================================================================

    #[tokio::test]
    async fn test_previous_secret_accepted_during_rotation() {
        let (handler, count) = counting_handler("h");
        let mut registry = SubscriberRegistry::new();
        registry.register_event_handler("*", handler).unwrap();
        let hub = TestHub::new(
            HubConfig {
                previous_webhook_secrets: vec![PREVIOUS_SECRET.into()],
                ..config()
            },
            registry,
        );

        let (status, _) = hub
            .send(signed_request(
                event_body("evt_5", "charge.refunded"),
                PREVIOUS_SECRET,
                NOW,
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retired_secret_rejected() {
        let hub = TestHub::new(config(), SubscriberRegistry::new());
        let (status, response) = hub
            .send(signed_request(
                event_body("evt_6", "charge.refunded"),
                PREVIOUS_SECRET,
                NOW,
            ))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"], json!("signature_mismatch"));
    }

    // =========================================================================
    // CANCELLATION
    // =========================================================================

    #[tokio::test]
    async fn test_dispatch_survives_dropped_connection() {
        let finished = Arc::new(AtomicUsize::new(0));
        let marker = Arc::clone(&finished);
        let mut registry = SubscriberRegistry::new();
        registry
            .register_event_handler(
                "*",
                handler_fn("slow-but-important", move |_| {
                    let marker = Arc::clone(&marker);
                    async move {
                        tokio::time::sleep(Duration::from_millis(100)).await;
                        marker.fetch_add(1, Ordering::SeqCst);
                        Ok(())
                    }
                }),
            )
            .unwrap();
        let hub = TestHub::new(config(), registry);

        let request = signed_request(event_body("evt_7", "invoice.paid"), SECRET, NOW);
        let in_flight = hub.router.clone().oneshot(request);

        // Client goes away before the handler is done
        let dropped = tokio::time::timeout(Duration::from_millis(20), in_flight).await;
        assert!(dropped.is_err());

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(finished.load(Ordering::SeqCst), 1);
        assert!(hub.store.contains("evt_7"));
    }

    // =========================================================================
    // RETENTION
    // =========================================================================

    #[tokio::test]
    async fn test_redelivery_after_retention_is_processed_again() {
        let (handler, count) = counting_handler("h");
        let mut registry = SubscriberRegistry::new();
        registry.register_event_handler("*", handler).unwrap();
        let hub = TestHub::new(config(), registry);

        let body = event_body("evt_8", "invoice.paid");
        hub.send(signed_request(body.clone(), SECRET, NOW)).await;

        let later = NOW + 15 * 86_400;
        hub.time.set(later);
        hub.hub.dedup().purge_expired().await.unwrap();

        let (status, response) = hub.send(signed_request(body, SECRET, later)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response["status"], json!("processed"));
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
