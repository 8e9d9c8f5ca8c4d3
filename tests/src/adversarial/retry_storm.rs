//! # Retry Storm
//!
//! The provider delivers the same event many times concurrently.

#[cfg(test)]
mod tests {
    use crate::fixtures::{
        config, counting_handler, event_body, signed_request, TestHub, NOW, SECRET,
    };
    use axum::http::StatusCode;
    use ph_03_subscriber_registry::SubscriberRegistry;
    use serde_json::json;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_identical_deliveries_dispatch_once() {
        let (handler, count) = counting_handler("h");
        let mut registry = SubscriberRegistry::new();
        registry.register_event_handler("invoice.*", handler).unwrap();
        let hub = Arc::new(TestHub::new(config(), registry));

        let body = event_body("evt_storm", "invoice.payment_succeeded");
        let deliveries: Vec<_> = (0..50)
            .map(|_| {
                let hub = Arc::clone(&hub);
                let body = body.clone();
                tokio::spawn(async move { hub.send(signed_request(body, SECRET, NOW)).await })
            })
            .collect();

        let mut processed = 0;
        let mut duplicates = 0;
        for delivery in deliveries {
            let (status, response) = delivery.await.unwrap();
            assert_eq!(status, StatusCode::OK);
            if response["status"] == json!("processed") {
                processed += 1;
            } else if response["status"] == json!("duplicate") {
                duplicates += 1;
            }
        }

        assert_eq!(processed, 1);
        assert_eq!(duplicates, 49);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_distinct_events_all_dispatch() {
        let (handler, count) = counting_handler("h");
        let mut registry = SubscriberRegistry::new();
        registry.register_event_handler("*", handler).unwrap();
        let hub = Arc::new(TestHub::new(config(), registry));

        let deliveries: Vec<_> = (0..20)
            .map(|i| {
                let hub = Arc::clone(&hub);
                tokio::spawn(async move {
                    let body = event_body(&format!("evt_{i}"), "invoice.paid");
                    hub.send(signed_request(body, SECRET, NOW)).await
                })
            })
            .collect();

        for delivery in deliveries {
            assert_eq!(delivery.await.unwrap().0, StatusCode::OK);
        }
        assert_eq!(count.load(Ordering::SeqCst), 20);
        assert_eq!(hub.store.record_count(), 20);
    }
}
