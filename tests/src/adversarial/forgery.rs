//! # Forgery
//!
//! Requests whose signature header was crafted without the secret, or
//! whose body was altered in transit.

#[cfg(test)]
mod tests {
    use crate::fixtures::{config, event_body, webhook_request, TestHub, NOW, SECRET};
    use axum::http::StatusCode;
    use ph_01_signature_verification::sign_payload;
    use ph_03_subscriber_registry::SubscriberRegistry;
    use serde_json::json;

    async fn rejected_as(signature: &str, body: Vec<u8>) -> String {
        let hub = TestHub::new(config(), SubscriberRegistry::new());
        let (status, response) = hub.send(webhook_request(body, signature)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{signature}");
        assert!(hub.store.is_empty(), "nothing may be claimed for {signature}");
        response["error"].as_str().unwrap_or_default().to_string()
    }

    fn body() -> Vec<u8> {
        event_body("evt_f1", "invoice.payment_succeeded")
    }

    fn valid_v1() -> String {
        sign_payload(&body(), SECRET.as_bytes(), NOW)
    }

    #[tokio::test]
    async fn test_signature_for_other_secret() {
        let forged = sign_payload(&body(), b"attacker", NOW);
        let kind = rejected_as(&format!("t={NOW},v1={forged}"), body()).await;
        assert_eq!(kind, "signature_mismatch");
    }

    #[tokio::test]
    async fn test_amount_changed_in_transit() {
        let mut altered = serde_json::from_slice::<serde_json::Value>(&body()).unwrap();
        altered["data"]["object"]["amount_paid"] = json!(1);
        let altered = serde_json::to_vec(&altered).unwrap();

        let kind = rejected_as(&format!("t={NOW},v1={}", valid_v1()), altered).await;
        assert_eq!(kind, "signature_mismatch");
    }

    #[tokio::test]
    async fn test_only_legacy_scheme_present() {
        let kind = rejected_as(&format!("t={NOW},v0={}", valid_v1()), body()).await;
        assert_eq!(kind, "malformed_signature");
    }

    #[tokio::test]
    async fn test_missing_timestamp() {
        let kind = rejected_as(&format!("v1={}", valid_v1()), body()).await;
        assert_eq!(kind, "malformed_signature");
    }

    #[tokio::test]
    async fn test_truncated_signature() {
        let v1 = valid_v1();
        let kind = rejected_as(&format!("t={NOW},v1={}", &v1[..32]), body()).await;
        assert_eq!(kind, "signature_mismatch");
    }

    #[tokio::test]
    async fn test_uppercase_hex_is_not_equivalent() {
        let kind = rejected_as(
            &format!("t={NOW},v1={}", valid_v1().to_uppercase()),
            body(),
        )
        .await;
        assert_eq!(kind, "signature_mismatch");
    }

    #[tokio::test]
    async fn test_garbage_header() {
        let kind = rejected_as("not-a-signature", body()).await;
        assert_eq!(kind, "malformed_signature");
    }
}
