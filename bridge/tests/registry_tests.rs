//! Integration tests for the pending-request registry
//!
//! These exercise the exactly-once resolution guarantee under contention,
//! which is the one property the rest of the system leans on.

use bridge::registry::RequestRegistry;
use bridge::types::{PendingRequest, RequestPayload, RequestResult};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn send_transaction_payload() -> RequestPayload {
    RequestPayload::SendTransaction {
        chain_id: Some(1),
        to: "0x000000000000000000000000000000000000dead".to_string(),
        value: Some("0xde0b6b3a7640000".to_string()),
        data: None,
        gas: Some("0x5208".to_string()),
    }
}

#[tokio::test]
async fn created_fields_survive_lookup_for_every_kind() {
    let registry = RequestRegistry::new();

    let (id, _rx) = registry.create(send_transaction_payload()).await;
    match registry.get(id).await.unwrap() {
        PendingRequest::SendTransaction {
            chain_id,
            to,
            value,
            data,
            gas,
            ..
        } => {
            assert_eq!(chain_id, Some(1));
            assert_eq!(to, "0x000000000000000000000000000000000000dead");
            assert_eq!(value.as_deref(), Some("0xde0b6b3a7640000"));
            assert_eq!(data, None);
            assert_eq!(gas.as_deref(), Some("0x5208"));
        }
        other => panic!("unexpected kind {}", other.kind()),
    }

    let (id, _rx) = registry
        .create(RequestPayload::SignTypedData {
            chain_id: Some(137),
            domain: json!({"name": "Bridge", "chainId": 137}),
            types: json!({"Mail": [{"name": "contents", "type": "string"}]}),
            primary_type: "Mail".to_string(),
            message: json!({"contents": "hi"}),
        })
        .await;
    match registry.get(id).await.unwrap() {
        PendingRequest::SignTypedData {
            domain,
            types,
            primary_type,
            message,
            ..
        } => {
            assert_eq!(domain, json!({"name": "Bridge", "chainId": 137}));
            assert_eq!(types, json!({"Mail": [{"name": "contents", "type": "string"}]}));
            assert_eq!(primary_type, "Mail");
            assert_eq!(message, json!({"contents": "hi"}));
        }
        other => panic!("unexpected kind {}", other.kind()),
    }
}

#[tokio::test]
async fn concurrent_resolvers_produce_exactly_one_winner() {
    let registry = Arc::new(RequestRegistry::new());

    for _ in 0..50 {
        let (id, receiver) = registry
            .create(RequestPayload::Connect { chain_id: None })
            .await;

        let mut tasks = Vec::new();
        for n in 0..8 {
            let registry = registry.clone();
            tasks.push(tokio::spawn(async move {
                if n % 2 == 0 {
                    registry
                        .complete(id, RequestResult::success(format!("0x{}", n)))
                        .await
                } else {
                    registry.cancel(id, Some("lost the race")).await
                }
            }));
        }

        let mut winners = 0;
        for task in tasks {
            if task.await.unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1, "exactly one resolver may win");

        // The receiver got exactly one result, whichever it was
        receiver.await.expect("a result must have been delivered");
        assert!(!registry.has(id).await);
    }
}

#[tokio::test]
async fn manual_completion_races_the_timeout_cleanly() {
    // A window short enough that completes land both before and after it
    let registry = Arc::new(RequestRegistry::with_timeout(Duration::from_millis(5)));

    for _ in 0..50 {
        let (id, receiver) = registry
            .create(RequestPayload::Connect { chain_id: None })
            .await;

        tokio::time::sleep(Duration::from_millis(3)).await;
        let won = registry.complete(id, RequestResult::success("0x1")).await;

        match receiver.await.unwrap() {
            RequestResult::Success { value } => {
                assert!(won);
                assert_eq!(value, "0x1");
            }
            RequestResult::Failure { error } => {
                assert!(!won);
                assert!(error.contains("timed out"));
            }
        }
        assert!(!registry.has(id).await);
    }
}

#[tokio::test]
async fn dropped_receiver_does_not_poison_the_registry() {
    let registry = RequestRegistry::new();
    let (id, receiver) = registry
        .create(RequestPayload::Connect { chain_id: None })
        .await;
    drop(receiver);

    // Resolution still removes the entry and reports the win
    assert!(registry.complete(id, RequestResult::success("0x1")).await);
    assert!(!registry.has(id).await);
    assert_eq!(registry.size().await, 0);
}
