// File: bridge/src/types.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// === PENDING REQUESTS ===

/// A wallet action awaiting human approval in the browser.
///
/// Serialized with a `type` discriminator so the browser client can switch
/// on the request kind. Field names follow the wire contract (camelCase).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PendingRequest {
    #[serde(rename_all = "camelCase")]
    Connect {
        id: Uuid,
        created_at: DateTime<Utc>,
        #[serde(skip_serializing_if = "Option::is_none")]
        chain_id: Option<u64>,
    },
    #[serde(rename_all = "camelCase")]
    SendTransaction {
        id: Uuid,
        created_at: DateTime<Utc>,
        #[serde(skip_serializing_if = "Option::is_none")]
        chain_id: Option<u64>,
        to: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        gas: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    SignMessage {
        id: Uuid,
        created_at: DateTime<Utc>,
        #[serde(skip_serializing_if = "Option::is_none")]
        chain_id: Option<u64>,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        address: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    SignTypedData {
        id: Uuid,
        created_at: DateTime<Utc>,
        #[serde(skip_serializing_if = "Option::is_none")]
        chain_id: Option<u64>,
        domain: Value,
        types: Value,
        primary_type: String,
        message: Value,
    },
}

impl PendingRequest {
    pub fn id(&self) -> Uuid {
        match self {
            PendingRequest::Connect { id, .. }
            | PendingRequest::SendTransaction { id, .. }
            | PendingRequest::SignMessage { id, .. }
            | PendingRequest::SignTypedData { id, .. } => *id,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            PendingRequest::Connect { created_at, .. }
            | PendingRequest::SendTransaction { created_at, .. }
            | PendingRequest::SignMessage { created_at, .. }
            | PendingRequest::SignTypedData { created_at, .. } => *created_at,
        }
    }

    pub fn chain_id(&self) -> Option<u64> {
        match self {
            PendingRequest::Connect { chain_id, .. }
            | PendingRequest::SendTransaction { chain_id, .. }
            | PendingRequest::SignMessage { chain_id, .. }
            | PendingRequest::SignTypedData { chain_id, .. } => *chain_id,
        }
    }

    /// Wire name of the request kind, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            PendingRequest::Connect { .. } => "connect",
            PendingRequest::SendTransaction { .. } => "sendTransaction",
            PendingRequest::SignMessage { .. } => "signMessage",
            PendingRequest::SignTypedData { .. } => "signTypedData",
        }
    }
}

/// Creation-time fields of a request, before the registry assigns an id
/// and timestamp. The registry does not validate field semantics; that is
/// the caller's job.
#[derive(Debug, Clone)]
pub enum RequestPayload {
    Connect {
        chain_id: Option<u64>,
    },
    SendTransaction {
        chain_id: Option<u64>,
        to: String,
        value: Option<String>,
        data: Option<String>,
        gas: Option<String>,
    },
    SignMessage {
        chain_id: Option<u64>,
        message: String,
        address: Option<String>,
    },
    SignTypedData {
        chain_id: Option<u64>,
        domain: Value,
        types: Value,
        primary_type: String,
        message: Value,
    },
}

impl RequestPayload {
    pub(crate) fn into_request(self, id: Uuid, created_at: DateTime<Utc>) -> PendingRequest {
        match self {
            RequestPayload::Connect { chain_id } => PendingRequest::Connect {
                id,
                created_at,
                chain_id,
            },
            RequestPayload::SendTransaction {
                chain_id,
                to,
                value,
                data,
                gas,
            } => PendingRequest::SendTransaction {
                id,
                created_at,
                chain_id,
                to,
                value,
                data,
                gas,
            },
            RequestPayload::SignMessage {
                chain_id,
                message,
                address,
            } => PendingRequest::SignMessage {
                id,
                created_at,
                chain_id,
                message,
                address,
            },
            RequestPayload::SignTypedData {
                chain_id,
                domain,
                types,
                primary_type,
                message,
            } => PendingRequest::SignTypedData {
                id,
                created_at,
                chain_id,
                domain,
                types,
                primary_type,
                message,
            },
        }
    }
}

// === RESULTS ===

/// Terminal outcome of a pending request, delivered exactly once to the
/// creator through its oneshot receiver.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestResult {
    Success { value: String },
    Failure { error: String },
}

impl RequestResult {
    pub fn success(value: impl Into<String>) -> Self {
        RequestResult::Success {
            value: value.into(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        RequestResult::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RequestResult::Success { .. })
    }
}

// === COMPLETION WIRE FORMAT ===

/// Body of `POST /api/complete/{id}`. Only the `success` discriminator is
/// structurally required.
#[derive(Debug, Deserialize)]
pub struct CompleteRequest {
    pub success: bool,
    pub result: Option<String>,
    pub error: Option<String>,
}

impl CompleteRequest {
    pub fn into_result(self) -> RequestResult {
        if self.success {
            RequestResult::Success {
                value: self.result.unwrap_or_default(),
            }
        } else {
            RequestResult::Failure {
                error: self
                    .error
                    .unwrap_or_else(|| "Request rejected".to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn connect_request_serializes_with_type_tag() {
        let request = PendingRequest::Connect {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            chain_id: Some(1),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["type"], "connect");
        assert_eq!(value["chainId"], 1);
        assert!(value.get("id").is_some());
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn absent_chain_id_is_omitted() {
        let request = PendingRequest::SignMessage {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            chain_id: None,
            message: "hello".to_string(),
            address: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["type"], "signMessage");
        assert!(value.get("chainId").is_none());
        assert!(value.get("address").is_none());
    }

    #[test]
    fn typed_data_round_trips_nested_payloads() {
        let request = PendingRequest::SignTypedData {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            chain_id: Some(137),
            domain: json!({"name": "Test", "version": "1", "chainId": 137}),
            types: json!({"Person": [{"name": "wallet", "type": "address"}]}),
            primary_type: "Person".to_string(),
            message: json!({"wallet": "0x0000000000000000000000000000000000000001"}),
        };

        let encoded = serde_json::to_string(&request).unwrap();
        let decoded: PendingRequest = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn complete_request_normalizes_outcomes() {
        let body: CompleteRequest =
            serde_json::from_value(json!({"success": true, "result": "0xABC"})).unwrap();
        assert_eq!(body.into_result(), RequestResult::success("0xABC"));

        let body: CompleteRequest =
            serde_json::from_value(json!({"success": false, "error": "User rejected"})).unwrap();
        assert_eq!(body.into_result(), RequestResult::failure("User rejected"));

        // success with no result still resolves, with an empty value
        let body: CompleteRequest = serde_json::from_value(json!({"success": true})).unwrap();
        assert_eq!(body.into_result(), RequestResult::success(""));
    }

    #[test]
    fn missing_success_field_is_rejected() {
        let parsed = serde_json::from_value::<CompleteRequest>(json!({"result": "x"}));
        assert!(parsed.is_err());
    }
}
