//! In-memory registry of pending wallet requests
//!
//! This module owns the map of outstanding requests and the single-shot
//! channels that deliver their outcomes. It has no knowledge of HTTP or
//! wallets.
//!
//! # Key Features
//!
//! - **Exactly-once resolution**: removal from the map and delivery of the
//!   result happen inside one write-lock critical section, so at most one of
//!   {complete, cancel, timeout} wins for a given id
//! - **Bounded lifetime**: every request carries an expiry task (5 minutes
//!   by default) that rejects it if no completion arrives in time
//! - **Boolean races**: a losing `complete`/`cancel` returns `false` rather
//!   than an error; callers treat it as a no-op
//!
//! # Usage
//!
//! ```ignore
//! let (id, receiver) = registry.create(RequestPayload::Connect { chain_id: Some(1) }).await;
//!
//! // hand `id` to the browser, then await the outcome
//! let result = receiver.await?;
//! ```

use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, RwLock};
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

use crate::constants::registry::{DEFAULT_CANCEL_REASON, REQUEST_TIMEOUT, TIMEOUT_MESSAGE};
use crate::types::{PendingRequest, RequestPayload, RequestResult};

/// Internal pairing of a request with the means to resolve it exactly once.
struct PendingEntry {
    request: PendingRequest,
    responder: oneshot::Sender<RequestResult>,
    watchdog: JoinHandle<()>,
}

type PendingMap = Arc<RwLock<HashMap<Uuid, PendingEntry>>>;

pub struct RequestRegistry {
    pending: PendingMap,
    timeout: Duration,
}

impl RequestRegistry {
    pub fn new() -> Self {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    /// Registry with a non-default expiry window. The timeout rejection
    /// message is part of the external contract and does not change with
    /// the window.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            pending: Arc::new(RwLock::new(HashMap::new())),
            timeout,
        }
    }

    /// Register a new pending request and return its correlation id together
    /// with the receiver that will deliver the outcome.
    ///
    /// The receiver resolves with exactly one `RequestResult`; if the request
    /// is cancelled or times out, that result is a `Failure`.
    pub async fn create(
        &self,
        payload: RequestPayload,
    ) -> (Uuid, oneshot::Receiver<RequestResult>) {
        let id = Uuid::new_v4();
        let request = payload.into_request(id, Utc::now());
        let kind = request.kind();
        let (responder, receiver) = oneshot::channel();

        let mut pending = self.pending.write().await;
        let watchdog = tokio::spawn(expire_after(self.pending.clone(), id, self.timeout));
        pending.insert(
            id,
            PendingEntry {
                request,
                responder,
                watchdog,
            },
        );

        info!("Created {} request {}", kind, id);
        (id, receiver)
    }

    /// Read-only lookup. Returns `None` for unknown or already-resolved ids.
    pub async fn get(&self, id: Uuid) -> Option<PendingRequest> {
        let pending = self.pending.read().await;
        pending.get(&id).map(|entry| entry.request.clone())
    }

    /// Resolve a pending request with `result`.
    ///
    /// Returns `true` if this call won the resolution: the entry was still
    /// present, its watchdog is disarmed, and the result was delivered.
    /// Returns `false` if the entry was already completed, cancelled, or
    /// timed out. Removal and delivery happen under one write lock, so a
    /// concurrent timeout cannot interleave.
    pub async fn complete(&self, id: Uuid, result: RequestResult) -> bool {
        let mut pending = self.pending.write().await;
        match pending.remove(&id) {
            Some(entry) => {
                entry.watchdog.abort();
                info!(
                    "Completed {} request {} (success: {})",
                    entry.request.kind(),
                    id,
                    result.is_success()
                );
                if entry.responder.send(result).is_err() {
                    warn!("Receiver for request {} was dropped before resolution", id);
                }
                true
            }
            None => false,
        }
    }

    /// Reject a pending request with a failure carrying `reason`.
    ///
    /// Same removal semantics as [`complete`](Self::complete); used for
    /// explicit user rejection or programmatic teardown.
    pub async fn cancel(&self, id: Uuid, reason: Option<&str>) -> bool {
        let reason = reason.unwrap_or(DEFAULT_CANCEL_REASON);
        self.complete(id, RequestResult::failure(reason)).await
    }

    /// Whether `id` is currently pending.
    pub async fn has(&self, id: Uuid) -> bool {
        let pending = self.pending.read().await;
        pending.contains_key(&id)
    }

    /// Number of currently pending requests.
    pub async fn size(&self) -> usize {
        let pending = self.pending.read().await;
        pending.len()
    }

    /// Ids of all currently pending requests.
    pub async fn list_ids(&self) -> Vec<Uuid> {
        let pending = self.pending.read().await;
        pending.keys().copied().collect()
    }
}

/// Expiry task spawned per entry. When it fires with the entry still
/// present it behaves exactly like a cancel with the standard timeout
/// message; otherwise it observes absence and no-ops.
async fn expire_after(pending: PendingMap, id: Uuid, after: Duration) {
    tokio::time::sleep(after).await;
    let mut pending = pending.write().await;
    if let Some(entry) = pending.remove(&id) {
        warn!("Request {} ({}) timed out", id, entry.request.kind());
        if entry.responder.send(RequestResult::failure(TIMEOUT_MESSAGE)).is_err() {
            warn!("Receiver for request {} was dropped before timeout", id);
        }
    }
}

impl Default for RequestRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for RequestRegistry {
    fn clone(&self) -> Self {
        Self {
            pending: self.pending.clone(),
            timeout: self.timeout,
        }
    }
}
