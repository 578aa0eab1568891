#![allow(dead_code)]

use anyhow::anyhow;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use topup_service::{
    account::{
        model::Account,
        repository::{AccountStore, InMemoryAccountStore},
        seed::mock_accounts,
    },
    auth::verifier::{BearerPresenceVerifier, CredentialVerifier},
    server::Server,
    topup::{controller::TopUpController, service::TopUpService, txn_id::TransactionIdGenerator},
};

/// Hands out `txn_test_0`, `txn_test_1`, ...
#[derive(Default)]
pub struct SequentialIds(AtomicUsize);

impl TransactionIdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        format!("txn_test_{}", self.0.fetch_add(1, Ordering::SeqCst))
    }
}

/// Reads through to a real store but refuses every write.
pub struct ReadOnlyStore(pub InMemoryAccountStore);

#[async_trait]
impl AccountStore for ReadOnlyStore {
    async fn find(&self, id: &str) -> anyhow::Result<Option<Account>> {
        self.0.find(id).await
    }

    async fn update(&self, _id: &str, _balance: Decimal) -> anyhow::Result<()> {
        Err(anyhow!("store is read-only"))
    }
}

pub fn controller_with(
    store: Arc<dyn AccountStore>,
    verifier: Arc<dyn CredentialVerifier>,
    ids: Arc<dyn TransactionIdGenerator>,
) -> Arc<TopUpController> {
    Arc::new(TopUpController::new(TopUpService::new(store, verifier, ids)))
}

/// Controller over the seed accounts, bearer-presence auth and sequential ids.
pub fn seeded() -> (Arc<TopUpController>, InMemoryAccountStore) {
    let store = InMemoryAccountStore::with_accounts(mock_accounts());
    let controller = controller_with(
        Arc::new(store.clone()),
        Arc::new(BearerPresenceVerifier),
        Arc::new(SequentialIds::default()),
    );
    (controller, store)
}

pub fn topup_request(
    user_id: &str,
    authorization: Option<&str>,
    content_type: Option<&str>,
    body: &str,
) -> String {
    let mut raw = format!("POST /api/admin/users/{}/topup HTTP/1.1\r\nHost: localhost\r\n", user_id);
    if let Some(authorization) = authorization {
        raw.push_str(&format!("Authorization: {}\r\n", authorization));
    }
    if let Some(content_type) = content_type {
        raw.push_str(&format!("Content-Type: {}\r\n", content_type));
    }
    raw.push_str(&format!("Content-Length: {}\r\n\r\n{}", body.len(), body));
    raw
}

/// Authorized JSON top-up for `user_id`.
pub fn json_topup(user_id: &str, body: &str) -> String {
    topup_request(user_id, Some("Bearer token"), Some("application/json"), body)
}

/// Pushes a raw request through the connection handler and returns `(status code, body)`.
pub async fn send(controller: &Arc<TopUpController>, raw: &str) -> (u16, Value) {
    let mut output = Vec::new();
    Server::handle_client(raw.as_bytes(), &mut output, controller)
        .await
        .expect("connection handled");

    let output = String::from_utf8(output).expect("utf-8 response");
    let (head, body) = output.split_once("\r\n\r\n").expect("response head");
    let status = head
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse().ok())
        .expect("status code");
    (status, serde_json::from_str(body).expect("json body"))
}
