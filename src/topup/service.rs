use anyhow::Context;
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use super::model::{TopUpResponse, coerce_amount};
use super::txn_id::TransactionIdGenerator;
use crate::account::repository::AccountStore;
use crate::auth::verifier::CredentialVerifier;
use crate::error::CustomError;
use crate::req::Request;
use crate::utils::iso_timestamp;

pub struct TopUpService {
    store: Arc<dyn AccountStore>,
    verifier: Arc<dyn CredentialVerifier>,
    ids: Arc<dyn TransactionIdGenerator>,
}

impl TopUpService {
    pub fn new(
        store: Arc<dyn AccountStore>,
        verifier: Arc<dyn CredentialVerifier>,
        ids: Arc<dyn TransactionIdGenerator>,
    ) -> Self {
        TopUpService {
            store,
            verifier,
            ids,
        }
    }

    /// Adds the requested amount to `user_id`'s balance.
    ///
    /// Checks run in a fixed order and the first failure wins: credential, account,
    /// content type, body presence, JSON syntax, `amount` presence, `amount` value.
    /// Nothing is written unless all of them pass.
    pub async fn top_up(
        &self,
        user_id: &str,
        request: &Request,
    ) -> Result<TopUpResponse, CustomError> {
        self.verifier.verify(&request.headers)?;

        let account = self
            .store
            .find(user_id)
            .await
            .with_context(|| format!("Failed to look up account {}", user_id))?
            .ok_or(CustomError::UserNotFound)?;

        match request.header("content-type") {
            Some(content_type) if content_type.contains("application/json") => {}
            _ => return Err(CustomError::UnsupportedContentType),
        }

        let raw_body = request.text();
        if raw_body.trim().is_empty() {
            return Err(CustomError::EmptyBody);
        }

        let body: Value = serde_json::from_str(&raw_body).map_err(|err| {
            warn!("JSON parse error: {}", err);
            CustomError::MalformedJson(err)
        })?;

        let amount = match body.get("amount") {
            None | Some(Value::Null) => return Err(CustomError::MissingAmount),
            Some(amount) => amount,
        };
        let amount = coerce_amount(amount)?;

        let balance = account
            .balance_or_zero()
            .checked_add(amount)
            .with_context(|| format!("Balance overflow for account {}", user_id))?;
        self.store
            .update(user_id, balance)
            .await
            .with_context(|| format!("Failed to update account {}", user_id))?;

        let transaction_id = self.ids.next_id();
        info!(
            user_id,
            %amount,
            %balance,
            transaction_id = %transaction_id,
            "balance topped up"
        );

        Ok(TopUpResponse {
            balance,
            transaction_id,
            amount,
            user_id: user_id.to_string(),
            timestamp: iso_timestamp(Utc::now()),
        })
    }
}
