use anyhow::Context;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CustomError;
use crate::utils::{decimal_from_literal, leading_number};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TopUpResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    pub transaction_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub user_id: String,
    pub timestamp: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: None,
        }
    }

    pub fn with_error(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: Some(error.into()),
        }
    }
}

/// Validated value of a requested `amount`.
///
/// Numbers are taken as they are, strings by their leading decimal literal. Anything
/// else, and anything not finite and above zero, is `InvalidAmount`. A positive amount
/// that a `Decimal` cannot hold is an internal failure rather than a caller mistake.
pub fn coerce_amount(amount: &Value) -> Result<Decimal, CustomError> {
    let literal = match amount {
        Value::Number(number) => leading_number(&number.to_string()),
        Value::String(text) => leading_number(text),
        _ => None,
    }
    .ok_or(CustomError::InvalidAmount)?;

    let approx: f64 = literal.parse().map_err(|_| CustomError::InvalidAmount)?;
    if !approx.is_finite() || approx <= 0.0 {
        return Err(CustomError::InvalidAmount);
    }

    decimal_from_literal(&literal)
        .filter(|amount| !amount.is_zero())
        .with_context(|| format!("Amount {} is outside the supported decimal range", literal))
        .map_err(CustomError::Internal)
}
