use std::{error::Error, fmt::Debug};

use crate::constants::{BAD_REQUEST, INTERNAL_ERROR, NOT_FOUND, UNAUTHORIZED};

/// Every way a top-up can fail. `Display` is the message handed back to the caller.
#[derive(thiserror::Error)]
pub enum CustomError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("User not found")]
    UserNotFound,

    #[error("Content-Type must be application/json")]
    UnsupportedContentType,

    #[error("Request body is required")]
    EmptyBody,

    #[error("Invalid JSON format in request body")]
    MalformedJson(#[source] serde_json::Error),

    #[error("Amount is required")]
    MissingAmount,

    #[error("Amount must be a valid number greater than 0")]
    InvalidAmount,

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),

    #[error("ENV '{0}' Not Found")]
    EnvError(String, #[source] std::env::VarError),

    #[error("ENV '{0}' has invalid value '{1}'")]
    InvalidEnv(String, String),

    #[error("Error decode key")]
    KeyError(#[source] jsonwebtoken::errors::Error),
}

impl CustomError {
    pub fn status_line(&self) -> &'static str {
        match self {
            CustomError::Unauthorized => UNAUTHORIZED,
            CustomError::UserNotFound => NOT_FOUND,
            CustomError::UnsupportedContentType
            | CustomError::EmptyBody
            | CustomError::MalformedJson(_)
            | CustomError::MissingAmount
            | CustomError::InvalidAmount => BAD_REQUEST,
            CustomError::Internal(_)
            | CustomError::EnvError(..)
            | CustomError::InvalidEnv(..)
            | CustomError::KeyError(_) => INTERNAL_ERROR,
        }
    }
}

impl Debug for CustomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        if let Some(source) = self.source() {
            write!(f, " (Caused by: {})", source)?;
        }
        Ok(())
    }
}
