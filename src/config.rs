use std::env::{self, VarError};
use std::path::PathBuf;
use std::sync::Arc;

use dotenvy::dotenv;

use crate::auth::jwt::JwtVerifier;
use crate::auth::verifier::{BearerPresenceVerifier, CredentialVerifier};
use crate::constants::DEFAULT_BIND_ADDR;
use crate::error::CustomError;

#[derive(Debug, Clone, PartialEq)]
pub enum AuthMode {
    /// Any `authorization` header mentioning `Bearer`.
    Bearer,
    /// RS256 public key.
    JwtRsa(String),
    /// HS256 shared secret.
    JwtSecret(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_addr: String,
    pub auth_mode: AuthMode,
    /// JSON file replacing the built-in account list.
    pub seed_path: Option<PathBuf>,
}

impl Config {
    /// Reads `.env` (if any) and then the process environment.
    pub fn from_env() -> Result<Self, CustomError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, CustomError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let optional = |key: &str| match lookup(key) {
            Ok(value) if !value.trim().is_empty() => Ok(Some(value)),
            Ok(_) | Err(VarError::NotPresent) => Ok(None),
            Err(e) => Err(CustomError::EnvError(key.to_string(), e)),
        };

        let bind_addr = optional("BIND_ADDR")?.unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let seed_path = optional("ACCOUNTS_SEED_PATH")?.map(PathBuf::from);

        let auth_mode = match optional("AUTH_MODE")?.as_deref().map(str::trim) {
            None | Some("bearer") => AuthMode::Bearer,
            Some("jwt") => match (optional("JWT_PUBLIC_KEY")?, optional("JWT_SECRET")?) {
                (Some(pem), _) => AuthMode::JwtRsa(pem),
                (None, Some(secret)) => AuthMode::JwtSecret(secret),
                (None, None) => {
                    return Err(CustomError::EnvError(
                        "JWT_PUBLIC_KEY".to_string(),
                        VarError::NotPresent,
                    ));
                }
            },
            Some(other) => {
                return Err(CustomError::InvalidEnv(
                    "AUTH_MODE".to_string(),
                    other.to_string(),
                ));
            }
        };

        Ok(Config {
            bind_addr,
            auth_mode,
            seed_path,
        })
    }

    pub fn verifier(&self) -> Result<Arc<dyn CredentialVerifier>, CustomError> {
        Ok(match &self.auth_mode {
            AuthMode::Bearer => Arc::new(BearerPresenceVerifier),
            AuthMode::JwtRsa(pem) => Arc::new(JwtVerifier::from_rsa_pem(pem)?),
            AuthMode::JwtSecret(secret) => Arc::new(JwtVerifier::from_secret(secret.as_bytes())),
        })
    }
}
