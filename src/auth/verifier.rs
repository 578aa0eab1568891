use std::collections::HashMap;

use crate::error::CustomError;

/// Decides whether a request's headers carry an acceptable credential.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, headers: &HashMap<String, String>) -> Result<(), CustomError>;
}

/// Accepts any `authorization` header mentioning `Bearer`, token or not.
#[derive(Debug, Default, Clone, Copy)]
pub struct BearerPresenceVerifier;

impl CredentialVerifier for BearerPresenceVerifier {
    fn verify(&self, headers: &HashMap<String, String>) -> Result<(), CustomError> {
        match headers.get("authorization") {
            Some(value) if value.contains("Bearer") => Ok(()),
            _ => Err(CustomError::Unauthorized),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn bearer_anywhere_in_header_passes() {
        let verifier = BearerPresenceVerifier;
        assert!(verifier.verify(&headers(&[("authorization", "Bearer abc")])).is_ok());
        assert!(verifier.verify(&headers(&[("authorization", "xBearer")])).is_ok());
    }

    #[test]
    fn missing_or_other_scheme_is_unauthorized() {
        let verifier = BearerPresenceVerifier;
        assert!(matches!(
            verifier.verify(&headers(&[])),
            Err(CustomError::Unauthorized)
        ));
        assert!(matches!(
            verifier.verify(&headers(&[("authorization", "Basic dXNlcjpwdw==")])),
            Err(CustomError::Unauthorized)
        ));
        assert!(verifier.verify(&headers(&[("authorization", "bearer abc")])).is_err());
    }
}
