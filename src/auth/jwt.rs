use std::collections::HashMap;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use super::model::Claims;
use super::verifier::CredentialVerifier;
use crate::error::CustomError;
use crate::utils::extract_token;

/// Requires `Authorization: Bearer <jwt>` with a valid signature and an unexpired `exp`.
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    /// RS256 with a PEM public key. Literal `\n` sequences are accepted in place of newlines.
    pub fn from_rsa_pem(pem: &str) -> Result<Self, CustomError> {
        let key = DecodingKey::from_rsa_pem(pem.replace("\\n", "\n").as_bytes())
            .map_err(CustomError::KeyError)?;
        Ok(Self {
            key,
            validation: Validation::new(Algorithm::RS256),
        })
    }

    /// HS256 with a shared secret.
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

impl CredentialVerifier for JwtVerifier {
    fn verify(&self, headers: &HashMap<String, String>) -> Result<(), CustomError> {
        let token = extract_token(headers).ok_or(CustomError::Unauthorized)?;
        match decode::<Claims>(&token, &self.key, &self.validation) {
            Ok(data) => {
                debug!(sub = %data.claims.sub, "token accepted");
                Ok(())
            }
            Err(err) => {
                debug!("token rejected: {}", err);
                Err(CustomError::Unauthorized)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};

    const SECRET: &[u8] = b"unit-test-secret";

    fn token(secret: &[u8], valid_for: Duration) -> String {
        let claims = Claims {
            sub: "admin".to_string(),
            exp: (Utc::now() + valid_for).timestamp() as usize,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret),
        )
        .unwrap()
    }

    fn bearer(token: &str) -> HashMap<String, String> {
        HashMap::from([("authorization".to_string(), format!("Bearer {}", token))])
    }

    #[test]
    fn valid_token_passes() {
        let verifier = JwtVerifier::from_secret(SECRET);
        assert!(verifier.verify(&bearer(&token(SECRET, Duration::hours(1)))).is_ok());
    }

    #[test]
    fn expired_or_foreign_token_is_unauthorized() {
        let verifier = JwtVerifier::from_secret(SECRET);
        assert!(
            verifier
                .verify(&bearer(&token(SECRET, Duration::hours(-2))))
                .is_err()
        );
        assert!(
            verifier
                .verify(&bearer(&token(b"other-secret", Duration::hours(1))))
                .is_err()
        );
        assert!(verifier.verify(&bearer("not.a.jwt")).is_err());
    }

    #[test]
    fn bare_bearer_is_not_enough() {
        let verifier = JwtVerifier::from_secret(SECRET);
        let headers = HashMap::from([("authorization".to_string(), "Bearer".to_string())]);
        assert!(matches!(
            verifier.verify(&headers),
            Err(CustomError::Unauthorized)
        ));
    }

    #[test]
    fn garbage_pem_is_a_key_error() {
        assert!(matches!(
            JwtVerifier::from_rsa_pem("not a key"),
            Err(CustomError::KeyError(_))
        ));
    }
}
