use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use super::issuer::Claims;
use crate::config::Config;
use crate::errors::AppError;

/// Validates presented bearer tokens: signature against the shared secret,
/// exact issuer and audience, and expiry. Pure and stateless; no storage or
/// network lookups happen here, so verification never shares the store's
/// failure domain.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str, issuer: &str, audience: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(&cfg.jwt_secret, &cfg.jwt_issuer, &cfg.jwt_audience)
    }

    /// Every rejection collapses to one `InvalidToken` outcome so callers
    /// learn nothing about which check failed; the reason goes to the log.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => {
                tracing::debug!("token rejected: {}", e);
                Err(AppError::InvalidToken)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    use super::*;
    use crate::auth::credentials::StaticCredentials;
    use crate::auth::issuer::TokenIssuer;

    const SECRET: &str = "test-secret";
    const ISSUER: &str = "GeoNexus-App";
    const AUDIENCE: &str = "GeoNexus-Frontend";

    fn verifier() -> TokenVerifier {
        TokenVerifier::new(SECRET, ISSUER, AUDIENCE)
    }

    fn issue(secret: &str, iss: &str, aud: &str) -> String {
        let issuer = TokenIssuer::new(
            Arc::new(StaticCredentials::new("admin", "password123")),
            secret,
            iss,
            aud,
        );
        issuer.login("admin", "password123").unwrap()
    }

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_fresh_token_round_trips() {
        let token = issue(SECRET, ISSUER, AUDIENCE);
        let claims = verifier().verify(&token).unwrap();
        assert_eq!(claims.sub, "admin");
    }

    #[test]
    fn test_expired_token_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "admin".to_string(),
            jti: "test-jti".to_string(),
            iss: ISSUER.to_string(),
            aud: AUDIENCE.to_string(),
            iat: now - 4 * 3600,
            // An hour past, well beyond the verifier's leeway.
            exp: now - 3600,
        };
        let token = sign(&claims, SECRET);

        assert!(matches!(
            verifier().verify(&token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issue("some-other-secret", ISSUER, AUDIENCE);
        assert!(matches!(
            verifier().verify(&token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let token = issue(SECRET, "Imposter-App", AUDIENCE);
        assert!(matches!(
            verifier().verify(&token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_wrong_audience_rejected() {
        let token = issue(SECRET, ISSUER, "Other-Frontend");
        assert!(matches!(
            verifier().verify(&token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        use base64::Engine;

        let token = issue(SECRET, ISSUER, AUDIENCE);
        let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();

        // Rewrite the subject without re-signing.
        let mut payload: serde_json::Value =
            serde_json::from_slice(&engine.decode(&parts[1]).unwrap()).unwrap();
        payload["sub"] = serde_json::json!("superadmin");
        parts[1] = engine.encode(serde_json::to_vec(&payload).unwrap());

        let forged = parts.join(".");
        assert!(matches!(
            verifier().verify(&forged),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            verifier().verify("not-a-jwt"),
            Err(AppError::InvalidToken)
        ));
        assert!(matches!(verifier().verify(""), Err(AppError::InvalidToken)));
    }
}
