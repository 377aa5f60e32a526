use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::credentials::CredentialVerifier;
use crate::config::Config;
use crate::errors::AppError;

/// Tokens are valid for this long after issuance. There is no revocation;
/// once minted, a token lives out its full window.
pub const TOKEN_TTL_HOURS: i64 = 3;

/// Claims carried by every bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the logged-in username.
    pub sub: String,
    /// Unique token id.
    pub jti: String,
    pub iss: String,
    pub aud: String,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

/// Mints signed, time-bounded bearer tokens for callers that present a valid
/// credential pair.
pub struct TokenIssuer {
    credentials: Arc<dyn CredentialVerifier>,
    encoding_key: EncodingKey,
    issuer: String,
    audience: String,
}

impl TokenIssuer {
    pub fn new(
        credentials: Arc<dyn CredentialVerifier>,
        secret: &str,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            credentials,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.into(),
            audience: audience.into(),
        }
    }

    pub fn from_config(credentials: Arc<dyn CredentialVerifier>, cfg: &Config) -> Self {
        Self::new(credentials, &cfg.jwt_secret, &cfg.jwt_issuer, &cfg.jwt_audience)
    }

    /// Check the credential pair and mint a token on success. A mismatch is
    /// one generic `Unauthorized` outcome regardless of which field was wrong.
    pub fn login(&self, username: &str, password: &str) -> Result<String, AppError> {
        if !self.credentials.verify(username, password) {
            tracing::warn!(username = %username, "login rejected");
            return Err(AppError::Unauthorized);
        }

        let now = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            jti: Uuid::new_v4().to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("token signing failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::credentials::StaticCredentials;

    fn test_issuer() -> TokenIssuer {
        TokenIssuer::new(
            Arc::new(StaticCredentials::new("admin", "password123")),
            "test-secret",
            "GeoNexus-App",
            "GeoNexus-Frontend",
        )
    }

    #[test]
    fn test_login_valid_credentials_returns_token() {
        let token = test_issuer().login("admin", "password123").unwrap();
        assert!(!token.is_empty());
        // Compact JWS: header.payload.signature
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_login_wrong_password_rejected() {
        let result = test_issuer().login("admin", "wrong");
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_login_wrong_username_rejected() {
        let result = test_issuer().login("intruder", "password123");
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_token_claims_carry_subject_and_window() {
        use base64::Engine;

        let before = Utc::now().timestamp();
        let token = test_issuer().login("admin", "password123").unwrap();

        let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
        let payload = token.split('.').nth(1).unwrap();
        let claims: Claims =
            serde_json::from_slice(&engine.decode(payload).unwrap()).unwrap();

        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.iss, "GeoNexus-App");
        assert_eq!(claims.aud, "GeoNexus-Frontend");
        assert!(!claims.jti.is_empty());
        assert!(claims.iat >= before);
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_HOURS * 3600);
    }

    #[test]
    fn test_token_ids_are_unique() {
        use base64::Engine;

        let issuer = test_issuer();
        let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
        let jti = |token: String| -> String {
            let payload = token.split('.').nth(1).unwrap().to_string();
            let claims: Claims =
                serde_json::from_slice(&engine.decode(payload).unwrap()).unwrap();
            claims.jti
        };

        let a = jti(issuer.login("admin", "password123").unwrap());
        let b = jti(issuer.login("admin", "password123").unwrap());
        assert_ne!(a, b);
    }
}
