use subtle::ConstantTimeEq;

use crate::config::Config;

/// Seam between login and wherever identities live. The current deployment
/// has exactly one configured identity; a user table slots in behind this
/// trait without touching the issuer.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// The single admin identity from configuration.
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.admin_username.clone(), cfg.admin_password.clone())
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        // Both fields are always compared; no early exit on a username miss.
        let user_ok: bool = username
            .as_bytes()
            .ct_eq(self.username.as_bytes())
            .into();
        let pass_ok: bool = password
            .as_bytes()
            .ct_eq(self.password.as_bytes())
            .into();
        user_ok & pass_ok
    }
}
