//! Login and bearer-token checking for the mutation surface.
//!
//! `TokenIssuer` turns a valid credential pair into a signed, time-bounded
//! JWT; `TokenVerifier` is the pure check applied before any write reaches
//! the store. Tokens are stateless: validity is signature + claims + clock,
//! nothing server-side.

pub mod credentials;
pub mod issuer;
pub mod verifier;

pub use credentials::{CredentialVerifier, StaticCredentials};
pub use issuer::{Claims, TokenIssuer, TOKEN_TTL_HOURS};
pub use verifier::TokenVerifier;
