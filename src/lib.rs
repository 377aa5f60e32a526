//! GeoNexus — a GIS backend for point-located vendor facilities.
//!
//! Vendors live in a Postgres-backed store with bounding-box retrieval;
//! reads are open, mutations require a bearer token minted by login.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod store;

use auth::{TokenIssuer, TokenVerifier};
use store::VendorStore;

/// Shared application state passed to handlers and middleware.
pub struct AppState {
    pub store: VendorStore,
    pub issuer: TokenIssuer,
    pub verifier: TokenVerifier,
    pub config: config::Config,
}
