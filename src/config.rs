use serde::Deserialize;

const DEFAULT_JWT_SECRET: &str = "GeoNexus_Super_Secret_Key_2026_Keep_It_Safe";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// Symmetric key for signing and verifying bearer tokens.
    /// Set via GEONEXUS_JWT_SECRET. The default is public — override it
    /// anywhere that is not a local/test deployment.
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    /// The single admin identity accepted by login.
    /// Set via GEONEXUS_ADMIN_USERNAME / GEONEXUS_ADMIN_PASSWORD.
    pub admin_username: String,
    pub admin_password: String,
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();

    let jwt_secret =
        std::env::var("GEONEXUS_JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.into());

    if jwt_secret == DEFAULT_JWT_SECRET {
        let env_mode = std::env::var("GEONEXUS_ENV")
            .or_else(|_| std::env::var("RUST_ENV"))
            .unwrap_or_default();
        if env_mode == "production" {
            anyhow::bail!(
                "GEONEXUS_JWT_SECRET is still the public default. \
                 Set a proper secret before running in production."
            );
        }
        eprintln!("⚠️  GEONEXUS_JWT_SECRET is not set — using the public default. Set a real secret for production.");
    }

    Ok(Config {
        port: std::env::var("PORT")
            .unwrap_or_else(|_| "10000".into())
            .parse()
            .unwrap_or(10000),
        database_url: std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/geonexus".into()),
        jwt_secret,
        jwt_issuer: std::env::var("GEONEXUS_JWT_ISSUER").unwrap_or_else(|_| "GeoNexus-App".into()),
        jwt_audience: std::env::var("GEONEXUS_JWT_AUDIENCE")
            .unwrap_or_else(|_| "GeoNexus-Frontend".into()),
        admin_username: std::env::var("GEONEXUS_ADMIN_USERNAME")
            .unwrap_or_else(|_| "admin".into()),
        admin_password: std::env::var("GEONEXUS_ADMIN_PASSWORD")
            .unwrap_or_else(|_| "password123".into()),
    })
}
