use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use geonexus::auth::{StaticCredentials, TokenIssuer, TokenVerifier};
use geonexus::models::{BoundingBox, NewVendor};
use geonexus::store::VendorStore;
use geonexus::{api, cli, config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "geonexus=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = config::load()?;
    let args = cli::Cli::parse();

    let result = match args.command {
        Some(cli::Commands::Serve { port }) => {
            let port = port.unwrap_or(cfg.port);
            run_server(cfg, port).await
        }
        Some(cli::Commands::Vendor { command }) => {
            let store = VendorStore::connect(&cfg.database_url).await?;
            store.migrate().await?;
            handle_vendor_command(&store, command).await
        }
        None => {
            let port = cfg.port;
            run_server(cfg, port).await
        }
    };

    if let Err(ref e) = result {
        eprintln!("Error: {:?}", e);
    }
    result
}

async fn run_server(cfg: config::Config, port: u16) -> anyhow::Result<()> {
    tracing::info!("Connecting to database...");
    let store = VendorStore::connect(&cfg.database_url).await?;

    tracing::info!("Running migrations...");
    store.migrate().await?;

    store.seed_if_empty().await?;

    let credentials = Arc::new(StaticCredentials::from_config(&cfg));
    let issuer = TokenIssuer::from_config(credentials, &cfg);
    let verifier = TokenVerifier::from_config(&cfg);

    let state = Arc::new(AppState {
        store,
        issuer,
        verifier: verifier.clone(),
        config: cfg,
    });

    let app = axum::Router::new()
        // Health endpoint (no auth)
        .route("/healthz", axum::routing::get(|| async { "ok" }))
        .nest("/api", api::api_router(verifier))
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        // The map frontend runs on a different origin; restrict CORS to it
        // (plus localhost for dev).
        .layer({
            use axum::http::{HeaderName, Method};
            use tower_http::cors::AllowOrigin;
            let frontend_origin = std::env::var("FRONTEND_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:5173".to_string());
            CorsLayer::new()
                .allow_origin(AllowOrigin::predicate(move |origin, _| {
                    let origin_str = origin.to_str().unwrap_or("");
                    origin_str == frontend_origin
                        || origin_str.starts_with("http://localhost:")
                        || origin_str.starts_with("http://127.0.0.1:")
                }))
                .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE, Method::OPTIONS])
                .allow_headers([
                    HeaderName::from_static("content-type"),
                    HeaderName::from_static("authorization"),
                ])
        })
        .layer(axum::middleware::from_fn(request_id_middleware));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("GeoNexus API listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Middleware: injects a unique X-Request-Id into every response so clients
/// can correlate errors with server logs.
async fn request_id_middleware(
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let req_id = uuid::Uuid::new_v4().to_string();
    let mut resp = next.run(req).await;
    if let Ok(val) = axum::http::HeaderValue::from_str(&req_id) {
        resp.headers_mut().insert("x-request-id", val);
    }
    resp
}

async fn handle_vendor_command(
    store: &VendorStore,
    cmd: cli::VendorCommands,
) -> anyhow::Result<()> {
    match cmd {
        cli::VendorCommands::Add {
            name,
            lat,
            lng,
            status,
            kind,
        } => {
            let vendor = store
                .insert(&NewVendor {
                    name,
                    lat,
                    lng,
                    status,
                    kind,
                })
                .await?;
            println!(
                "Vendor created:\n  ID:     {}\n  Name:   {}\n  At:     {}, {}\n  Status: {}",
                vendor.id, vendor.name, vendor.lat, vendor.lng, vendor.status
            );
        }
        cli::VendorCommands::List {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        } => {
            let bounds = BoundingBox::from_parts(min_lat, max_lat, min_lng, max_lng);
            let vendors = store.list(bounds.as_ref()).await?;
            if vendors.is_empty() {
                println!("No vendors found.");
            } else {
                println!(
                    "{:<8} {:<24} {:>10} {:>11} {:<10} TYPE",
                    "ID", "NAME", "LAT", "LNG", "STATUS"
                );
                for v in vendors {
                    println!(
                        "{:<8} {:<24} {:>10.4} {:>11.4} {:<10} {}",
                        v.id, v.name, v.lat, v.lng, v.status, v.kind
                    );
                }
            }
        }
        cli::VendorCommands::SetStatus { id, status } => {
            match store.update_status(id, &status).await? {
                Some(v) => println!("Vendor {} status set to '{}'.", v.id, v.status),
                None => println!("Vendor not found."),
            }
        }
        cli::VendorCommands::Remove { id } => {
            if store.delete(id).await? {
                println!("Vendor deleted.");
            } else {
                println!("Vendor not found.");
            }
        }
    }
    Ok(())
}
