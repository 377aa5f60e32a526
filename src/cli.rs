use clap::{Parser, Subcommand};

/// GeoNexus — GIS vendor facility API
#[derive(Parser)]
#[command(name = "geonexus", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Port to bind (defaults to PORT or 10000)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Manage vendor records directly against the store
    Vendor {
        #[command(subcommand)]
        command: VendorCommands,
    },
}

#[derive(Subcommand)]
pub enum VendorCommands {
    /// Insert a new vendor
    Add {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        #[arg(long, default_value = "success")]
        status: String,
        /// Free-form category tag
        #[arg(long = "type", default_value = "")]
        kind: String,
    },
    /// List vendors, optionally within a bounding box
    /// (a partial box is ignored: all four bounds or none)
    List {
        #[arg(long, allow_hyphen_values = true)]
        min_lat: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        max_lat: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        min_lng: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        max_lng: Option<f64>,
    },
    /// Replace a vendor's status
    SetStatus {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        status: String,
    },
    /// Delete a vendor
    Remove {
        #[arg(long)]
        id: i64,
    },
}
