//! CLI module for gallery

pub mod health;
pub mod serve;

use clap::{Parser, Subcommand};

/// App gallery - listing API with health checks and screenshot proxy
#[derive(Parser, Debug)]
#[command(name = "gallery")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    Flags take precedence over the variables below.

    GALLERY_HOST                        Bind address (default: 0.0.0.0, legacy: HOST)
    GALLERY_PORT                        Listen port (default: 5000, legacy: PORT)
    GALLERY_DATABASE_URL                Database URL (default: sqlite://gallery.db, legacy: DATABASE_URL)
    GALLERY_LOG_LEVEL                   Log filter (default: info, fallback: RUST_LOG)
    GALLERY_LOG_DIR                     Also write daily-rotated logs to this directory
    GALLERY_HEALTH_PROBE_TIMEOUT_SECS   Per-app probe timeout (default: 8)
    GALLERY_HEALTH_CACHE_TTL_SECS       Health snapshot lifetime (default: 180)
    GALLERY_SCREENSHOT_ENDPOINT         Imaging service base URL
    GALLERY_SCREENSHOT_TIMEOUT_SECS     Screenshot fetch timeout (default: 30)
    GALLERY_SCREENSHOT_CACHE_TTL_SECS   Screenshot lifetime (default: 3600)
    GALLERY_SCREENSHOT_CACHE_CAPACITY   Maximum cached screenshots (default: 60)
    GALLERY_SCREENSHOT_MAX_BYTES        Maximum screenshot size (default: 10485760)
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the gallery server
    Serve(serve::ServeArgs),
    /// Probe every listed app once and print the results
    Health(health::HealthArgs),
}
