//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the immutable catalog, the origin allow-list, the Stripe session
//! client, and server configuration. Nothing here mutates after startup, so
//! requests are independent.

use checkout_core::{Catalog, OriginPolicy};
use checkout_stripe::SessionClient;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production (enables the HTTPS-only check)
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Trusted product catalog
    pub catalog: Arc<Catalog>,
    /// CORS origin allow-list
    pub origins: Arc<OriginPolicy>,
    /// Stripe checkout-session client
    pub stripe: Arc<SessionClient>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState from the environment
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let catalog = load_catalog();

        let origins = OriginPolicy::from_sources(
            std::env::var("FRONTEND_ORIGIN").ok().as_deref(),
            std::env::var("FRONTEND_ORIGINS").ok().as_deref(),
        );

        let stripe = SessionClient::from_env()?;

        Ok(Self {
            catalog: Arc::new(catalog),
            origins: Arc::new(origins),
            stripe: Arc::new(stripe),
            config,
        })
    }

    /// Assemble state from explicit parts (tests, embedding)
    pub fn with_parts(
        config: AppConfig,
        catalog: Catalog,
        origins: OriginPolicy,
        stripe: SessionClient,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            origins: Arc::new(origins),
            stripe: Arc::new(stripe),
            config,
        }
    }
}

/// Load the product catalog from config, falling back to the built-in table
fn load_catalog() -> Catalog {
    let config_paths = [
        "config/products.toml",
        "../config/products.toml",
        "../../config/products.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            match Catalog::from_toml(&content) {
                Ok(catalog) => {
                    tracing::info!("Loaded {} products from {}", catalog.len(), path);
                    return catalog;
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", path, e);
                }
            }
        }
    }

    tracing::info!("No catalog file found, using built-in catalog");
    Catalog::builtin()
}
