//! Carescribe — browser-facing state layer of a clinical documentation tool.
//!
//! Two screen-level views, each owning its own fetch-and-derive pipeline:
//! the analytics dashboard (`dashboard`) and the clinical-notes studio
//! (`studio`). Data flows API → local state → pure derivation → render;
//! the rendering shell consumes this crate and owns everything visual.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod draft;
pub mod models;
pub mod status;
pub mod studio;
pub mod templates;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the embedding shell.
///
/// Honors `RUST_LOG` when set, otherwise falls back to the crate-level
/// default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}
