pub mod config;
pub mod gemini;
pub mod models;
pub mod pipeline;
pub mod workflow;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the process.
///
/// Honors `RUST_LOG` when set, otherwise uses the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}
