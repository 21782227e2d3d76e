//! Bookstore application library
//!
//! Wires the service modules into the kernel registry and runs the HTTP server.

use anyhow::Context;
use bookstore_kernel::{settings::Settings, InitCtx, ModuleRegistry};

pub mod modules;

/// Re-export commonly used types
pub use modules::*;

/// Build a registry holding every service module
pub fn registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);
    registry
}

/// Run the service until a shutdown signal arrives.
///
/// Modules are stopped even when the server exits with an error.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let registry = registry();
    let ctx = InitCtx {
        settings: &settings,
    };

    registry
        .init_modules(&ctx)
        .await
        .context("module initialization failed")?;
    registry
        .start_modules(&ctx)
        .await
        .context("module start failed")?;

    let served = bookstore_http::start_server(&registry, &settings, shutdown_signal()).await;

    registry
        .stop_modules()
        .await
        .context("module shutdown failed")?;

    served
}

/// Wait for Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}
