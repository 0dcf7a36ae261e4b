// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `gowa-admind`: the Admin API process entrypoint. Loads configuration,
//! wires the real supervisor client into the lifecycle controller, and
//! serves the HTTP surface until a shutdown signal arrives.

use std::net::SocketAddr;

use gowa_confstore::{ConfigStore, PortLocks};
use gowa_controller::LifecycleController;
use gowa_http::{build_router, Config};
use gowa_supervisor::XmlRpcSupervisorClient;
use gowa_template::RenderPaths;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    info!(admin_port = config.admin_port, dev_mode = config.dev_mode, "starting gowa-admind");

    let paths = RenderPaths {
        gowa_bin: config.gowa_bin.clone(),
        log_dir: config.supervisor_log_dir.clone(),
        instances_dir: config.instances_dir.clone(),
    };
    let confstore = ConfigStore::new(config.supervisor_conf_dir.clone());
    let locks = PortLocks::new(config.lock_dir.clone());
    let supervisor = XmlRpcSupervisorClient::new(
        config.supervisor_url.clone(),
        config.supervisor_user.clone(),
        config.supervisor_pass.clone(),
    );
    let controller = LifecycleController::new(confstore, locks, supervisor, paths);

    let admin_port = config.admin_port;
    let router = build_router(controller, config);

    let addr = SocketAddr::from(([0, 0, 0, 0], admin_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "gowa-admind listening");

    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    info!("gowa-admind shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler, falling back to ctrl_c only");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("shutdown signal received, draining in-flight requests");
}
