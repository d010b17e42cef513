use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use service::runtime;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::routes;
use crate::state::ServerState;

pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!(event = "shutdown_signal", "shutdown signal received, draining connections");
}

/// Public entry: open the store, serve until a shutdown signal, then close the store
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let store = runtime::open_store(&cfg.storage).await?;

    let app: Router = routes::build_router(ServerState::with_store(store.clone()), build_cors());

    let served = async {
        let addr = bind_addr(&cfg)?;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!(%addr, "starting drafts server");
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        anyhow::Ok(())
    }
    .await;

    // 无论服务是否正常退出，都要释放存储
    let closed = store.close().await;
    if let Err(e) = &closed {
        error!(error = %e, "closing draft store failed");
    }
    served?;
    closed?;
    info!(event = "store_closed", "draft store closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_from_config() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "0.0.0.0".into();
        cfg.server.port = 9090;
        assert_eq!(bind_addr(&cfg).unwrap().to_string(), "0.0.0.0:9090");
    }

    #[test]
    fn bind_addr_rejects_bad_host() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "not a host".into();
        assert!(bind_addr(&cfg).is_err());
    }
}
