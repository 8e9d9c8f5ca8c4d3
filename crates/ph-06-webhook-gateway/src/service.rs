//! Webhook gateway service - binds the listener and owns background tasks.

use crate::domain::config::HubConfig;
use crate::domain::error::GatewayError;
use axum::Router;
use ph_02_event_dedup::{sweep_task, EventDeduplicator};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Running HTTP server plus the dedup sweep.
pub struct WebhookGatewayService {
    config: HubConfig,
    router: Router,
    dedup: Arc<EventDeduplicator>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    server: Option<JoinHandle<std::io::Result<()>>>,
    sweeper: Option<JoinHandle<()>>,
    local_addr: Option<SocketAddr>,
}

impl WebhookGatewayService {
    pub fn new(config: HubConfig, router: Router, dedup: Arc<EventDeduplicator>) -> Self {
        Self {
            config,
            router,
            dedup,
            shutdown_tx: None,
            server: None,
            sweeper: None,
            local_addr: None,
        }
    }

    /// Binds `bind_addr`, spawns the server and the dedup sweep, and returns
    /// the bound address. Serving continues until `shutdown`.
    pub async fn start(&mut self) -> Result<SocketAddr, GatewayError> {
        if self.server.is_some() {
            return Err(GatewayError::Server("already started".into()));
        }
        info!("Starting webhook gateway...");

        let listener = TcpListener::bind(self.config.bind_addr)
            .await
            .map_err(|e| GatewayError::Bind {
                addr: self.config.bind_addr.to_string(),
                reason: e.to_string(),
            })?;
        let addr = listener
            .local_addr()
            .map_err(|e| GatewayError::Server(e.to_string()))?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        self.shutdown_tx = Some(shutdown_tx);

        self.sweeper = Some(tokio::spawn(sweep_task(
            Arc::clone(&self.dedup),
            self.config.sweep_interval(),
        )));

        let router = self.router.clone();
        self.server = Some(tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
        }));

        self.local_addr = Some(addr);
        info!(addr = %addr, "Webhook gateway listening");
        Ok(addr)
    }

    /// Address the server is bound to, once started.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    pub fn is_running(&self) -> bool {
        self.server.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Trigger graceful shutdown and wait for in-flight requests to finish.
    pub async fn shutdown(&mut self) -> Result<(), GatewayError> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(sweeper) = self.sweeper.take() {
            sweeper.abort();
        }

        if let Some(server) = self.server.take() {
            match server.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    error!(error = %e, "HTTP server error");
                    return Err(GatewayError::Server(e.to_string()));
                }
                Err(e) => return Err(GatewayError::Server(e.to_string())),
            }
        }

        self.local_addr = None;
        info!("Webhook gateway stopped");
        Ok(())
    }
}
