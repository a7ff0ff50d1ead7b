//! Connection lifecycle for the single MongoDB client.
//!
//! The [`ConnectionManager`] is the only component that opens or closes the
//! physical connection. Facades borrow a client handle per call through
//! [`ConnectionManager::handle`], which fails fast with
//! [`StoreError::NotConnected`] until [`ConnectionManager::connect`] succeeds.

use std::time::Duration;

use mongodb::{Client, bson::doc, options::ClientOptions};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::error::{StoreError, StoreResult};
use crate::core::config::StoreConfig;

/// Observable state of the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

/// Owns the process-wide MongoDB client and its state.
pub struct ConnectionManager {
    config: StoreConfig,
    client: RwLock<Option<Client>>,
}

impl ConnectionManager {
    /// Create a manager in the `Disconnected` state. No I/O happens here.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            client: RwLock::new(None),
        }
    }

    /// Current connection state.
    pub async fn state(&self) -> ConnectionState {
        if self.client.read().await.is_some() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    /// Open the connection and verify it with a `ping`.
    ///
    /// On failure the state is left unchanged so the caller may retry.
    #[instrument(skip_all, fields(uri = %self.config.redacted_uri()))]
    pub async fn connect(&self) -> StoreResult<()> {
        if self.client.read().await.is_some() {
            warn!("connect() called while already connected, opening a new client");
        }

        // No lock is held while the ping runs, so `handle()` keeps failing fast.
        let client = self.open().await.inspect_err(|e| {
            warn!("Connection attempt failed: {}", e);
        })?;
        *self.client.write().await = Some(client);

        info!("Connected to MongoDB");
        Ok(())
    }

    async fn open(&self) -> StoreResult<Client> {
        let mut options = ClientOptions::parse(&self.config.uri)
            .await
            .map_err(StoreError::connection)?;

        if let Some(ms) = self.config.server_selection_timeout_ms {
            options.server_selection_timeout = Some(Duration::from_millis(ms));
        }
        if let Some(app_name) = &self.config.app_name {
            options.app_name = Some(app_name.clone());
        }

        let client = Client::with_options(options).map_err(StoreError::connection)?;

        // The driver connects lazily; ping so failures surface here.
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(StoreError::connection)?;

        Ok(client)
    }

    /// Close the connection. A no-op when already disconnected.
    #[instrument(skip_all)]
    pub async fn disconnect(&self) -> StoreResult<()> {
        let Some(client) = self.client.read().await.clone() else {
            debug!("disconnect() called while disconnected");
            return Ok(());
        };

        let limit = Duration::from_secs(self.config.shutdown_timeout_secs);
        if tokio::time::timeout(limit, client.shutdown()).await.is_err() {
            return Err(StoreError::disconnection(format!(
                "shutdown did not complete within {}s",
                self.config.shutdown_timeout_secs
            )));
        }

        *self.client.write().await = None;
        info!("Disconnected from MongoDB");
        Ok(())
    }

    /// Borrow the live client handle.
    ///
    /// This is the single gate every facade operation passes through first.
    pub async fn handle(&self) -> StoreResult<Client> {
        self.client
            .read()
            .await
            .clone()
            .ok_or(StoreError::NotConnected)
    }
}
