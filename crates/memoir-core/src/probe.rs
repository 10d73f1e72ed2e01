//! Availability probe
//!
//! Periodically asks the gateway whether the remote tier answers a round trip
//! and tracks network connectivity reported by the host. Both signals are
//! published on `watch` channels for status indicators; nothing here affects
//! how data is loaded or saved.

use crate::gateway::SyncGateway;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Default time between two probes
pub const DEFAULT_PROBE_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerStatus {
    /// No probe has completed yet
    Checking,
    Available,
    Unavailable,
}

/// Combined indicator shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBadge {
    Checking,
    CloudSync,
    LocalOnly,
}

impl StorageBadge {
    pub fn from_signals(server: ServerStatus, online: bool) -> Self {
        match (server, online) {
            (_, false) => StorageBadge::LocalOnly,
            (ServerStatus::Checking, true) => StorageBadge::Checking,
            (ServerStatus::Available, true) => StorageBadge::CloudSync,
            (ServerStatus::Unavailable, true) => StorageBadge::LocalOnly,
        }
    }
}

impl std::fmt::Display for StorageBadge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBadge::Checking => write!(f, "Checking"),
            StorageBadge::CloudSync => write!(f, "Cloud Sync"),
            StorageBadge::LocalOnly => write!(f, "Local Only"),
        }
    }
}

pub struct AvailabilityProbe {
    gateway: Arc<SyncGateway>,
    interval: Duration,
    server_tx: watch::Sender<ServerStatus>,
    online_tx: watch::Sender<bool>,
    recheck: Notify,
}

impl AvailabilityProbe {
    pub fn new(gateway: Arc<SyncGateway>) -> Self {
        let (server_tx, _) = watch::channel(ServerStatus::Checking);
        let (online_tx, _) = watch::channel(true);
        Self {
            gateway,
            interval: DEFAULT_PROBE_INTERVAL,
            server_tx,
            online_tx,
            recheck: Notify::new(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn server_status(&self) -> watch::Receiver<ServerStatus> {
        self.server_tx.subscribe()
    }

    pub fn online(&self) -> watch::Receiver<bool> {
        self.online_tx.subscribe()
    }

    pub fn badge(&self) -> StorageBadge {
        StorageBadge::from_signals(*self.server_tx.borrow(), *self.online_tx.borrow())
    }

    /// Feed a connectivity event. Coming back online schedules an immediate probe.
    pub fn set_online(&self, online: bool) {
        let was_online = self.online_tx.send_replace(online);
        if online && !was_online {
            info!("Network connectivity restored, re-checking server storage");
            self.recheck.notify_one();
        } else if !online && was_online {
            info!("Network connectivity lost");
        }
    }

    /// Probe once and publish the result
    pub async fn check_now(&self) -> ServerStatus {
        let status = if self.gateway.is_available().await {
            ServerStatus::Available
        } else {
            ServerStatus::Unavailable
        };

        let previous = self.server_tx.send_replace(status);
        if previous != status {
            info!("Server storage status: {:?} -> {:?}", previous, status);
        } else {
            debug!("Server storage status unchanged: {:?}", status);
        }
        status
    }

    /// Run the probe on its interval until the handle is stopped or dropped.
    /// The first probe runs immediately.
    pub fn spawn(self: &Arc<Self>) -> ProbeHandle {
        let cancel = CancellationToken::new();
        let probe = self.clone();
        let token = cancel.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(probe.interval);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {}
                    _ = probe.recheck.notified() => {}
                }
                // A health check in flight must not hold up cancellation
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = probe.check_now() => {}
                }
            }
            debug!("Availability probe stopped");
        });

        ProbeHandle {
            cancel,
            task: Some(task),
        }
    }
}

/// Stops the probe task when dropped
pub struct ProbeHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl ProbeHandle {
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for ProbeHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
