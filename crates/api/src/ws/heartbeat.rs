use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::ws::manager::WsManager;

/// Seconds between Ping frames sent to connected sockets.
const PING_INTERVAL_SECS: u64 = 30;

/// Spawn the background task that keeps WebSocket connections warm.
///
/// Idle connections get reaped by browsers and intermediate proxies; a
/// periodic Ping keeps them open and lets the manager notice dead peers.
/// The returned handle is aborted during graceful shutdown.
pub fn start_heartbeat(manager: Arc<WsManager>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(PING_INTERVAL_SECS));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let connections = manager.connection_count().await;
            if connections == 0 {
                continue;
            }
            tracing::debug!(connections, "pinging connected sockets");
            manager.ping_all().await;
        }
    })
}
