use std::sync::Arc;
use std::time::Duration;

use crate::ws::manager::WsManager;

/// Seconds between keepalive pings on feed connections.
const HEARTBEAT_INTERVAL_SECS: u64 = 30;

/// Spawn the keepalive task for the complaint feed.
///
/// Dashboard clients sit on the WebSocket for hours between events, long
/// enough for NAT tables and proxies to drop the idle connection. A
/// periodic Ping keeps the path warm and makes dead peers surface as send
/// errors in their connection tasks. Abort the returned handle at
/// shutdown.
pub fn start_heartbeat(ws_manager: Arc<WsManager>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(HEARTBEAT_INTERVAL_SECS));

        loop {
            interval.tick().await;

            let count = ws_manager.connection_count().await;
            if count == 0 {
                continue;
            }
            tracing::debug!(count, "Pinging feed connections");
            ws_manager.ping_all().await;
        }
    })
}
