//! Unit tests for `WsManager`.
//!
//! These tests exercise the WebSocket connection manager directly, without
//! performing any HTTP upgrades. They verify add/remove semantics, feed
//! routing, and graceful shutdown behaviour.

use assert_matches::assert_matches;
use axum::extract::ws::Message;
use civiclink_api::ws::WsManager;

/// Register a connection with the given identity.
async fn add_conn(
    manager: &WsManager,
    conn_id: &str,
    profile_id: i64,
    email: &str,
    role: &str,
) -> tokio::sync::mpsc::UnboundedReceiver<Message> {
    manager
        .add(
            conn_id.to_string(),
            profile_id,
            email.to_string(),
            role.to_string(),
        )
        .await
}

// ---------------------------------------------------------------------------
// Test: new manager starts with zero connections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn new_manager_has_zero_connections() {
    let manager = WsManager::new();

    assert_eq!(manager.connection_count().await, 0);
}

// ---------------------------------------------------------------------------
// Test: add() increments the connection count
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_increments_connection_count() {
    let manager = WsManager::new();

    let _rx = add_conn(&manager, "conn-1", 1, "citizen@example.com", "citizen").await;

    assert_eq!(manager.connection_count().await, 1);
}

// ---------------------------------------------------------------------------
// Test: remove() decrements the connection count
// ---------------------------------------------------------------------------

#[tokio::test]
async fn remove_decrements_connection_count() {
    let manager = WsManager::new();

    let _rx = add_conn(&manager, "conn-1", 1, "citizen@example.com", "citizen").await;
    assert_eq!(manager.connection_count().await, 1);

    manager.remove("conn-1").await;
    assert_eq!(manager.connection_count().await, 0);
}

// ---------------------------------------------------------------------------
// Test: remove() with unknown ID is a no-op
// ---------------------------------------------------------------------------

#[tokio::test]
async fn remove_unknown_id_is_noop() {
    let manager = WsManager::new();

    let _rx = add_conn(&manager, "conn-1", 1, "citizen@example.com", "citizen").await;
    manager.remove("nonexistent").await;

    assert_eq!(manager.connection_count().await, 1);
}

// ---------------------------------------------------------------------------
// Test: shutdown_all() sends Close and clears all connections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn shutdown_all_sends_close_and_clears() {
    let manager = WsManager::new();

    let mut rx1 = add_conn(&manager, "conn-1", 1, "a@example.com", "citizen").await;
    let mut rx2 = add_conn(&manager, "conn-2", 2, "b@example.com", "admin").await;
    assert_eq!(manager.connection_count().await, 2);

    manager.shutdown_all().await;

    // Connection count should be zero after shutdown.
    assert_eq!(manager.connection_count().await, 0);

    // Both receivers should have received a Close message.
    let msg1 = rx1.recv().await.expect("rx1 should receive Close");
    assert_matches!(msg1, Message::Close(None));

    let msg2 = rx2.recv().await.expect("rx2 should receive Close");
    assert_matches!(msg2, Message::Close(None));

    // After Close, the channel should be closed (no more messages).
    assert!(
        rx1.recv().await.is_none(),
        "Channel should be closed after shutdown"
    );
}

// ---------------------------------------------------------------------------
// Test: send_for_complaint() reaches admins, the reporter, and the assignee
// ---------------------------------------------------------------------------

#[tokio::test]
async fn feed_routing_reaches_interested_parties() {
    let manager = WsManager::new();

    let mut rx_admin = add_conn(&manager, "conn-admin", 10, "boss@gov.in", "admin").await;
    let mut rx_reporter = add_conn(&manager, "conn-rep", 20, "citizen@example.com", "citizen").await;
    let mut rx_assignee = add_conn(&manager, "conn-emp", 30, "worker@gov.in", "employee").await;
    let mut rx_other = add_conn(&manager, "conn-other", 40, "other@example.com", "citizen").await;

    let payload = Message::Text("complaint update".into());
    let delivered = manager
        .send_for_complaint(20, Some("worker@gov.in"), payload)
        .await;
    assert_eq!(delivered, 3);

    let msg = rx_admin.recv().await.expect("admin should receive");
    assert!(matches!(&msg, Message::Text(t) if *t == "complaint update"));
    let msg = rx_reporter.recv().await.expect("reporter should receive");
    assert!(matches!(&msg, Message::Text(t) if *t == "complaint update"));
    let msg = rx_assignee.recv().await.expect("assignee should receive");
    assert!(matches!(&msg, Message::Text(t) if *t == "complaint update"));

    // The unrelated citizen must not receive anything.
    assert!(
        rx_other.try_recv().is_err(),
        "unrelated citizen must not receive the event"
    );
}

// ---------------------------------------------------------------------------
// Test: send_for_complaint() with no assignee skips employees
// ---------------------------------------------------------------------------

#[tokio::test]
async fn feed_routing_without_assignee_skips_employees() {
    let manager = WsManager::new();

    let mut rx_reporter = add_conn(&manager, "conn-rep", 20, "citizen@example.com", "citizen").await;
    let mut rx_employee = add_conn(&manager, "conn-emp", 30, "worker@gov.in", "employee").await;

    let delivered = manager
        .send_for_complaint(20, None, Message::Text("new complaint".into()))
        .await;
    assert_eq!(delivered, 1);

    let msg = rx_reporter.recv().await.expect("reporter should receive");
    assert!(matches!(&msg, Message::Text(t) if *t == "new complaint"));
    assert!(
        rx_employee.try_recv().is_err(),
        "unassigned employee must not receive the event"
    );
}

// ---------------------------------------------------------------------------
// Test: send_to_profile() hits every connection of that profile only
// ---------------------------------------------------------------------------

#[tokio::test]
async fn send_to_profile_targets_all_sessions_of_one_profile() {
    let manager = WsManager::new();

    // Same profile connected twice (e.g. phone + laptop).
    let mut rx_a = add_conn(&manager, "conn-a", 7, "citizen@example.com", "citizen").await;
    let mut rx_b = add_conn(&manager, "conn-b", 7, "citizen@example.com", "citizen").await;
    let mut rx_other = add_conn(&manager, "conn-c", 8, "other@example.com", "citizen").await;

    let delivered = manager
        .send_to_profile(7, Message::Text("just for you".into()))
        .await;
    assert_eq!(delivered, 2);

    assert!(rx_a.recv().await.is_some());
    assert!(rx_b.recv().await.is_some());
    assert!(rx_other.try_recv().is_err());
}

// ---------------------------------------------------------------------------
// Test: routing skips closed channels without panicking
// ---------------------------------------------------------------------------

#[tokio::test]
async fn routing_skips_closed_channels() {
    let manager = WsManager::new();

    let rx1 = add_conn(&manager, "conn-1", 10, "a@gov.in", "admin").await;
    let mut rx2 = add_conn(&manager, "conn-2", 11, "b@gov.in", "admin").await;

    // Drop rx1 to close its channel.
    drop(rx1);

    // Routing should not panic even though conn-1's channel is closed.
    manager
        .send_for_complaint(99, None, Message::Text("still alive".into()))
        .await;

    // conn-2 (admin) should still receive the message.
    let msg = rx2.recv().await.expect("rx2 should receive");
    assert!(matches!(&msg, Message::Text(t) if *t == "still alive"));
}

// ---------------------------------------------------------------------------
// Test: adding with duplicate ID replaces the previous connection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn duplicate_id_replaces_previous_connection() {
    let manager = WsManager::new();

    let _rx_old = add_conn(&manager, "conn-1", 10, "a@gov.in", "admin").await;
    assert_eq!(manager.connection_count().await, 1);

    // Re-add with the same ID -- should replace, not duplicate.
    let mut rx_new = add_conn(&manager, "conn-1", 10, "a@gov.in", "admin").await;
    assert_eq!(manager.connection_count().await, 1);

    // Route to verify the new receiver gets the message.
    manager
        .send_for_complaint(1, None, Message::Text("replaced".into()))
        .await;
    let msg = rx_new.recv().await.expect("New rx should receive message");
    assert!(matches!(&msg, Message::Text(t) if *t == "replaced"));
}
