//! Event-to-socket notification fanout.
//!
//! [`NotificationFanout`] subscribes to the event bus and pushes each
//! stored notification to the WebSocket connections of the users its
//! audience reaches. Delivery is best-effort: the notification row is
//! already durable, and users without an open socket pick it up from
//! the listing endpoints.

use std::sync::Arc;

use axum::extract::ws::Message;
use tokio::sync::broadcast;

use atelier_core::types::DbId;
use atelier_db::models::notification::{AUDIENCE_ROLE, AUDIENCE_USER};
use atelier_db::repositories::NotificationRepo;
use atelier_db::DbPool;
use atelier_events::{Audience, NotificationEvent};

use crate::ws::WsManager;

/// Pushes stored notifications to connected WebSocket clients.
pub struct NotificationFanout {
    pool: DbPool,
    ws_manager: Arc<WsManager>,
}

impl NotificationFanout {
    /// Create a new fanout with the given database pool and WebSocket manager.
    pub fn new(pool: DbPool, ws_manager: Arc<WsManager>) -> Self {
        Self { pool, ws_manager }
    }

    /// Run the main fanout loop.
    ///
    /// Subscribes to the event bus via `receiver` and processes each event.
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](atelier_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<NotificationEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = self.push(&event).await {
                        tracing::error!(
                            error = %e,
                            notification_id = event.notification_id,
                            "Failed to push notification"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification fanout lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification fanout shutting down");
                    break;
                }
            }
        }
    }

    /// Deliver one event to every socket its audience reaches.
    async fn push(&self, event: &NotificationEvent) -> Result<(), sqlx::Error> {
        let message = frame(event);

        let delivered = match event.audience {
            // Every open socket belongs to a registered user, so a global
            // notification needs no target lookup.
            Audience::Global => {
                let count = self.ws_manager.connection_count().await;
                self.ws_manager.broadcast(message).await;
                count
            }
            Audience::Role(role_id) => {
                let targets = NotificationRepo::target_user_ids(
                    &self.pool,
                    AUDIENCE_ROLE,
                    Some(role_id),
                    None,
                )
                .await?;
                self.send_to_all(&targets, message).await
            }
            Audience::User(user_id) => {
                let targets = NotificationRepo::target_user_ids(
                    &self.pool,
                    AUDIENCE_USER,
                    None,
                    Some(user_id),
                )
                .await?;
                self.send_to_all(&targets, message).await
            }
        };

        tracing::debug!(
            notification_id = event.notification_id,
            delivered,
            "Pushed notification to open sockets"
        );
        Ok(())
    }

    /// Send one message to every listed user; returns sockets reached.
    async fn send_to_all(&self, targets: &[DbId], message: Message) -> usize {
        let mut count = 0;
        for &user_id in targets {
            count += self.ws_manager.send_to_user(user_id, message.clone()).await;
        }
        count
    }
}

/// Build the JSON text frame pushed for a notification.
fn frame(event: &NotificationEvent) -> Message {
    let body = serde_json::json!({
        "type": "notification",
        "id": event.notification_id,
        "message": event.message,
        "image_path": event.image_path,
        "audience": event.audience,
        "created_at": event.created_at,
    });
    Message::Text(body.to_string().into())
}
