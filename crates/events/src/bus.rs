//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`NotificationEvent`]s.
//! It is designed to be shared via `Arc<EventBus>` across the application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use atelier_core::types::DbId;

// ---------------------------------------------------------------------------
// NotificationEvent
// ---------------------------------------------------------------------------

/// Who a notification is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Audience {
    /// Every registered user.
    Global,
    /// Users whose linked member carries this role.
    Role(DbId),
    /// A single user.
    User(DbId),
}

impl Audience {
    /// The role id a `Role` audience targets.
    pub fn role_id(&self) -> Option<DbId> {
        match self {
            Audience::Role(id) => Some(*id),
            _ => None,
        }
    }

    /// The user id a `User` audience targets.
    pub fn user_id(&self) -> Option<DbId> {
        match self {
            Audience::User(id) => Some(*id),
            _ => None,
        }
    }
}

/// A notification that was just stored and should be pushed to the
/// users it reaches.
///
/// The event mirrors the persisted row; consumers resolve the audience
/// to concrete user ids themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationEvent {
    /// Database id of the stored notification.
    pub notification_id: DbId,

    /// Who the notification is addressed to.
    pub audience: Audience,

    /// Human-readable message body.
    pub message: String,

    /// Display image path, already normalized to a servable path.
    pub image_path: String,

    /// When the notification was created (UTC).
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Broadcast buffer size. A full buffer drops the oldest events rather than
/// blocking publishers, so a stalled socket can never back-pressure a write
/// path that has already committed its transaction.
const DEFAULT_CAPACITY: usize = 1024;

/// Pub/sub hub connecting the notification write path to its live consumers.
///
/// Services publish after commit and move on; each subscriber holds its own
/// [`broadcast::Receiver`] cursor and observes every event from the moment it
/// subscribed. A subscriber that falls more than [`DEFAULT_CAPACITY`] events
/// behind sees `RecvError::Lagged` and continues from the oldest retained
/// event.
///
/// ```rust
/// use atelier_events::bus::{Audience, EventBus, NotificationEvent};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(NotificationEvent {
///     notification_id: 1,
///     audience: Audience::Global,
///     message: "Release shipped".into(),
///     image_path: "/img/placeholders/notification.png".into(),
///     created_at: chrono::Utc::now(),
/// });
/// ```
pub struct EventBus {
    sender: broadcast::Sender<NotificationEvent>,
}

impl EventBus {
    /// Create a bus retaining at most `capacity` unconsumed events
    /// per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Hand an event to every current subscriber.
    ///
    /// With zero subscribers the event evaporates, which is fine: the
    /// notification row is already in the database, and sockets that connect
    /// later read it from there.
    pub fn publish(&self, event: NotificationEvent) {
        let _ = self.sender.send(event);
    }

    /// Open a receiver positioned at the next published event.
    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use tokio::sync::broadcast::error::{RecvError, TryRecvError};

    use super::*;

    fn event(audience: Audience) -> NotificationEvent {
        NotificationEvent {
            notification_id: 7,
            audience,
            message: "Sprint review moved to Friday".to_string(),
            image_path: "/img/placeholders/notification.png".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn subscriber_receives_the_published_event() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(event(Audience::Role(2)));

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.notification_id, 7);
        assert_eq!(received.audience, Audience::Role(2));
        assert_eq!(received.audience.role_id(), Some(2));
        assert_eq!(received.audience.user_id(), None);
        assert_eq!(received.message, "Sprint review moved to Friday");
    }

    #[tokio::test]
    async fn every_subscriber_sees_every_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(event(Audience::Global));

        let first = rx1.recv().await.expect("first receiver");
        let second = rx2.recv().await.expect("second receiver");
        assert_eq!(first.notification_id, second.notification_id);
        assert_eq!(first.audience, Audience::Global);
    }

    #[test]
    fn publishing_without_subscribers_is_a_no_op() {
        let bus = EventBus::default();
        bus.publish(event(Audience::User(1)));
    }

    #[tokio::test]
    async fn late_subscriber_starts_from_its_subscription_point() {
        let bus = EventBus::default();
        bus.publish(event(Audience::Global));

        let mut rx = bus.subscribe();
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));

        bus.publish(event(Audience::User(4)));
        let received = rx.recv().await.expect("event published after subscribing");
        assert_eq!(received.audience, Audience::User(4));
    }

    #[tokio::test]
    async fn slow_subscriber_lags_instead_of_blocking_the_publisher() {
        // Capacity 1: the second publish evicts the first while the
        // subscriber is not reading.
        let bus = EventBus::new(1);
        let mut rx = bus.subscribe();

        bus.publish(event(Audience::User(1)));
        bus.publish(event(Audience::User(2)));

        assert!(matches!(rx.recv().await, Err(RecvError::Lagged(1))));
        let survivor = rx.recv().await.expect("latest event is retained");
        assert_eq!(survivor.audience, Audience::User(2));
    }

    #[test]
    fn audience_serializes_with_kind_tag() {
        let global = serde_json::to_value(Audience::Global).unwrap();
        assert_eq!(global, serde_json::json!({"kind": "global"}));

        let role = serde_json::to_value(Audience::Role(3)).unwrap();
        assert_eq!(role, serde_json::json!({"kind": "role", "id": 3}));

        let user = serde_json::to_value(Audience::User(12)).unwrap();
        assert_eq!(user, serde_json::json!({"kind": "user", "id": 12}));
    }
}
