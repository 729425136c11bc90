//! Notification delivery through the service layer:
//! - Audience validation on send
//! - Event publication to the bus after the commit
//! - Per-recipient listing, receipts, and role resolution via the
//!   user's linked member

use sqlx::PgPool;

use atelier_db::models::member::CreateMember;
use atelier_db::models::notification::CreateNotification;
use atelier_db::repositories::{MemberRepo, NotificationRepo, UserRepo};
use atelier_events::{Audience, EventBus};
use atelier_service::services::NotificationService;

fn notify(audience: &str, role_id: Option<i64>, user_id: Option<i64>) -> CreateNotification {
    CreateNotification {
        message: "Deploy at noon".to_string(),
        image_path: None,
        audience: audience.to_string(),
        role_id,
        user_id,
    }
}

async fn seed_user(pool: &PgPool, email: &str) -> i64 {
    UserRepo::create(pool, email, "Ada", "Lovelace", "irrelevant-hash")
        .await
        .unwrap()
        .id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn send_validates_the_audience(pool: PgPool) {
    let bus = EventBus::default();

    let no_role = NotificationService::send(&pool, &bus, notify("role", None, None)).await;
    assert_eq!(no_role.status_code, 400);
    let bad_role = NotificationService::send(&pool, &bus, notify("role", Some(999), None)).await;
    assert_eq!(bad_role.status_code, 400);
    let no_user = NotificationService::send(&pool, &bus, notify("user", None, None)).await;
    assert_eq!(no_user.status_code, 400);
    let unknown = NotificationService::send(&pool, &bus, notify("broadcast", None, None)).await;
    assert_eq!(unknown.status_code, 400);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn send_publishes_after_commit(pool: PgPool) {
    let bus = EventBus::default();
    let mut events = bus.subscribe();

    let view = NotificationService::send(&pool, &bus, notify("global", None, None))
        .await
        .result
        .unwrap();

    let event = events.recv().await.unwrap();
    assert_eq!(event.notification_id, view.id);
    assert_eq!(event.audience, Audience::Global);
    assert_eq!(event.message, "Deploy at noon");
    // The event carries a servable image path.
    assert_eq!(event.image_path, "/img/placeholders/notification.png");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn global_audience_scrubs_target_ids(pool: PgPool) {
    let bus = EventBus::default();
    let user = seed_user(&pool, "ada@team.test").await;

    let view = NotificationService::send(&pool, &bus, notify("global", Some(1), Some(user)))
        .await
        .result
        .unwrap();

    let stored = NotificationRepo::find_by_id(&pool, view.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.role_id, None);
    assert_eq!(stored.user_id, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn recipient_listing_and_receipts(pool: PgPool) {
    let bus = EventBus::default();
    let ada = seed_user(&pool, "ada@team.test").await;
    let bob = seed_user(&pool, "bob@team.test").await;

    let personal = NotificationService::send(&pool, &bus, notify("user", None, Some(ada)))
        .await
        .result
        .unwrap();
    let broadcast = NotificationService::send(&pool, &bus, notify("global", None, None))
        .await
        .result
        .unwrap();

    let for_ada = NotificationService::list_for(&pool, ada, false, None, None)
        .await
        .result
        .unwrap();
    assert_eq!(for_ada.len(), 2);
    let for_bob = NotificationService::list_for(&pool, bob, false, None, None)
        .await
        .result
        .unwrap();
    assert_eq!(for_bob.len(), 1);

    let count = NotificationService::unread_count(&pool, ada).await.result.unwrap();
    assert_eq!(count.count, 2);

    let marked = NotificationService::mark_read(&pool, ada, personal.id).await;
    assert_eq!(marked.status_code, 204);
    let unread = NotificationService::list_for(&pool, ada, true, None, None)
        .await
        .result
        .unwrap();
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0].id, broadcast.id);

    // Dismissing hides the row for Ada without touching Bob.
    let dismissed = NotificationService::dismiss(&pool, ada, broadcast.id).await;
    assert_eq!(dismissed.status_code, 204);
    let remaining = NotificationService::list_for(&pool, ada, false, None, None)
        .await
        .result
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, personal.id);
    assert_eq!(
        NotificationService::list_for(&pool, bob, false, None, None)
            .await
            .result
            .unwrap()
            .len(),
        1
    );

    // Invisible or missing rows read as 404.
    assert_eq!(
        NotificationService::mark_read(&pool, bob, personal.id)
            .await
            .status_code,
        404
    );
    assert_eq!(
        NotificationService::mark_read(&pool, ada, 9999)
            .await
            .status_code,
        404
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn role_audience_reaches_linked_members(pool: PgPool) {
    let bus = EventBus::default();
    let ada = seed_user(&pool, "ada@team.test").await;
    let mut member = MemberRepo::create(
        &pool,
        &CreateMember {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@team.test".to_string(),
            phone: None,
            date_of_birth: None,
            role_id: Some(3),
            address_id: None,
            image_path: None,
        },
    )
    .await
    .unwrap();
    member.user_id = Some(ada);
    MemberRepo::update(&pool, &member).await.unwrap();

    NotificationService::send(&pool, &bus, notify("role", Some(3), None)).await;

    let visible = NotificationService::list_for(&pool, ada, false, None, None)
        .await
        .result
        .unwrap();
    assert_eq!(visible.len(), 1);

    let outsider = seed_user(&pool, "bob@team.test").await;
    assert!(NotificationService::list_for(&pool, outsider, false, None, None)
        .await
        .result
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mark_all_read_reports_rows_touched(pool: PgPool) {
    let bus = EventBus::default();
    let ada = seed_user(&pool, "ada@team.test").await;

    for _ in 0..3 {
        NotificationService::send(&pool, &bus, notify("global", None, None)).await;
    }

    let first_pass = NotificationService::mark_all_read(&pool, ada).await.result.unwrap();
    assert_eq!(first_pass.marked, 3);
    let count = NotificationService::unread_count(&pool, ada).await.result.unwrap();
    assert_eq!(count.count, 0);

    let second_pass = NotificationService::mark_all_read(&pool, ada).await.result.unwrap();
    assert_eq!(second_pass.marked, 0);
}
