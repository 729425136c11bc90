//! HTTP-level integration tests for the notification feed: admin send,
//! per-user visibility, read receipts, and dismissal.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Send a global notification as the given admin and return its id.
async fn send_global(pool: &PgPool, admin_token: &str, message: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "audience": "global", "message": message });
    let response = post_json_auth(app, "/api/v1/notifications", body, admin_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// The caller's unread notification count.
async fn unread_count(pool: &PgPool, token: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/notifications/unread-count", token).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"]["count"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Sending
// ---------------------------------------------------------------------------

/// Only admins may send notifications.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_send_requires_admin(pool: PgPool) {
    let (_user, token) = common::register_and_sign_in(&pool, "civilian@team.test").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "audience": "global", "message": "not allowed" });
    let response = post_json_auth(app, "/api/v1/notifications", body, &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// A role audience without `role_id` is a 400.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_role_audience_requires_role_id(pool: PgPool) {
    let (_admin, admin_token) = common::register_admin(&pool, "sender@team.test").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "audience": "role", "message": "to whom?" });
    let response = post_json_auth(app, "/api/v1/notifications", body, &admin_token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "A role audience requires role_id");
}

// ---------------------------------------------------------------------------
// Visibility
// ---------------------------------------------------------------------------

/// Global notifications reach every account.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_global_notification_visible_to_all(pool: PgPool) {
    let (_admin, admin_token) = common::register_admin(&pool, "announcer@team.test").await;
    let (_user, token) = common::register_and_sign_in(&pool, "reader@team.test").await;

    send_global(&pool, &admin_token, "All hands at noon").await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/notifications", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["message"], "All hands at noon");
    assert_eq!(items[0]["read"], false);

    assert_eq!(unread_count(&pool, &token).await, 1);
}

/// A user-audience notification is visible only to that user.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_user_notification_is_private(pool: PgPool) {
    let (_admin, admin_token) = common::register_admin(&pool, "whisperer@team.test").await;
    let (target_id, target_token) = common::register_and_sign_in(&pool, "target@team.test").await;
    let (_other, other_token) = common::register_and_sign_in(&pool, "bystander@team.test").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "audience": "user",
        "user_id": target_id,
        "message": "Just for you",
    });
    let response = post_json_auth(app, "/api/v1/notifications", body, &admin_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    assert_eq!(unread_count(&pool, &target_token).await, 1);
    assert_eq!(unread_count(&pool, &other_token).await, 0);
}

// ---------------------------------------------------------------------------
// Receipts
// ---------------------------------------------------------------------------

/// Marking a notification read drops it from the unread count and the
/// `unread_only` listing.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mark_read_updates_unread_state(pool: PgPool) {
    let (_admin, admin_token) = common::register_admin(&pool, "sender@team.test").await;
    let (_user, token) = common::register_and_sign_in(&pool, "reader@team.test").await;
    let id = send_global(&pool, &admin_token, "Read me").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/notifications/{id}/read"),
        serde_json::json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(unread_count(&pool, &token).await, 0);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/notifications?unread_only=true", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

/// Read-all marks every visible unread notification at once.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_read_all_marks_everything(pool: PgPool) {
    let (_admin, admin_token) = common::register_admin(&pool, "sender@team.test").await;
    let (_user, token) = common::register_and_sign_in(&pool, "reader@team.test").await;
    send_global(&pool, &admin_token, "First").await;
    send_global(&pool, &admin_token, "Second").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/notifications/read-all",
        serde_json::json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["marked"], 2);

    assert_eq!(unread_count(&pool, &token).await, 0);
}

/// Dismissal hides a notification for the caller without touching other
/// recipients.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dismiss_hides_for_caller_only(pool: PgPool) {
    let (_admin, admin_token) = common::register_admin(&pool, "sender@team.test").await;
    let (_user, token) = common::register_and_sign_in(&pool, "dismisser@team.test").await;
    let (_other, other_token) = common::register_and_sign_in(&pool, "keeper@team.test").await;
    let id = send_global(&pool, &admin_token, "Ephemeral").await;

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/notifications/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/notifications", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);

    // The other recipient still sees it.
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/notifications", &other_token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

/// Acting on a notification outside the caller's audience is a 404.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mark_read_outside_audience_is_404(pool: PgPool) {
    let (admin_id, admin_token) = common::register_admin(&pool, "sender@team.test").await;
    let (_user, token) = common::register_and_sign_in(&pool, "outsider@team.test").await;

    // A notification addressed to the admin personally.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "audience": "user",
        "user_id": admin_id,
        "message": "Admin-only note",
    });
    let response = post_json_auth(app, "/api/v1/notifications", body, &admin_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/notifications/{id}/read"),
        serde_json::json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
