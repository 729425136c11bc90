//! HTTP-level integration tests for the client, member, and project
//! resources, including image uploads.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get_auth, post_json_auth, post_multipart_auth, put_json_auth,
};
use http_body_util::BodyExt;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create a client via the API and return its id.
async fn create_client(pool: &PgPool, token: &str, name: &str, email: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "name": name, "email": email });
    let response = post_json_auth(app, "/api/v1/clients", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a member via the API and return its id.
async fn create_member(pool: &PgPool, token: &str, first: &str, email: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "first_name": first,
        "last_name": "Crew",
        "email": email,
    });
    let response = post_json_auth(app, "/api/v1/members", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a status via the API and return its id.
async fn create_status(pool: &PgPool, token: &str, name: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "name": name });
    let response = post_json_auth(app, "/api/v1/statuses", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Clients
// ---------------------------------------------------------------------------

/// Full client CRUD through the HTTP surface.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_client_crud(pool: PgPool) {
    let (_user, token) = common::register_and_sign_in(&pool, "crud@team.test").await;

    let client_id = create_client(&pool, &token, "Acme Corp", "hello@acme.test").await;

    // Read it back.
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &format!("/api/v1/clients/{client_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Acme Corp");
    // Clients without an upload get the placeholder image.
    assert!(json["data"]["image_path"].as_str().is_some());

    // Update.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "name": "Acme Corporation", "email": "hello@acme.test" });
    let response = put_json_auth(app, &format!("/api/v1/clients/{client_id}"), body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Acme Corporation");

    // List contains it.
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/clients", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().len() >= 1);

    // Delete, then 404 on re-read.
    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/clients/{client_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/clients/{client_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Duplicate client names map to 409.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_client_name_conflicts(pool: PgPool) {
    let (_user, token) = common::register_and_sign_in(&pool, "dupclient@team.test").await;
    create_client(&pool, &token, "Acme Corp", "first@acme.test").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "name": "Acme Corp", "email": "second@acme.test" });
    let response = post_json_auth(app, "/api/v1/clients", body, &token).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

/// Reading a missing client returns a 404 envelope.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_client_returns_404(pool: PgPool) {
    let (_user, token) = common::register_and_sign_in(&pool, "missing@team.test").await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/clients/999999", &token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Members
// ---------------------------------------------------------------------------

/// The `?search=` filter narrows the member list by name or email.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_member_search_filters_list(pool: PgPool) {
    let (_user, token) = common::register_and_sign_in(&pool, "searcher@team.test").await;
    create_member(&pool, &token, "Frida", "frida@crew.test").await;
    create_member(&pool, &token, "Pablo", "pablo@crew.test").await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/members?search=frida", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let members = json["data"].as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["first_name"], "Frida");

    // A term that matches nothing yields an empty list, not an error.
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/members?search=zzz-no-such", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

/// Deleting a member requires the admin role.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_member_delete_is_admin_only(pool: PgPool) {
    let (_user, token) = common::register_and_sign_in(&pool, "plain@team.test").await;
    let member_id = create_member(&pool, &token, "Target", "target@crew.test").await;

    // A signed-in non-admin is forbidden.
    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/members/{member_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // An admin may delete.
    let (_admin, admin_token) = common::register_admin(&pool, "boss@team.test").await;
    let app = common::build_test_app(pool);
    let response = delete_auth(app, &format!("/api/v1/members/{member_id}"), &admin_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// Creating a project resolves its client, status, and assigned members.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_create_resolves_lookups(pool: PgPool) {
    let (_user, token) = common::register_and_sign_in(&pool, "producer@team.test").await;
    let client_id = create_client(&pool, &token, "Studio", "studio@acme.test").await;
    let status_id = create_status(&pool, &token, "In Progress").await;
    let m1 = create_member(&pool, &token, "One", "one@crew.test").await;
    let m2 = create_member(&pool, &token, "Two", "two@crew.test").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "name": "Launch Site",
        "start_date": "2026-01-15",
        "client_id": client_id,
        "status_id": status_id,
        // Unknown member ids are dropped, not errors.
        "member_ids": [m1, m2, 999999],
    });
    let response = post_json_auth(app, "/api/v1/projects", body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Launch Site");
    assert_eq!(json["data"]["client"]["name"], "Studio");
    assert_eq!(json["data"]["status_name"], "In Progress");
    let members = json["data"]["members"].as_array().unwrap();
    assert_eq!(members.len(), 2);
}

/// Updating a project replaces the member assignment wholesale.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_update_replaces_members(pool: PgPool) {
    let (_user, token) = common::register_and_sign_in(&pool, "replacer@team.test").await;
    let client_id = create_client(&pool, &token, "Studio", "studio@acme.test").await;
    let status_id = create_status(&pool, &token, "Planned").await;
    let m1 = create_member(&pool, &token, "Old", "old@crew.test").await;
    let m2 = create_member(&pool, &token, "New", "new@crew.test").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "name": "Rework",
        "start_date": "2026-02-01",
        "client_id": client_id,
        "status_id": status_id,
        "member_ids": [m1],
    });
    let response = post_json_auth(app, "/api/v1/projects", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let project_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "name": "Rework",
        "start_date": "2026-02-01",
        "client_id": client_id,
        "status_id": status_id,
        "member_ids": [m2],
    });
    let response = put_json_auth(app, &format!("/api/v1/projects/{project_id}"), body, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let members = json["data"]["members"].as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["id"].as_i64().unwrap(), m2);
}

/// The `?status=` filter matches by status name.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_list_filters_by_status(pool: PgPool) {
    let (_user, token) = common::register_and_sign_in(&pool, "filterer@team.test").await;
    let client_id = create_client(&pool, &token, "Studio", "studio@acme.test").await;
    let active = create_status(&pool, &token, "Active").await;
    let done = create_status(&pool, &token, "Done").await;

    for (name, status_id) in [("A", active), ("B", done)] {
        let app = common::build_test_app(pool.clone());
        let body = serde_json::json!({
            "name": name,
            "start_date": "2026-03-01",
            "client_id": client_id,
            "status_id": status_id,
        });
        let response = post_json_auth(app, "/api/v1/projects", body, &token).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/projects?status=Active", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let projects = json["data"].as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["name"], "A");
}

// ---------------------------------------------------------------------------
// Image uploads
// ---------------------------------------------------------------------------

/// A multipart upload stores the file, points the client at it, and the
/// router serves the stored bytes back under `/uploads`.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_client_image_upload(pool: PgPool) {
    let (_user, token) = common::register_and_sign_in(&pool, "uploader@team.test").await;
    let client_id = create_client(&pool, &token, "Pics Inc", "pics@acme.test").await;

    let upload_dir = tempfile::tempdir().expect("tempdir");
    let app = common::build_test_app_with_upload_dir(pool.clone(), upload_dir.path());
    let response = post_multipart_auth(
        app,
        &format!("/api/v1/clients/{client_id}/image"),
        "logo.png",
        b"fake png bytes",
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let image_path = json["data"]["image_path"].as_str().unwrap().to_string();
    assert!(image_path.starts_with("/uploads/clients/"));
    assert!(image_path.ends_with(".png"));

    // The bytes landed below the configured root.
    let on_disk = upload_dir
        .path()
        .join(image_path.trim_start_matches("/uploads/"));
    let contents = std::fs::read(on_disk).expect("uploaded file should exist");
    assert_eq!(contents, b"fake png bytes");

    // And the URL the API handed out resolves through the router.
    let app = common::build_test_app_with_upload_dir(pool, upload_dir.path());
    let response = common::get(app, &image_path).await;
    assert_eq!(response.status(), StatusCode::OK);
    let served = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    assert_eq!(served.as_ref(), b"fake png bytes");
}

/// Uploads with a disallowed extension are rejected with 400.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_rejects_unknown_extension(pool: PgPool) {
    let (_user, token) = common::register_and_sign_in(&pool, "exeuploader@team.test").await;
    let client_id = create_client(&pool, &token, "Evil Inc", "evil@acme.test").await;

    let upload_dir = tempfile::tempdir().expect("tempdir");
    let app = common::build_test_app_with_upload_dir(pool, upload_dir.path());
    let response = post_multipart_auth(
        app,
        &format!("/api/v1/clients/{client_id}/image"),
        "payload.exe",
        b"MZ...",
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
