//! Integration tests for project-specific queries:
//! - Filter by creation time and by status name
//! - Member assignment replace semantics

use chrono::{Duration, NaiveDate, Utc};
use sqlx::PgPool;

use atelier_db::models::client::CreateClient;
use atelier_db::models::member::CreateMember;
use atelier_db::models::project::CreateProject;
use atelier_db::repositories::{ClientRepo, MemberRepo, ProjectRepo};
use atelier_db::UnitOfWork;

async fn seed_client(pool: &PgPool) -> i64 {
    ClientRepo::create(
        pool,
        &CreateClient {
            name: "Acme".to_string(),
            email: "a@acme.test".to_string(),
            location: None,
            phone: None,
            image_path: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn new_project(name: &str, client_id: i64, status_id: i64) -> CreateProject {
    CreateProject {
        name: name.to_string(),
        description: None,
        start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        end_date: None,
        budget: None,
        client_id,
        status_id,
        member_ids: Vec::new(),
        image_path: None,
    }
}

async fn seed_member(pool: &PgPool, first: &str, email: &str) -> i64 {
    MemberRepo::create(
        pool,
        &CreateMember {
            first_name: first.to_string(),
            last_name: "Tester".to_string(),
            email: email.to_string(),
            phone: None,
            date_of_birth: None,
            role_id: None,
            address_id: None,
            image_path: None,
        },
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_created_after_filters_by_cutoff(pool: PgPool) {
    let client_id = seed_client(&pool).await;
    ProjectRepo::create(&pool, &new_project("Website", client_id, 1))
        .await
        .unwrap();

    let recent = ProjectRepo::created_after(&pool, Utc::now() - Duration::hours(1))
        .await
        .unwrap();
    assert_eq!(recent.len(), 1);

    let future = ProjectRepo::created_after(&pool, Utc::now() + Duration::hours(1))
        .await
        .unwrap();
    assert!(future.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_by_status_name_joins_lookup(pool: PgPool) {
    let client_id = seed_client(&pool).await;
    ProjectRepo::create(&pool, &new_project("Website", client_id, 2))
        .await
        .unwrap();
    ProjectRepo::create(&pool, &new_project("App", client_id, 1))
        .await
        .unwrap();

    let in_progress = ProjectRepo::list_by_status_name(&pool, "In Progress")
        .await
        .unwrap();
    assert_eq!(in_progress.len(), 1);
    assert_eq!(in_progress[0].name, "Website");

    let none = ProjectRepo::list_by_status_name(&pool, "No Such Status")
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_members_replaces_wholesale_and_skips_unknown(pool: PgPool) {
    let client_id = seed_client(&pool).await;
    let project = ProjectRepo::create(&pool, &new_project("Website", client_id, 1))
        .await
        .unwrap();
    let ada = seed_member(&pool, "Ada", "ada@team.test").await;
    let grace = seed_member(&pool, "Grace", "grace@team.test").await;

    let mut uow = UnitOfWork::new(pool.clone());
    ProjectRepo::set_members(uow.tx().await.unwrap(), project.id, &[ada, grace, 99_999])
        .await
        .unwrap();
    uow.commit().await.unwrap();

    let assigned = ProjectRepo::assigned_members(&pool, &[project.id])
        .await
        .unwrap();
    let ids: Vec<i64> = assigned.iter().map(|m| m.member_id).collect();
    assert_eq!(ids.len(), 2, "unknown id must be dropped silently");
    assert!(ids.contains(&ada) && ids.contains(&grace));

    // Replace with a smaller set: previous assignments are cleared.
    let mut uow = UnitOfWork::new(pool.clone());
    ProjectRepo::set_members(uow.tx().await.unwrap(), project.id, &[grace])
        .await
        .unwrap();
    uow.commit().await.unwrap();

    let assigned = ProjectRepo::assigned_members(&pool, &[project.id])
        .await
        .unwrap();
    assert_eq!(assigned.len(), 1);
    assert_eq!(assigned[0].member_id, grace);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_member_removes_assignment(pool: PgPool) {
    let client_id = seed_client(&pool).await;
    let project = ProjectRepo::create(&pool, &new_project("Website", client_id, 1))
        .await
        .unwrap();
    let ada = seed_member(&pool, "Ada", "ada@team.test").await;

    let mut uow = UnitOfWork::new(pool.clone());
    ProjectRepo::set_members(uow.tx().await.unwrap(), project.id, &[ada])
        .await
        .unwrap();
    uow.commit().await.unwrap();

    MemberRepo::delete(&pool, ada).await.unwrap();

    let assigned = ProjectRepo::assigned_members(&pool, &[project.id])
        .await
        .unwrap();
    assert!(assigned.is_empty());
}
