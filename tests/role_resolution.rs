//! 角色解析器测试

use std::sync::Arc;

use rust_quizroom::identity::{FixtureRoleResolver, RoleResolver, StoreRoleResolver};
use rust_quizroom::models::teachers::roles::RoleResolution;
use rust_quizroom::storage::{Storage, sea_orm_storage::SeaOrmStorage};

async fn memory_storage() -> Arc<dyn Storage> {
    Arc::new(
        SeaOrmStorage::connect("sqlite::memory:", 1, 5)
            .await
            .expect("in-memory database"),
    )
}

#[tokio::test]
async fn test_store_resolver_teacher_and_student() {
    let storage = memory_storage().await;
    let teacher = storage.ensure_teacher("teacher@school.edu").await.unwrap();
    let resolver = StoreRoleResolver::new(storage);

    match resolver.resolve("teacher@school.edu").await {
        RoleResolution::Teacher(found) => assert_eq!(found.id, teacher.id),
        other => panic!("expected teacher, got {other:?}"),
    }
    assert!(matches!(
        resolver.resolve("student@school.edu").await,
        RoleResolution::Student
    ));
}

#[tokio::test]
async fn test_fixture_resolver_falls_back_to_store() {
    let storage = memory_storage().await;
    storage.ensure_teacher("stored@school.edu").await.unwrap();
    let resolver = FixtureRoleResolver::new(
        vec!["Listed@School.edu".to_string()],
        StoreRoleResolver::new(storage),
    );

    assert!(matches!(
        resolver.resolve("listed@school.edu").await,
        RoleResolution::Teacher(_)
    ));
    assert!(matches!(
        resolver.resolve("stored@school.edu").await,
        RoleResolution::Teacher(_)
    ));
    assert!(matches!(
        resolver.resolve("nobody@school.edu").await,
        RoleResolution::Student
    ));
}

#[tokio::test]
async fn test_lookup_failure_respects_fail_open() {
    let failed = RoleResolution::LookupFailed("connection refused".into());
    assert!(failed.clone().into_role("s@school.edu", true).is_ok());
    assert!(failed.into_role("s@school.edu", false).is_err());
}
