mod common;

use smollink::domain::repositories::CreatorRepository;
use smollink::infrastructure::persistence::PgCreatorRepository;
use sqlx::PgPool;
use std::sync::Arc;

#[sqlx::test]
#[ignore = "requires PostgreSQL (set DATABASE_URL)"]
async fn test_find_or_create_is_idempotent(pool: PgPool) {
    let repo = PgCreatorRepository::new(Arc::new(pool.clone()));

    let first = repo.find_or_create("203.0.113.9").await.unwrap();
    let second = repo.find_or_create("203.0.113.9").await.unwrap();

    assert_eq!(first.id, second.id);
    assert!(!first.disabled);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM creators")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (set DATABASE_URL)"]
async fn test_concurrent_find_or_create_yields_one_record(pool: PgPool) {
    let repo = Arc::new(PgCreatorRepository::new(Arc::new(pool.clone())));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.find_or_create("198.51.100.4").await })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap().id);
    }
    ids.dedup();

    assert_eq!(ids.len(), 1);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (set DATABASE_URL)"]
async fn test_find_by_ip(pool: PgPool) {
    let repo = PgCreatorRepository::new(Arc::new(pool));

    assert!(repo.find_by_ip("203.0.113.9").await.unwrap().is_none());

    repo.find_or_create("203.0.113.9").await.unwrap();
    assert!(repo.find_by_ip("203.0.113.9").await.unwrap().is_some());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (set DATABASE_URL)"]
async fn test_set_disabled_and_reenable(pool: PgPool) {
    let repo = PgCreatorRepository::new(Arc::new(pool));

    let banned = repo
        .set_disabled("203.0.113.9", true, Some("spam".to_string()))
        .await
        .unwrap();
    assert!(banned.disabled);
    assert_eq!(banned.disabled_reason.as_deref(), Some("spam"));

    let unbanned = repo.set_disabled("203.0.113.9", false, None).await.unwrap();
    assert_eq!(unbanned.id, banned.id);
    assert!(!unbanned.disabled);
    assert!(unbanned.disabled_reason.is_none());
}
