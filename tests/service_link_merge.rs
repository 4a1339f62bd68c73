#![cfg(feature = "postgres-tests")]

use std::sync::Arc;

use refero::application::services::{CreateLink, LinkService};
use refero::domain::entities::NewCategory;
use refero::domain::repositories::{CategoryRepository, LinkRepository, MembershipRepository};
use refero::domain::unit_of_work::Database;
use refero::infrastructure::persistence::PgDatabase;
use refero::utils::short_code::Sha256CodeGenerator;
use sqlx::PgPool;

fn create_input(category_ids: Vec<uuid::Uuid>) -> CreateLink {
    CreateLink {
        url: "https://example.com".to_string(),
        title: "Example".to_string(),
        description: "An example website".to_string(),
        category_ids,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_concurrent_resubmits_with_same_category(pool: PgPool) {
    let db = PgDatabase::new(pool);
    let svc = Arc::new(LinkService::new(db.clone(), Arc::new(Sha256CodeGenerator)));
    let created = svc.create(create_input(vec![])).await.unwrap();

    let category_id = db
        .connection()
        .await
        .unwrap()
        .insert_category(NewCategory {
            name: "Alpha".to_string(),
            description: None,
            parent_id: None,
        })
        .await
        .unwrap()
        .id;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let svc = svc.clone();
            tokio::spawn(async move { svc.create(create_input(vec![category_id])).await })
        })
        .collect();

    for handle in handles {
        let details = handle.await.unwrap().unwrap();
        assert_eq!(details.link.id, created.link.id);
        assert_eq!(details.category_ids, vec![category_id]);
    }

    let mut conn = db.connection().await.unwrap();
    assert_eq!(conn.count_links().await.unwrap(), 1);
    assert_eq!(conn.count_memberships().await.unwrap(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_concurrent_first_creates_store_one_link(pool: PgPool) {
    let db = PgDatabase::new(pool);
    let svc = Arc::new(LinkService::new(db.clone(), Arc::new(Sha256CodeGenerator)));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let svc = svc.clone();
            tokio::spawn(async move { svc.create(create_input(vec![])).await })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap().link.id);
    }
    ids.dedup();

    assert_eq!(ids.len(), 1);
    let mut conn = db.connection().await.unwrap();
    assert_eq!(conn.count_links().await.unwrap(), 1);
}
