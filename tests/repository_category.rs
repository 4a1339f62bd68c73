#![cfg(feature = "postgres-tests")]

use refero::domain::entities::{CategoryPatch, NewCategory};
use refero::domain::repositories::{CATEGORY_NAME_CONSTRAINT, CategoryRepository};
use refero::domain::unit_of_work::Database;
use refero::error::AppError;
use refero::infrastructure::persistence::PgDatabase;
use sqlx::PgPool;
use uuid::Uuid;

fn new_category(name: &str, parent_id: Option<Uuid>) -> NewCategory {
    NewCategory {
        name: name.to_string(),
        description: Some("Category stored by the gateway tests".to_string()),
        parent_id,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_insert_and_lookup(pool: PgPool) {
    let db = PgDatabase::new(pool);
    let mut conn = db.connection().await.unwrap();

    let rust = conn.insert_category(new_category("Rust", None)).await.unwrap();

    assert!(rust.is_root());
    assert!(conn.category_exists_by_id(rust.id).await.unwrap());
    assert!(conn.category_exists_by_name("Rust").await.unwrap());
    assert!(!conn.category_exists_by_name("rust").await.unwrap());
    assert_eq!(
        conn.find_category_by_name("Rust").await.unwrap().unwrap().id,
        rust.id
    );

    let err = conn
        .insert_category(new_category("Rust", None))
        .await
        .unwrap_err();
    assert!(err.is_conflict_on(CATEGORY_NAME_CONSTRAINT));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_missing_parent_is_validation_error(pool: PgPool) {
    let db = PgDatabase::new(pool);
    let mut conn = db.connection().await.unwrap();

    let err = conn
        .insert_category(new_category("Tokio", Some(Uuid::new_v4())))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation { .. }));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_hierarchy_queries(pool: PgPool) {
    let db = PgDatabase::new(pool);
    let mut conn = db.connection().await.unwrap();
    let rust = conn.insert_category(new_category("Rust", None)).await.unwrap();
    conn.insert_category(new_category("Golang", None)).await.unwrap();
    conn.insert_category(new_category("Tokio", Some(rust.id)))
        .await
        .unwrap();

    let roots: Vec<_> = conn
        .list_root_categories()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(roots, vec!["Golang", "Rust"]);

    let children = conn.list_child_categories(rust.id).await.unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].name, "Tokio");

    assert_eq!(conn.list_categories().await.unwrap().len(), 3);
    assert_eq!(conn.count_categories().await.unwrap(), 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_partial_update(pool: PgPool) {
    let db = PgDatabase::new(pool);
    let mut conn = db.connection().await.unwrap();
    let parent = conn
        .insert_category(new_category("Languages", None))
        .await
        .unwrap();
    let rust = conn.insert_category(new_category("Rust", None)).await.unwrap();

    let moved = conn
        .update_category(
            rust.id,
            CategoryPatch {
                parent_id: Some(Some(parent.id)),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(moved.parent_id, Some(parent.id));
    assert_eq!(moved.name, "Rust");
    assert_eq!(moved.description, rust.description);

    let cleared = conn
        .update_category(
            rust.id,
            CategoryPatch {
                name: Some("Rust Lang".to_string()),
                description: Some(None),
                parent_id: Some(None),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cleared.name, "Rust Lang");
    assert!(cleared.description.is_none());
    assert!(cleared.is_root());

    assert!(
        conn.update_category(Uuid::new_v4(), CategoryPatch::default())
            .await
            .unwrap()
            .is_none()
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_sets_children_to_root(pool: PgPool) {
    let db = PgDatabase::new(pool);
    let mut conn = db.connection().await.unwrap();
    let rust = conn.insert_category(new_category("Rust", None)).await.unwrap();
    let tokio_category = conn
        .insert_category(new_category("Tokio", Some(rust.id)))
        .await
        .unwrap();

    assert!(conn.delete_category(rust.id).await.unwrap());
    assert!(!conn.delete_category(rust.id).await.unwrap());

    let orphan = conn
        .find_category_by_id(tokio_category.id)
        .await
        .unwrap()
        .unwrap();
    assert!(orphan.is_root());
}
