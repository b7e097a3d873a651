//! Integration tests for the PostgreSQL registry.
//!
//! These need a live database; point `DATABASE_URL` at a scratch instance
//! and run with `cargo test -- --ignored`.

use rollcall_core::{DashboardRegistry, NewDashboard, NewFeatAssociation};
use rollcall_database::{establish_pool, run_migrations, PostgresRegistry};

fn registry() -> PostgresRegistry {
    let _ = dotenvy::dotenv();
    let pool = establish_pool().expect("DATABASE_URL must point at a test database");
    run_migrations(&pool).expect("migrations apply");
    PostgresRegistry::new(pool)
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_dashboard_roundtrip() {
    let registry = registry();
    let message_id = 990_001;

    registry
        .insert(NewDashboard {
            message_id,
            role_id: 7,
            channel_id: 42,
            guild_id: 1000,
        })
        .await
        .expect("insert");

    let rows = registry.list_all().await.expect("list");
    assert!(rows.iter().any(|row| row.message_id == message_id));

    registry.delete(message_id).await.expect("delete");
    let rows = registry.list_all().await.expect("list");
    assert!(!rows.iter().any(|row| row.message_id == message_id));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_duplicate_message_id_rejected() {
    let registry = registry();
    let message_id = 990_002;

    let row = NewDashboard {
        message_id,
        role_id: 7,
        channel_id: 42,
        guild_id: 1000,
    };
    registry.insert(row.clone()).await.expect("insert");
    assert!(registry.insert(row).await.is_err());

    registry.delete(message_id).await.expect("cleanup");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_feats_keep_insertion_order() {
    let registry = registry();
    let role_id = 990_100;

    for description in ["first", "second"] {
        registry
            .insert_feat(NewFeatAssociation {
                role_id,
                feat_role_id: 8,
                feat_description: description.to_string(),
            })
            .await
            .expect("insert feat");
    }

    let feats = registry.list_feats(role_id).await.expect("list feats");
    let descriptions: Vec<&str> = feats.iter().map(|f| f.feat_description.as_str()).collect();
    assert_eq!(descriptions, vec!["first", "second"]);

    registry.delete_feat(role_id, 8).await.expect("cleanup");
    assert!(registry.list_feats(role_id).await.expect("list").is_empty());
}
