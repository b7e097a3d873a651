//! Tests for the in-memory registry implementation.

use rollcall_core::{DashboardRegistry, InMemoryRegistry, NewDashboard, NewFeatAssociation};

fn dashboard(message_id: i64) -> NewDashboard {
    NewDashboard {
        message_id,
        role_id: 7,
        channel_id: 42,
        guild_id: 1000,
    }
}

#[tokio::test]
async fn test_insert_and_list_roundtrip() {
    let registry = InMemoryRegistry::new();
    registry.insert(dashboard(1)).await.expect("insert");
    registry.insert(dashboard(2)).await.expect("insert");

    let rows = registry.list_all().await.expect("list");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].message_id, 1);
    assert_eq!(rows[1].message_id, 2);
}

#[tokio::test]
async fn test_duplicate_message_id_rejected() {
    let registry = InMemoryRegistry::new();
    registry.insert(dashboard(1)).await.expect("insert");
    assert!(registry.insert(dashboard(1)).await.is_err());
}

#[tokio::test]
async fn test_delete_removes_row() {
    let registry = InMemoryRegistry::new();
    registry.insert(dashboard(1)).await.expect("insert");
    registry.delete(1).await.expect("delete");
    assert!(registry.list_all().await.expect("list").is_empty());
}

#[tokio::test]
async fn test_delete_missing_row_is_ok() {
    let registry = InMemoryRegistry::new();
    assert!(registry.delete(99).await.is_ok());
}

#[tokio::test]
async fn test_feats_keep_insertion_order() {
    let registry = InMemoryRegistry::new();
    for description in ["first", "second", "third"] {
        registry
            .insert_feat(NewFeatAssociation {
                role_id: 7,
                feat_role_id: 8,
                feat_description: description.to_string(),
            })
            .await
            .expect("insert feat");
    }

    let feats = registry.list_feats(7).await.expect("list feats");
    let descriptions: Vec<&str> = feats.iter().map(|f| f.feat_description.as_str()).collect();
    assert_eq!(descriptions, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_list_feats_filters_by_role() {
    let registry = InMemoryRegistry::new();
    registry
        .insert_feat(NewFeatAssociation {
            role_id: 7,
            feat_role_id: 8,
            feat_description: "⭐".to_string(),
        })
        .await
        .expect("insert feat");
    registry
        .insert_feat(NewFeatAssociation {
            role_id: 9,
            feat_role_id: 8,
            feat_description: "🔥".to_string(),
        })
        .await
        .expect("insert feat");

    let feats = registry.list_feats(7).await.expect("list feats");
    assert_eq!(feats.len(), 1);
    assert_eq!(feats[0].feat_description, "⭐");
}

#[tokio::test]
async fn test_delete_feat_removes_all_matching() {
    let registry = InMemoryRegistry::new();
    for _ in 0..2 {
        registry
            .insert_feat(NewFeatAssociation {
                role_id: 7,
                feat_role_id: 8,
                feat_description: "⭐".to_string(),
            })
            .await
            .expect("insert feat");
    }
    registry
        .insert_feat(NewFeatAssociation {
            role_id: 7,
            feat_role_id: 9,
            feat_description: "🔥".to_string(),
        })
        .await
        .expect("insert feat");

    registry.delete_feat(7, 8).await.expect("delete feat");

    let feats = registry.list_feats(7).await.expect("list feats");
    assert_eq!(feats.len(), 1);
    assert_eq!(feats[0].feat_role_id, 9);
}
