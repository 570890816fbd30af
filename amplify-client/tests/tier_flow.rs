// amplify-client/tests/tier_flow.rs
// Tier create / update / delete over the seeded in-memory tier table

use std::sync::Arc;

use amplify_client::remote::Operation;
use amplify_client::{
    AlwaysConfirm, ClientConfig, MembershipClient, MemoryTableClient, Perk, RemoteError,
    TierBackend, TierDraft, seeded_tier_table,
};
use shared::models::default_tiers;

async fn setup() -> (MembershipClient, Arc<MemoryTableClient>) {
    let tiers = Arc::new(seeded_tier_table("tiers").unwrap());
    let members = Arc::new(MemoryTableClient::new());
    let client = MembershipClient::with_backends(members, "members", tiers.clone(), "tiers");
    client.tiers().load_tiers().await.unwrap();
    (client, tiers)
}

fn ids(tiers: &[amplify_client::Tier]) -> Vec<&str> {
    tiers.iter().map(|t| t.id.as_str()).collect()
}

#[tokio::test]
async fn test_default_catalog_loaded() {
    let (client, _) = setup().await;
    let tiers = client.store().tiers().await;
    assert_eq!(tiers, default_tiers());
    assert_eq!(ids(&tiers), ["tier-basic", "tier-premium", "tier-vip"]);
}

#[tokio::test]
async fn test_delete_tier_keeps_other_perks() {
    let (client, remote) = setup().await;
    let before = client.store().tiers().await;

    let deleted = client
        .tiers()
        .delete_tier("tier-basic", &AlwaysConfirm)
        .await
        .unwrap();
    assert!(deleted);

    let after = client.store().tiers().await;
    assert_eq!(ids(&after), ["tier-premium", "tier-vip"]);
    assert_eq!(after[0].perks, before[1].perks);
    assert_eq!(after[1].perks, before[2].perks);
    assert_eq!(remote.rows("tiers").await.len(), 2);
}

#[tokio::test]
async fn test_delete_tier_declined() {
    let (client, remote) = setup().await;
    let deleted = client
        .tiers()
        .delete_tier("tier-vip", &|prompt: &str| {
            assert_eq!(
                prompt,
                "Are you sure you want to delete this tier? This cannot be undone."
            );
            false
        })
        .await
        .unwrap();
    assert!(!deleted);
    assert_eq!(client.store().tiers().await.len(), 3);
    assert_eq!(remote.call_count(Operation::Delete).await, 0);
}

#[tokio::test]
async fn test_create_tier_appends_with_generated_id() {
    let (client, remote) = setup().await;

    client.tiers().open_create_form().await;
    let mut draft = TierDraft::new("Gold", 15.0, "x");
    assert!(!draft.is_update());
    let created = client.tiers().submit(draft.clone()).await.unwrap();

    let tiers = client.store().tiers().await;
    assert_eq!(tiers.len(), 4);
    assert_eq!(tiers[3], created);
    assert!(!created.id.is_empty());
    assert_eq!(created.price, 15.0);
    assert!(created.perks.is_empty());
    assert!(!client.store().tier_form().await.is_open());

    let stored = remote.rows("tiers").await;
    assert!(stored[3]["price"].is_number());
    assert_eq!(stored[3]["price"].as_f64(), Some(15.0));

    // a second create gets its own id
    draft.name = "Platinum".into();
    let other = client.tiers().submit(draft).await.unwrap();
    assert_ne!(other.id, created.id);
}

#[tokio::test]
async fn test_create_tier_accepts_long_description_and_any_perks() {
    let (client, remote) = setup().await;
    let description = "x".repeat(501);
    let mut draft = TierDraft::new("Gold", 15.0, description.as_str());
    draft.perks.push(Perk::new("perk-long", "y".repeat(1_000)));

    let created = client.tiers().submit(draft).await.unwrap();

    assert_eq!(created.description, description);
    assert_eq!(created.perks.len(), 1);
    assert_eq!(client.store().tiers().await.len(), 4);
    assert_eq!(remote.call_count(Operation::Insert).await, 1);
}

#[tokio::test]
async fn test_update_tier_replaces_in_place() {
    let (client, _) = setup().await;

    let mut draft = client.tiers().open_edit_form("tier-basic").await.unwrap();
    assert_eq!(client.store().tier_form().await.editing(), Some("tier-basic"));
    assert!(draft.is_update());

    draft.name = "Basic+".into();
    draft.price = Some(12.0);
    draft.description = "Core features plus extras.".into();
    assert!(draft.remove_perk("p2"));
    let added_id = draft.add_perk("  Members-only events ").unwrap().id.clone();
    assert!(draft.add_perk("   ").is_none());

    let updated = client.tiers().submit(draft).await.unwrap();

    let tiers = client.store().tiers().await;
    assert_eq!(ids(&tiers), ["tier-basic", "tier-premium", "tier-vip"]);
    assert_eq!(tiers[0], updated);
    assert_eq!(tiers[0].name, "Basic+");
    assert_eq!(tiers[0].price, 12.0);
    assert_eq!(tiers[0].description, "Core features plus extras.");
    assert_eq!(
        tiers[0].perks,
        vec![
            Perk::new("p1", "Community Forum Access"),
            Perk::new(added_id, "Members-only events"),
        ]
    );
    assert_eq!(tiers[1], default_tiers()[1]);
}

#[tokio::test]
async fn test_tier_remote_error_leaves_list() {
    let (client, remote) = setup().await;
    remote
        .fail_next(Operation::Insert, RemoteError::new("tiers table is read-only"))
        .await;

    client.tiers().open_create_form().await;
    let err = client
        .tiers()
        .submit(TierDraft::new("Gold", 15.0, "x"))
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "tiers table is read-only");
    assert_eq!(client.store().tiers().await.len(), 3);

    let form = client.store().tier_form().await;
    assert!(form.is_open());
    assert_eq!(form.state().error(), Some("tiers table is read-only"));
}

#[tokio::test]
async fn test_free_tier_allowed() {
    let (client, _) = setup().await;
    let tier = client
        .tiers()
        .submit(TierDraft::new("Free", 0.0, ""))
        .await
        .unwrap();
    assert_eq!(tier.price, 0.0);
}

#[tokio::test]
async fn test_client_from_config_uses_memory_tiers() {
    let client = MembershipClient::new(
        ClientConfig::new("http://localhost:54321").with_tier_backend(TierBackend::Memory),
    )
    .unwrap();
    let tiers = client.tiers().load_tiers().await.unwrap();
    assert_eq!(tiers.len(), 3);
}
