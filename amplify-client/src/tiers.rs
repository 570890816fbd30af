//! Tier mutation handlers

use std::sync::Arc;

use shared::error::ErrorCode;
use shared::models::{Tier, TierDraft};
use shared::util::new_id;
use shared::validation::validate_tier_draft;

use crate::confirm::{Confirm, DELETE_TIER_PROMPT};
use crate::error::{ClientError, ClientResult};
use crate::remote::{Filter, TableClient, decode_rows, encode_row};
use crate::store::MembershipStore;

/// Tier operations against the tier table
pub struct TierService {
    remote: Arc<dyn TableClient>,
    table: String,
    store: Arc<MembershipStore>,
}

impl TierService {
    pub fn new(
        remote: Arc<dyn TableClient>,
        table: impl Into<String>,
        store: Arc<MembershipStore>,
    ) -> Self {
        Self {
            remote,
            table: table.into(),
            store,
        }
    }

    /// Read every tier into the store
    pub async fn load_tiers(&self) -> ClientResult<Vec<Tier>> {
        let rows = self.remote.select(&self.table, None).await?;
        let tiers: Vec<Tier> = decode_rows(rows)?;
        tracing::debug!(count = tiers.len(), "Tiers loaded");
        self.store.set_tiers(tiers.clone()).await;
        Ok(tiers)
    }

    /// Open the tier form on the create path
    pub async fn open_create_form(&self) -> TierDraft {
        self.store.update_tier_form(|panel| panel.open()).await;
        TierDraft::default()
    }

    /// Open the tier form prefilled with the tier `id`
    pub async fn open_edit_form(&self, id: &str) -> Option<TierDraft> {
        let tier = self.store.tier(id).await?;
        self.store.update_tier_form(|panel| panel.open_for(id)).await;
        Some(TierDraft::from_tier(&tier))
    }

    pub async fn close_form(&self) {
        self.store.update_tier_form(|panel| panel.close()).await;
    }

    /// Tier form submission
    ///
    /// A draft without `id` creates a tier with a fresh id and appends it.
    /// A draft with `id` overwrites that tier in place.
    pub async fn submit(&self, draft: TierDraft) -> ClientResult<Tier> {
        let price = match validate_tier_draft(&draft) {
            Ok(price) => price,
            Err(e) => {
                self.store.update_tier_form(|panel| panel.fail(e.message.clone())).await;
                return Err(e.into());
            }
        };
        self.store.update_tier_form(|panel| panel.begin_submit()).await;

        let result = match draft.id.clone() {
            None => self.create(draft.into_tier(new_id(), price)).await,
            Some(id) => self.update(draft.into_tier(id, price)).await,
        };
        match &result {
            Ok(tier) => {
                tracing::info!(tier_id = %tier.id, "Tier saved");
                self.store.update_tier_form(|panel| panel.succeed()).await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Tier save failed");
                let message = e.user_message();
                self.store.update_tier_form(|panel| panel.fail(message)).await;
            }
        }
        result
    }

    async fn create(&self, tier: Tier) -> ClientResult<Tier> {
        let rows = self.remote.insert(&self.table, vec![encode_row(&tier)?]).await?;
        if rows.is_empty() {
            return Err(ClientError::EmptyResult);
        }
        self.store.push_tier(tier.clone()).await;
        Ok(tier)
    }

    async fn update(&self, tier: Tier) -> ClientResult<Tier> {
        if self.store.tier(&tier.id).await.is_none() {
            return Err(ClientError::NotFound(ErrorCode::TierNotFound.message().to_string()));
        }
        let rows = self
            .remote
            .update(&self.table, &Filter::eq("id", tier.id.as_str()), encode_row(&tier)?)
            .await?;
        if rows.is_empty() {
            return Err(ClientError::EmptyResult);
        }
        self.store.replace_tier(tier.clone()).await;
        Ok(tier)
    }

    /// Delete the tier `id` after confirmation; its perks go with it.
    ///
    /// Returns `false` when the user declined.
    pub async fn delete_tier(&self, id: &str, confirm: &dyn Confirm) -> ClientResult<bool> {
        if !confirm.confirm(DELETE_TIER_PROMPT) {
            return Ok(false);
        }
        self.remote.delete(&self.table, &Filter::eq("id", id)).await?;
        let removed = self.store.remove_tier(id).await;
        tracing::info!(tier_id = %id, removed, "Tier deleted");
        Ok(true)
    }
}
