//! Member mutation handlers

use std::sync::Arc;

use shared::error::{AppError, ErrorCode};
use shared::models::{CustomFieldDefinition, Member, MemberCreate, MemberUpdate, validate_custom_fields};
use shared::validation::{validate_member_create, validate_member_update};

use crate::confirm::{Confirm, DELETE_MEMBER_PROMPT};
use crate::error::{ClientError, ClientResult};
use crate::remote::{Filter, TableClient, decode_rows, encode_row};
use crate::store::MembershipStore;

/// Member operations against the remote member table
pub struct MemberService {
    remote: Arc<dyn TableClient>,
    table: String,
    store: Arc<MembershipStore>,
}

impl MemberService {
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

    /// Open the add-member form
    pub async fn open_add_form(&self) {
        self.store.update_member_form(|panel| panel.open()).await;
    }

    /// Close the add-member form without submitting
    pub async fn cancel_add_form(&self) {
        self.store.update_member_form(|panel| panel.close()).await;
    }

    /// Add-member submission
    ///
    /// Inserts one row. On success the form closes and the refresh toggle
    /// flips once; the local list is only updated by the next fetch.
    pub async fn add_member(&self, data: MemberCreate) -> ClientResult<Member> {
        if let Err(e) = validate_member_create(&data) {
            self.store.update_member_form(|panel| panel.fail(e.message.clone())).await;
            return Err(e.into());
        }
        self.store.update_member_form(|panel| panel.begin_submit()).await;

        let result = self.insert(Member::from_create(data)).await;
        match &result {
            Ok(member) => {
                tracing::info!(member_id = %member.id, "Member added");
                self.store.update_member_form(|panel| panel.succeed()).await;
                self.store.flip_refresh();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Add member failed");
                let message = e.user_message();
                self.store.update_member_form(|panel| panel.fail(message)).await;
            }
        }
        result
    }

    async fn insert(&self, member: Member) -> ClientResult<Member> {
        let row = encode_row(&member)?;
        let rows = self.remote.insert(&self.table, vec![row]).await?;
        decode_rows::<Member>(rows)?
            .into_iter()
            .next()
            .ok_or(ClientError::EmptyResult)
    }

    /// Quick-edit: patch the member with `id`.
    ///
    /// Fields absent from the patch keep their values. An id that is not in
    /// the local list is a no-op and returns `None` without a remote call.
    pub async fn quick_edit(&self, id: &str, patch: MemberUpdate) -> ClientResult<Option<Member>> {
        validate_member_update(&patch)?;
        let Some(current) = self.store.member(id).await else {
            tracing::debug!(member_id = %id, "Quick edit ignored, member not in list");
            return Ok(None);
        };
        if patch.is_empty() {
            return Ok(Some(current));
        }

        let rows = self
            .remote
            .update(&self.table, &Filter::eq("id", id), encode_row(&patch)?)
            .await?;
        if rows.is_empty() {
            return Err(ClientError::EmptyResult);
        }

        let updated = self.store.apply_member_patch(id, &patch).await;
        tracing::info!(member_id = %id, "Member updated");
        Ok(updated)
    }

    /// Delete the member with `id` after confirmation.
    ///
    /// Returns `false` when the user declined.
    pub async fn delete_member(&self, id: &str, confirm: &dyn Confirm) -> ClientResult<bool> {
        if !confirm.confirm(DELETE_MEMBER_PROMPT) {
            return Ok(false);
        }
        self.remote.delete(&self.table, &Filter::eq("id", id)).await?;
        let removed = self.store.remove_member(id).await;
        tracing::info!(member_id = %id, removed, "Member deleted");
        Ok(true)
    }

    /// Load one member for the profile view
    pub async fn fetch_member(&self, id: &str) -> ClientResult<Member> {
        if id.trim().is_empty() {
            return Err(AppError::new(ErrorCode::MemberIdMissing).into());
        }
        let rows = self
            .remote
            .select(&self.table, Some(&Filter::eq("id", id)))
            .await?;
        decode_rows::<Member>(rows)?
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::NotFound(ErrorCode::MemberNotFound.message().to_string()))
    }

    /// Save the profile form: a patch whose custom fields are checked
    /// against their definitions first
    pub async fn save_profile(
        &self,
        id: &str,
        patch: MemberUpdate,
        definitions: &[CustomFieldDefinition],
    ) -> ClientResult<Option<Member>> {
        if id.trim().is_empty() {
            return Err(AppError::new(ErrorCode::MemberIdMissing).into());
        }
        if let Some(fields) = &patch.custom_fields {
            validate_custom_fields(definitions, fields)?;
        }
        self.quick_edit(id, patch).await
    }
}
