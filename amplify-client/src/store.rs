//! Membership store
//!
//! The one owned container for member and tier state. Mutation handlers
//! and the list synchronizer both read and write through it; locks are
//! held only for the in-memory update, never across a remote call.

use shared::models::{Member, MemberUpdate, Tier};
use shared::stats::MembershipStats;
use tokio::sync::{RwLock, watch};

use crate::form::FormPanel;

/// What the member list shows
#[derive(Debug, Clone, PartialEq)]
pub enum ListView {
    Loading,
    /// Fetch failed; the literal error message
    Error(String),
    /// Fetch succeeded with no rows
    Empty,
    Populated(Vec<Member>),
}

#[derive(Debug, Clone, PartialEq)]
enum ListStatus {
    Loading,
    Error(String),
    Ready,
}

#[derive(Debug)]
struct StoreState {
    members: Vec<Member>,
    status: ListStatus,
    /// Sequence of the most recently issued member fetch
    latest_fetch: u64,
    tiers: Vec<Tier>,
    member_form: FormPanel,
    tier_form: FormPanel,
}

/// Shared state for the membership views
#[derive(Debug)]
pub struct MembershipStore {
    state: RwLock<StoreState>,
    refresh: watch::Sender<bool>,
}

impl Default for MembershipStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MembershipStore {
    pub fn new() -> Self {
        let (refresh, _) = watch::channel(false);
        Self {
            state: RwLock::new(StoreState {
                members: Vec::new(),
                status: ListStatus::Loading,
                latest_fetch: 0,
                tiers: Vec::new(),
                member_form: FormPanel::default(),
                tier_form: FormPanel::default(),
            }),
            refresh,
        }
    }

    // ==================== Refresh toggle ====================

    /// Flip the refresh toggle; list synchronization re-fetches on every flip
    pub fn flip_refresh(&self) {
        self.refresh.send_modify(|toggle| *toggle = !*toggle);
    }

    pub fn refresh_toggle(&self) -> bool {
        *self.refresh.borrow()
    }

    pub fn subscribe_refresh(&self) -> watch::Receiver<bool> {
        self.refresh.subscribe()
    }

    // ==================== Members ====================

    pub async fn members(&self) -> Vec<Member> {
        self.state.read().await.members.clone()
    }

    pub async fn member(&self, id: &str) -> Option<Member> {
        self.state
            .read()
            .await
            .members
            .iter()
            .find(|m| m.id == id)
            .cloned()
    }

    pub async fn list_view(&self) -> ListView {
        let state = self.state.read().await;
        match &state.status {
            ListStatus::Loading => ListView::Loading,
            ListStatus::Error(message) => ListView::Error(message.clone()),
            ListStatus::Ready if state.members.is_empty() => ListView::Empty,
            ListStatus::Ready => ListView::Populated(state.members.clone()),
        }
    }

    pub async fn stats(&self) -> MembershipStats {
        MembershipStats::from_members(&self.state.read().await.members)
    }

    /// Issue a new fetch sequence number and show the loading state
    pub(crate) async fn begin_fetch(&self) -> u64 {
        let mut state = self.state.write().await;
        state.latest_fetch += 1;
        state.status = ListStatus::Loading;
        state.latest_fetch
    }

    /// Apply a fetch result unless a newer fetch has been issued since.
    ///
    /// Returns whether the result was applied.
    pub(crate) async fn finish_fetch(&self, seq: u64, result: Result<Vec<Member>, String>) -> bool {
        let mut state = self.state.write().await;
        if seq != state.latest_fetch {
            return false;
        }
        match result {
            Ok(members) => {
                state.members = members;
                state.status = ListStatus::Ready;
            }
            Err(message) => state.status = ListStatus::Error(message),
        }
        true
    }

    /// Make every fetch issued so far stale
    pub(crate) async fn invalidate_fetches(&self) {
        self.state.write().await.latest_fetch += 1;
    }

    /// Apply a patch to the member with `id`; returns the updated record
    pub(crate) async fn apply_member_patch(&self, id: &str, patch: &MemberUpdate) -> Option<Member> {
        let mut state = self.state.write().await;
        let member = state.members.iter_mut().find(|m| m.id == id)?;
        member.apply(patch);
        Some(member.clone())
    }

    pub(crate) async fn remove_member(&self, id: &str) -> bool {
        let mut state = self.state.write().await;
        let before = state.members.len();
        state.members.retain(|m| m.id != id);
        state.members.len() != before
    }

    // ==================== Tiers ====================

    pub async fn tiers(&self) -> Vec<Tier> {
        self.state.read().await.tiers.clone()
    }

    pub async fn tier(&self, id: &str) -> Option<Tier> {
        self.state
            .read()
            .await
            .tiers
            .iter()
            .find(|t| t.id == id)
            .cloned()
    }

    pub(crate) async fn set_tiers(&self, tiers: Vec<Tier>) {
        self.state.write().await.tiers = tiers;
    }

    pub(crate) async fn push_tier(&self, tier: Tier) {
        self.state.write().await.tiers.push(tier);
    }

    /// Replace the tier with the same id in place; returns its index
    pub(crate) async fn replace_tier(&self, tier: Tier) -> Option<usize> {
        let mut state = self.state.write().await;
        let index = state.tiers.iter().position(|t| t.id == tier.id)?;
        state.tiers[index] = tier;
        Some(index)
    }

    pub(crate) async fn remove_tier(&self, id: &str) -> bool {
        let mut state = self.state.write().await;
        let before = state.tiers.len();
        state.tiers.retain(|t| t.id != id);
        state.tiers.len() != before
    }

    // ==================== Forms ====================

    pub async fn member_form(&self) -> FormPanel {
        self.state.read().await.member_form.clone()
    }

    pub async fn tier_form(&self) -> FormPanel {
        self.state.read().await.tier_form.clone()
    }

    pub(crate) async fn update_member_form<R>(&self, f: impl FnOnce(&mut FormPanel) -> R) -> R {
        f(&mut self.state.write().await.member_form)
    }

    pub(crate) async fn update_tier_form<R>(&self, f: impl FnOnce(&mut FormPanel) -> R) -> R {
        f(&mut self.state.write().await.tier_form)
    }
}
