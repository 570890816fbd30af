//! Amplify Client - membership data layer
//!
//! Keeps member and tier state in one [`MembershipStore`], pushes every
//! mutation through a [`TableClient`], and re-syncs the member list from
//! the hosted data service whenever the refresh toggle flips.

pub mod config;
pub mod confirm;
pub mod error;
pub mod form;
pub mod logger;
pub mod members;
pub mod remote;
pub mod store;
pub mod sync;
pub mod tiers;

use std::sync::Arc;

pub use config::{ClientConfig, TierBackend};
pub use confirm::{AlwaysConfirm, Confirm};
pub use error::{ClientError, ClientResult};
pub use form::{FormPanel, FormState};
pub use members::MemberService;
pub use remote::{Filter, MemoryTableClient, RemoteError, RestTableClient, Row, TableClient};
pub use store::{ListView, MembershipStore};
pub use sync::{FetchOutcome, MemberListSync};
pub use tiers::TierService;

// Re-export shared types for convenience
pub use shared::models::{
    CustomFieldDefinition, CustomFieldKind, CustomFieldValue, Member, MemberCreate, MemberUpdate,
    MembershipLevel, Perk, Tier, TierDraft,
};

/// Everything a membership view needs, wired to one store
pub struct MembershipClient {
    store: Arc<MembershipStore>,
    members: MemberService,
    tiers: TierService,
    list_sync: Arc<MemberListSync>,
}

impl MembershipClient {
    /// Connect to the data service described by `config`.
    ///
    /// With [`TierBackend::Memory`] tiers live in process, seeded with the
    /// default catalog, and are not persisted remotely.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let rest: Arc<dyn TableClient> = Arc::new(RestTableClient::new(&config)?);
        let tier_remote: Arc<dyn TableClient> = match config.tier_backend {
            TierBackend::Remote => rest.clone(),
            TierBackend::Memory => Arc::new(seeded_tier_table(&config.tiers_table)?),
        };
        tracing::info!(
            base_url = %config.base_url,
            tier_backend = ?config.tier_backend,
            "Membership client ready"
        );
        Ok(Self::with_backends(
            rest,
            &config.members_table,
            tier_remote,
            &config.tiers_table,
        ))
    }

    /// Wire the client to explicit backends
    pub fn with_backends(
        member_remote: Arc<dyn TableClient>,
        members_table: &str,
        tier_remote: Arc<dyn TableClient>,
        tiers_table: &str,
    ) -> Self {
        let store = Arc::new(MembershipStore::new());
        Self {
            members: MemberService::new(member_remote.clone(), members_table, store.clone()),
            tiers: TierService::new(tier_remote, tiers_table, store.clone()),
            list_sync: Arc::new(MemberListSync::new(member_remote, members_table, store.clone())),
            store,
        }
    }

    pub fn store(&self) -> &Arc<MembershipStore> {
        &self.store
    }

    pub fn members(&self) -> &MemberService {
        &self.members
    }

    pub fn tiers(&self) -> &TierService {
        &self.tiers
    }

    pub fn list_sync(&self) -> &Arc<MemberListSync> {
        &self.list_sync
    }
}

/// In-memory tier table holding the default catalog
pub fn seeded_tier_table(table: &str) -> ClientResult<MemoryTableClient> {
    let rows = shared::models::default_tiers()
        .iter()
        .map(remote::encode_row)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(MemoryTableClient::new().with_table(table, rows))
}
