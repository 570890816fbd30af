//! Member list synchronization
//!
//! Re-reads the whole member table on mount and on every refresh-toggle
//! flip, replacing the local list wholesale. Fetches are never cancelled
//! by a newer one; each carries a sequence number and only the latest
//! issued may be applied. Teardown stops the driver and drops every
//! in-flight response.

use std::sync::Arc;

use shared::models::Member;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::remote::{TableClient, decode_rows};
use crate::store::MembershipStore;

/// What became of one fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The result (rows or error) replaced the list state
    Applied,
    /// A newer fetch was issued before this one completed
    Stale,
    /// The view was torn down
    Cancelled,
}

/// Refresh-driven fetcher for the member list
pub struct MemberListSync {
    remote: Arc<dyn TableClient>,
    table: String,
    store: Arc<MembershipStore>,
    shutdown: CancellationToken,
}

impl MemberListSync {
    pub fn new(
        remote: Arc<dyn TableClient>,
        table: impl Into<String>,
        store: Arc<MembershipStore>,
    ) -> Self {
        Self {
            remote,
            table: table.into(),
            store,
            shutdown: CancellationToken::new(),
        }
    }

    /// Fetch the member table once
    pub async fn refresh(&self) -> FetchOutcome {
        if self.shutdown.is_cancelled() {
            return FetchOutcome::Cancelled;
        }
        let seq = self.store.begin_fetch().await;
        tracing::debug!(seq, "Fetching member list");

        let result = tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => {
                tracing::debug!(seq, "Member fetch dropped on teardown");
                return FetchOutcome::Cancelled;
            }
            result = self.remote.select(&self.table, None) => result,
        };
        if self.shutdown.is_cancelled() {
            return FetchOutcome::Cancelled;
        }

        let result = result
            .and_then(decode_rows::<Member>)
            .map_err(|e| e.message);
        if let Err(message) = &result {
            tracing::warn!(seq, error = %message, "Member list fetch failed");
        }

        if self.store.finish_fetch(seq, result).await {
            FetchOutcome::Applied
        } else {
            tracing::debug!(seq, "Discarding stale member list response");
            FetchOutcome::Stale
        }
    }

    /// Start the driver: one fetch now, one per refresh-toggle flip.
    ///
    /// Each fetch runs in its own task so a slow response never blocks a
    /// newer one.
    pub fn spawn(self: &Arc<Self>) -> JoinHandle<()> {
        let sync = Arc::clone(self);
        tokio::spawn(async move { sync.run().await })
    }

    async fn run(self: Arc<Self>) {
        let mut refresh = self.store.subscribe_refresh();
        self.spawn_fetch();

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    tracing::info!("Member list sync stopped");
                    return;
                }
                changed = refresh.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    self.spawn_fetch();
                }
            }
        }
    }

    fn spawn_fetch(self: &Arc<Self>) {
        let sync = Arc::clone(self);
        tokio::spawn(async move {
            sync.refresh().await;
        });
    }

    /// Tear the view down: stop the driver and make every in-flight fetch
    /// inapplicable. Calling it again is harmless.
    pub async fn teardown(&self) {
        self.shutdown.cancel();
        self.store.invalidate_fetches().await;
    }

    pub fn is_torn_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}
