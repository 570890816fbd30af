//! Client configuration

use crate::error::{ClientError, ClientResult};

/// Where tier changes are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TierBackend {
    /// In-process table seeded with the default catalog; not persisted remotely yet
    #[default]
    Memory,
    /// The same remote data service as members
    Remote,
}

impl std::str::FromStr for TierBackend {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "remote" => Ok(Self::Remote),
            other => Err(ClientError::Config(format!(
                "unknown tier backend '{other}' (expected memory or remote)"
            ))),
        }
    }
}

/// Client configuration for connecting to the hosted data service
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service base URL (e.g., "https://project.supabase.co")
    pub base_url: String,

    /// Public API key sent as `apikey`
    pub api_key: Option<String>,

    /// User access token; falls back to the API key for `Authorization`
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Remote member table
    pub members_table: String,

    /// Tier table
    pub tiers_table: String,

    /// Tier storage
    pub tier_backend: TierBackend,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            token: None,
            timeout: 30,
            members_table: "members".to_string(),
            tiers_table: "tiers".to_string(),
            tier_backend: TierBackend::Memory,
        }
    }

    /// Load configuration from the environment (and `.env` when present).
    ///
    /// - `AMPLIFY_URL` (required)
    /// - `AMPLIFY_ANON_KEY`, `AMPLIFY_ACCESS_TOKEN`
    /// - `AMPLIFY_TIMEOUT` seconds (default 30)
    /// - `AMPLIFY_MEMBERS_TABLE` (default `members`), `AMPLIFY_TIERS_TABLE` (default `tiers`)
    /// - `AMPLIFY_TIER_BACKEND`: `memory` (default) or `remote`
    pub fn from_env() -> ClientResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url =
            get("AMPLIFY_URL").ok_or_else(|| ClientError::Config("AMPLIFY_URL must be set".into()))?;
        let mut config = Self::new(base_url);
        config.api_key = get("AMPLIFY_ANON_KEY");
        config.token = get("AMPLIFY_ACCESS_TOKEN");

        if let Some(timeout) = get("AMPLIFY_TIMEOUT") {
            config.timeout = timeout.trim().parse().map_err(|_| {
                ClientError::Config(format!("AMPLIFY_TIMEOUT must be a number of seconds, got '{timeout}'"))
            })?;
        }
        if let Some(table) = get("AMPLIFY_MEMBERS_TABLE") {
            config.members_table = table;
        }
        if let Some(table) = get("AMPLIFY_TIERS_TABLE") {
            config.tiers_table = table;
        }
        if let Some(backend) = get("AMPLIFY_TIER_BACKEND") {
            config.tier_backend = backend.parse()?;
        }
        Ok(config)
    }

    /// Set the public API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the user access token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the member table name
    pub fn with_members_table(mut self, table: impl Into<String>) -> Self {
        self.members_table = table.into();
        self
    }

    /// Set the tier table name
    pub fn with_tiers_table(mut self, table: impl Into<String>) -> Self {
        self.tiers_table = table.into();
        self
    }

    /// Set where tiers are stored
    pub fn with_tier_backend(mut self, backend: TierBackend) -> Self {
        self.tier_backend = backend;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:54321")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[("AMPLIFY_URL", "https://x.supabase.co")]))
            .unwrap();
        assert_eq!(config.base_url, "https://x.supabase.co");
        assert_eq!(config.members_table, "members");
        assert_eq!(config.tiers_table, "tiers");
        assert_eq!(config.timeout, 30);
        assert_eq!(config.tier_backend, TierBackend::Memory);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_all_keys() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("AMPLIFY_URL", "https://x.supabase.co"),
            ("AMPLIFY_ANON_KEY", "anon"),
            ("AMPLIFY_ACCESS_TOKEN", "jwt"),
            ("AMPLIFY_TIMEOUT", "5"),
            ("AMPLIFY_MEMBERS_TABLE", "people"),
            ("AMPLIFY_TIERS_TABLE", "levels"),
            ("AMPLIFY_TIER_BACKEND", "Remote"),
        ]))
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("anon"));
        assert_eq!(config.token.as_deref(), Some("jwt"));
        assert_eq!(config.timeout, 5);
        assert_eq!(config.members_table, "people");
        assert_eq!(config.tiers_table, "levels");
        assert_eq!(config.tier_backend, TierBackend::Remote);
    }

    #[test]
    fn test_missing_url_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[("AMPLIFY_URL", "  ")])).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_bad_values_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[
            ("AMPLIFY_URL", "http://localhost"),
            ("AMPLIFY_TIMEOUT", "soon"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("AMPLIFY_TIMEOUT"));

        assert!("disk".parse::<TierBackend>().is_err());
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("http://localhost")
            .with_api_key("k")
            .with_timeout(3)
            .with_tier_backend(TierBackend::Remote);
        assert_eq!(config.api_key.as_deref(), Some("k"));
        assert_eq!(config.timeout, 3);
        assert_eq!(config.tier_backend, TierBackend::Remote);
    }
}
