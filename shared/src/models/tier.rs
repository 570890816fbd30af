//! Membership Tier & Perk Models

use serde::{Deserialize, Serialize};

/// A single benefit attached to a tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Perk {
    pub id: String,
    pub description: String,
}

impl Perk {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
        }
    }
}

/// Membership tier entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub id: String,
    pub name: String,
    /// Monthly price, never negative
    pub price: f64,
    pub description: String,
    #[serde(default)]
    pub perks: Vec<Perk>,
}

/// Tier form payload
///
/// Without `id` the submission creates a tier; with `id` it replaces the
/// tier carrying that id. `price` is `None` while the price input is blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TierDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub perks: Vec<Perk>,
}

impl TierDraft {
    /// Empty draft for the create path
    pub fn new(name: impl Into<String>, price: f64, description: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            price: Some(price),
            description: description.into(),
            perks: Vec::new(),
        }
    }

    /// Prefilled draft for editing an existing tier
    pub fn from_tier(tier: &Tier) -> Self {
        Self {
            id: Some(tier.id.clone()),
            name: tier.name.clone(),
            price: Some(tier.price),
            description: tier.description.clone(),
            perks: tier.perks.clone(),
        }
    }

    pub fn is_update(&self) -> bool {
        self.id.is_some()
    }

    /// Append a perk; blank input is ignored
    pub fn add_perk(&mut self, description: &str) -> Option<&Perk> {
        let description = description.trim();
        if description.is_empty() {
            return None;
        }
        self.perks.push(Perk::new(crate::util::new_id(), description));
        self.perks.last()
    }

    /// Remove a perk by id; returns whether one was removed
    pub fn remove_perk(&mut self, perk_id: &str) -> bool {
        let before = self.perks.len();
        self.perks.retain(|p| p.id != perk_id);
        self.perks.len() != before
    }

    /// Turn a validated draft into a tier row with the given id
    pub fn into_tier(self, id: String, price: f64) -> Tier {
        Tier {
            id,
            name: self.name,
            price,
            description: self.description,
            perks: self.perks,
        }
    }
}

/// Tier catalog a fresh workspace starts with
pub fn default_tiers() -> Vec<Tier> {
    vec![
        Tier {
            id: "tier-basic".into(),
            name: "Basic".into(),
            price: 10.0,
            description: "Access to core community features and standard content.".into(),
            perks: vec![
                Perk::new("p1", "Community Forum Access"),
                Perk::new("p2", "Monthly Newsletter"),
            ],
        },
        Tier {
            id: "tier-premium".into(),
            name: "Premium".into(),
            price: 25.0,
            description: "Enhanced access, exclusive content, and priority support.".into(),
            perks: vec![
                Perk::new("p3", "All Basic Perks"),
                Perk::new("p4", "Exclusive Webinars"),
                Perk::new("p5", "Resource Library Access"),
                Perk::new("p6", "Priority Email Support"),
            ],
        },
        Tier {
            id: "tier-vip".into(),
            name: "VIP".into(),
            price: 50.0,
            description: "Top-level access with personalized support and early access.".into(),
            perks: vec![
                Perk::new("p7", "All Premium Perks"),
                Perk::new("p8", "1-on-1 Onboarding Call"),
                Perk::new("p9", "Early Access to New Features"),
                Perk::new("p10", "Dedicated Account Manager"),
            ],
        },
    ]
}
