//! Dashboard statistics derived from the member list

use serde::{Deserialize, Serialize};

use crate::models::{Member, MembershipLevel};

/// Member count for one level and its share of the total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelShare {
    pub level: MembershipLevel,
    pub count: usize,
    /// Whole-number percentage, rounded half up
    pub percent: u8,
}

/// Membership distribution across levels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipStats {
    pub total: usize,
    /// Always Basic, Premium, VIP in that order
    pub shares: Vec<LevelShare>,
}

impl MembershipStats {
    pub fn from_members(members: &[Member]) -> Self {
        let total = members.len();
        let shares = MembershipLevel::ALL
            .into_iter()
            .map(|level| {
                let count = members.iter().filter(|m| m.membership_level == level).count();
                LevelShare {
                    level,
                    count,
                    percent: percent_of(count, total),
                }
            })
            .collect();
        Self { total, shares }
    }

    pub fn share(&self, level: MembershipLevel) -> Option<&LevelShare> {
        self.shares.iter().find(|s| s.level == level)
    }
}

fn percent_of(count: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((count * 200 + total) / (total * 2)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CustomFields, MembershipLevel::*};

    fn member(id: &str, level: MembershipLevel) -> Member {
        Member {
            id: id.into(),
            name: format!("Member {id}"),
            email: format!("{id}@example.com"),
            membership_level: level,
            join_date: chrono::Utc::now(),
            custom_fields: CustomFields::new(),
        }
    }

    #[test]
    fn test_distribution() {
        let members = vec![
            member("1", Premium),
            member("2", Basic),
            member("3", Vip),
            member("4", Basic),
            member("5", Basic),
            member("6", Basic),
        ];
        let stats = MembershipStats::from_members(&members);
        assert_eq!(stats.total, 6);
        let basic = stats.share(Basic).unwrap();
        assert_eq!((basic.count, basic.percent), (4, 67));
        let premium = stats.share(Premium).unwrap();
        assert_eq!((premium.count, premium.percent), (1, 17));
        assert_eq!(stats.share(Vip).unwrap().percent, 17);
        let order: Vec<_> = stats.shares.iter().map(|s| s.level).collect();
        assert_eq!(order, [Basic, Premium, Vip]);
    }

    #[test]
    fn test_empty_list_has_zero_shares() {
        let stats = MembershipStats::from_members(&[]);
        assert_eq!(stats.total, 0);
        assert!(stats.shares.iter().all(|s| s.count == 0 && s.percent == 0));
    }

    #[test]
    fn test_half_rounds_up() {
        assert_eq!(percent_of(1, 8), 13); // 12.5
        assert_eq!(percent_of(1, 3), 33);
        assert_eq!(percent_of(3, 3), 100);
    }
}
