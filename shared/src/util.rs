use chrono::{DateTime, Utc};

/// Current UTC time
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Generate a fresh opaque identifier (UUID v4, hyphenated).
///
/// Used for members inserted from the client, newly created tiers and perks.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id_is_unique_uuid() {
        let a = new_id();
        let b = new_id();
        assert_ne!(a, b);
        assert!(uuid::Uuid::parse_str(&a).is_ok());
    }
}
