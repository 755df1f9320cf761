/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a prefixed resource id, e.g. `ORD-9f2c4a1e...`.
///
/// The suffix is a random UUID v4 in simple (dashless) form, so ids are
/// unique without any coordination between server instances.
pub fn prefixed_id(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_millis_is_recent() {
        // Sanity check: after 2024-01-01 UTC
        assert!(now_millis() > 1_704_067_200_000);
    }

    #[test]
    fn test_prefixed_id_format() {
        let id = prefixed_id("ORD");
        assert!(id.starts_with("ORD-"));
        assert_eq!(id.len(), "ORD-".len() + 32);
        assert!(!id[4..].contains('-'));
    }

    #[test]
    fn test_prefixed_id_unique() {
        let a = prefixed_id("PAY");
        let b = prefixed_id("PAY");
        assert_ne!(a, b);
    }
}
