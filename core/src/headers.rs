//! Header sets and the default/per-call merge rule.
//!
//! Keys are compared exactly as supplied (case-sensitive). A `BTreeMap` keeps
//! iteration deterministic, but no ordering is part of the contract.

use std::collections::BTreeMap;

pub type HeaderSet = BTreeMap<String, String>;

/// Build a `HeaderSet` from `(name, value)` pairs.
pub fn header_set<I, K, V>(pairs: I) -> HeaderSet
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Combine `defaults` with `custom` into a new set; `custom` wins on key
/// collisions. Neither input is modified, and an absent side contributes
/// nothing.
pub fn merge(defaults: Option<&HeaderSet>, custom: Option<&HeaderSet>) -> HeaderSet {
    let mut merged = defaults.cloned().unwrap_or_default();
    if let Some(custom) = custom {
        merged.extend(custom.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_wins_on_collision() {
        let defaults = header_set([("accept", "application/json"), ("x-trace", "a")]);
        let custom = header_set([("x-trace", "b"), ("authorization", "Bearer t")]);

        let merged = merge(Some(&defaults), Some(&custom));

        assert_eq!(merged.len(), 3);
        assert_eq!(merged["accept"], "application/json");
        assert_eq!(merged["x-trace"], "b");
        assert_eq!(merged["authorization"], "Bearer t");
    }

    #[test]
    fn inputs_are_left_untouched() {
        let defaults = header_set([("x-trace", "a")]);
        let custom = header_set([("x-trace", "b")]);

        let _ = merge(Some(&defaults), Some(&custom));

        assert_eq!(defaults["x-trace"], "a");
        assert_eq!(custom["x-trace"], "b");
    }

    #[test]
    fn identity_when_one_side_absent() {
        let a = header_set([("accept", "text/plain")]);
        assert_eq!(merge(Some(&a), None), a);
        assert_eq!(merge(None, Some(&a)), a);
        assert!(merge(None, None).is_empty());
    }

    #[test]
    fn keys_are_case_sensitive() {
        let defaults = header_set([("Accept", "a")]);
        let custom = header_set([("accept", "b")]);
        let merged = merge(Some(&defaults), Some(&custom));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn merge_key_set_is_the_union() {
        let defaults = header_set((0..5).map(|i| (format!("k{i}"), "d".to_string())));
        let custom = header_set((3..8).map(|i| (format!("k{i}"), "c".to_string())));

        let merged = merge(Some(&defaults), Some(&custom));

        assert_eq!(merged.len(), 8);
        for (k, v) in &merged {
            if custom.contains_key(k) {
                assert_eq!(v, "c", "{k}");
            } else {
                assert_eq!(v, &defaults[k], "{k}");
            }
        }
    }
}
