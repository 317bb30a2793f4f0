//! PATCH field semantics
//!
//! A partial update needs three states per nullable field: key absent
//! (keep the current value), explicit JSON `null` (clear it), and a value
//! (replace it). A plain `Option<Option<T>>` derive collapses an explicit
//! `null` into the outer `None`, which makes clearing impossible over the
//! wire. Pairing `#[serde(default)]` with [`double_option`] keeps the two
//! apart.

use serde::{Deserialize, Deserializer};

/// Deserializer for nullable PATCH fields
///
/// A present key always yields `Some`: `null` becomes `Some(None)` and a
/// value becomes `Some(Some(v))`. An absent key never reaches the
/// deserializer and falls through to the field default, `None`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "super::double_option")]
        field: Option<Option<String>>,
    }

    #[test]
    fn test_absent_key_is_outer_none() {
        let probe: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(probe.field, None);
    }

    #[test]
    fn test_explicit_null_is_inner_none() {
        let probe: Probe = serde_json::from_str(r#"{"field":null}"#).unwrap();
        assert_eq!(probe.field, Some(None));
    }

    #[test]
    fn test_value_is_doubly_wrapped() {
        let probe: Probe = serde_json::from_str(r#"{"field":"v"}"#).unwrap();
        assert_eq!(probe.field, Some(Some("v".to_string())));
    }
}
