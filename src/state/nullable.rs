//! Lenient decoding for feeds that send `null` where a value is expected

use serde::{Deserialize, Deserializer};

/// Decode `null` as `T::default()`. Pair with `#[serde(default)]` to cover
/// missing keys too.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "or_default")]
        items: Vec<u8>,
        #[serde(default, deserialize_with = "or_default")]
        flag: bool,
    }

    #[test]
    fn test_null_and_missing_decode_to_default() {
        let from_null: Holder = serde_json::from_str(r#"{"items": null, "flag": null}"#).unwrap();
        let from_missing: Holder = serde_json::from_str("{}").unwrap();
        assert!(from_null.items.is_empty() && !from_null.flag);
        assert!(from_missing.items.is_empty() && !from_missing.flag);
    }

    #[test]
    fn test_present_values_kept() {
        let holder: Holder = serde_json::from_str(r#"{"items": [1, 2], "flag": true}"#).unwrap();
        assert_eq!(holder.items, vec![1, 2]);
        assert!(holder.flag);
    }
}
