//! Identifier helpers.
//!
//! The backend is inconsistent about identifier types: some collections return
//! numeric ids, others strings. Every id is normalised to a `String` on the
//! client so that paths and lookups never care which one arrived.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
    Uint(u64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Int(n) => n.to_string(),
            RawId::Uint(n) => n.to_string(),
        }
    }
}

/// Deserialize a string-or-number id into a `String`.
///
/// # Errors
///
/// Fails if the value is neither a string nor an integer.
pub fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

/// Like [`de_id`] for optional ids (`null` and missing map to `None`).
///
/// # Errors
///
/// Fails if a present value is neither a string nor an integer.
pub fn de_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawId>::deserialize(deserializer).map(|raw| raw.map(String::from))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "super::de_id")]
        id: String,
        #[serde(default, deserialize_with = "super::de_opt_id")]
        parent: Option<String>,
    }

    #[test]
    fn numeric_id_becomes_string() {
        let h: Holder = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(h.id, "42");
        assert!(h.parent.is_none());
    }

    #[test]
    fn string_id_is_kept() {
        let h: Holder = serde_json::from_str(r#"{"id": "int-7", "parent": 3}"#).unwrap();
        assert_eq!(h.id, "int-7");
        assert_eq!(h.parent.as_deref(), Some("3"));
    }

    #[test]
    fn null_parent_is_none() {
        let h: Holder = serde_json::from_str(r#"{"id": "a", "parent": null}"#).unwrap();
        assert!(h.parent.is_none());
    }

    #[test]
    fn rejects_non_scalar_id() {
        assert!(serde_json::from_str::<Holder>(r#"{"id": [1]}"#).is_err());
    }
}
