use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(normalized))
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

pub fn parse_opt_enum<T>(raw: Option<&str>, field: &str) -> anyhow::Result<Option<T>>
where
    T: DeserializeOwned,
{
    raw.map(|raw| parse_enum(raw, field)).transpose()
}

#[cfg(test)]
mod tests {
    use iv_core::enums::{InterviewStatus, TokenStatus};

    use super::*;

    #[test]
    fn parses_snake_case_enum() {
        let status: TokenStatus = parse_enum("Expired", "status").expect("status should parse");
        assert_eq!(status, TokenStatus::Expired);
    }

    #[test]
    fn optional_passthrough() {
        let none: Option<InterviewStatus> = parse_opt_enum(None, "status").unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn errors_on_invalid_enum() {
        let err = parse_enum::<InterviewStatus>("archived", "status").expect_err("should fail");
        assert!(err.to_string().contains("invalid status 'archived'"));
    }
}
