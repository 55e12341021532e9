pub mod flashcard;
pub mod generation;
pub mod user;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Deserialize a required request field without failing the whole body.
///
/// A missing, `null` or wrong-typed value becomes `None`, which the field's
/// `#[validate(required)]` rule then reports alongside every other failing
/// field. Use together with `#[serde(default)]`.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::lenient;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "lenient")]
        count: Option<i32>,
    }

    fn parse(json: &str) -> Option<i32> {
        serde_json::from_str::<Body>(json).unwrap().count
    }

    #[test]
    fn well_typed_values_pass_through() {
        assert_eq!(parse(r#"{"count": 7}"#), Some(7));
    }

    #[test]
    fn missing_null_and_wrong_typed_values_become_none() {
        assert_eq!(parse("{}"), None);
        assert_eq!(parse(r#"{"count": null}"#), None);
        assert_eq!(parse(r#"{"count": "ten"}"#), None);
        assert_eq!(parse(r#"{"count": 1.5}"#), None);
    }
}
