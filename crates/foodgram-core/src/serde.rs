// Module name shadows the `serde` crate, so the external crate is `::serde` here.
use ::serde::{Deserialize, Deserializer, de::Error as _};

/// Deserialize an optional query flag written as `1`/`0` or `true`/`false`.
///
/// Use with `#[serde(default, deserialize_with = "foodgram_core::serde::optional_flag")]`.
pub fn optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some("1" | "true" | "True") => Ok(Some(true)),
        Some("0" | "false" | "False") => Ok(Some(false)),
        Some(other) => Err(D::Error::custom(format!("invalid flag value {other:?}"))),
    }
}
