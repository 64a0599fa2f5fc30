use serde::{de, Deserialize, Deserializer};

/// Amounts written by older exports may be numeric strings (`"400"`), blank
/// strings, or `null` where the app stored NaN.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
    Null(()),
}

pub(crate) fn lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(value) => Ok(value),
        RawAmount::Null(()) => Ok(0.0),
        RawAmount::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(0.0);
            }
            match trimmed.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(value),
                _ => Err(de::Error::custom(format!("invalid amount `{text}`"))),
            }
        }
    }
}
