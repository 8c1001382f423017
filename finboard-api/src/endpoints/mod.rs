pub mod accounts;
pub mod budgets;
pub mod categories;
pub mod transactions;

use serde::{Deserialize, Deserializer, Serialize};

/// Backend-assigned numeric identifier
pub type RecordId = i64;

/// Decimal amounts arrive either as JSON numbers or as decimal strings
/// (`"1250.50"`), depending on how the backend serializes them.
pub(crate) mod amount {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(n) => Ok(n),
            NumberOrString::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
        }
    }

    pub fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<NumberOrString>::deserialize(deserializer)? {
            None => Ok(None),
            Some(NumberOrString::Number(n)) => Ok(Some(n)),
            Some(NumberOrString::String(s)) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

/// Generic acknowledgement returned by mutation endpoints.
///
/// The backend echoes back the created/updated record or a `{"message": ..}`
/// object; neither is needed since pages re-fetch after a mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ack(pub serde_json::Value);
