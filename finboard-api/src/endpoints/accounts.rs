use super::{RecordId, amount};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::Request;

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: RecordId,
    pub bank_name: String,
    /// Free-form type reported by the bank ("savings", "current", ...)
    pub account_type: String,
    #[serde(deserialize_with = "amount::deserialize")]
    pub balance: f64,
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListAccounts;

impl ListAccounts {
    pub fn new() -> Self {
        Self
    }
}

impl Request for ListAccounts {
    type Data = ();
    type Response = Vec<Account>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/accounts".into()
    }
}
