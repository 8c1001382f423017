use super::{Ack, RecordId, amount};
use crate::macros::setter;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Method, Request, RequestData};

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: RecordId,
    pub account_id: RecordId,
    pub description: Option<String>,
    /// Always a non-negative magnitude; direction comes from `txn_type`
    #[serde(deserialize_with = "amount::deserialize")]
    pub amount: f64,
    #[serde(alias = "type")]
    pub txn_type: TxnType,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl Transaction {
    pub fn is_credit(&self) -> bool {
        self.txn_type == TxnType::Credit
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnType {
    #[default]
    Credit,
    Debit,
    /// Anything the backend reports that is neither credit nor debit
    #[serde(other)]
    Other,
}

impl TxnType {
    /// Flip between credit and debit (used by the add-transaction form)
    pub fn toggled(self) -> Self {
        match self {
            Self::Credit => Self::Debit,
            Self::Debit | Self::Other => Self::Credit,
        }
    }
}

impl std::fmt::Display for TxnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Credit => write!(f, "Credit"),
            Self::Debit => write!(f, "Debit"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// Backend aggregate of spend grouped by category label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummaryRow {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(alias = "amount", alias = "value", deserialize_with = "amount::deserialize")]
    pub total: f64,
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListTransactions;

impl Request for ListTransactions {
    type Data = ();
    type Response = Vec<Transaction>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/transactions".into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListAccountTransactions {
    account_id: RecordId,
}

impl ListAccountTransactions {
    pub fn new(account_id: RecordId) -> Self {
        Self { account_id }
    }
}

impl Request for ListAccountTransactions {
    type Data = ();
    type Response = Vec<Transaction>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/transactions/{}", self.account_id).into()
    }
}

#[derive(Default, Debug, Clone, Serialize)]
pub struct GetCategorySummary;

impl Request for GetCategorySummary {
    type Data = ();
    type Response = Vec<CategorySummaryRow>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/transactions/category-summary".into()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct CreateTransaction {
    transaction: NewTransaction,
}

impl CreateTransaction {
    pub fn new(account_id: RecordId, amount: f64, txn_type: TxnType) -> Self {
        Self {
            transaction: NewTransaction {
                account_id,
                description: String::new(),
                amount,
                txn_type,
            },
        }
    }

    pub fn from_new(transaction: NewTransaction) -> Self {
        Self { transaction }
    }

    setter!(transaction.description: String);
}

impl Request for CreateTransaction {
    type Data = Self;
    type Response = Ack;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/transactions".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub account_id: RecordId,
    pub description: String,
    pub amount: f64,
    pub txn_type: TxnType,
}
