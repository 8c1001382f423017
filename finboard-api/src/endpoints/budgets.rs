use super::{Ack, RecordId, amount};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Method, Request, RequestData};

// Common

/// Monthly spending limit for a category. `spent_amount` and `warning` are
/// computed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: RecordId,
    pub category: String,
    #[serde(deserialize_with = "amount::deserialize")]
    pub limit_amount: f64,
    pub month: u32,
    pub year: i32,
    #[serde(default, deserialize_with = "amount::deserialize_opt")]
    pub spent_amount: Option<f64>,
    #[serde(default)]
    pub warning: Option<String>,
}

impl Budget {
    pub fn spent(&self) -> f64 {
        self.spent_amount.unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBudget {
    pub category: String,
    pub limit_amount: f64,
    pub month: u32,
    pub year: i32,
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListBudgets;

impl Request for ListBudgets {
    type Data = ();
    type Response = Vec<Budget>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/budgets/".into()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct CreateBudget {
    budget: NewBudget,
}

impl CreateBudget {
    pub fn new(budget: NewBudget) -> Self {
        Self { budget }
    }
}

impl Request for CreateBudget {
    type Data = Self;
    type Response = Ack;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/budgets/".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteBudget {
    budget_id: RecordId,
}

impl DeleteBudget {
    pub fn new(budget_id: RecordId) -> Self {
        Self { budget_id }
    }
}

impl Request for DeleteBudget {
    type Data = ();
    type Response = Ack;
    const METHOD: Method = Method::DELETE;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/budgets/{}", self.budget_id).into()
    }
}
