use super::{Ack, RecordId};
use crate::macros::setter;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Method, Request, RequestData};

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: RecordId,
    pub name: String,
    /// Comma-separated keywords the backend uses for auto-categorization
    #[serde(default)]
    pub keywords: Option<String>,
}

impl Category {
    /// Individual keyword rules, trimmed, with empty entries dropped
    pub fn keyword_list(&self) -> Vec<&str> {
        self.keywords
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .collect()
    }
}

/// Body shared by create and update
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveCategory {
    pub name: String,
    pub keywords: String,
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListCategories;

impl Request for ListCategories {
    type Data = ();
    type Response = Vec<Category>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/categories/".into()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct CreateCategory {
    category: SaveCategory,
}

impl CreateCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            category: SaveCategory {
                name: name.into(),
                keywords: String::new(),
            },
        }
    }

    setter!(category.keywords: String);
}

impl Request for CreateCategory {
    type Data = Self;
    type Response = Ack;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/categories/".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateCategory {
    #[serde(skip)]
    category_id: RecordId,
    #[serde(flatten)]
    category: SaveCategory,
}

impl UpdateCategory {
    pub fn new(category_id: RecordId, name: impl Into<String>) -> Self {
        Self {
            category_id,
            category: SaveCategory {
                name: name.into(),
                keywords: String::new(),
            },
        }
    }

    setter!(category.keywords: String);
}

impl Request for UpdateCategory {
    type Data = Self;
    type Response = Ack;
    const METHOD: Method = Method::PUT;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/categories/{}", self.category_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteCategory {
    category_id: RecordId,
}

impl DeleteCategory {
    pub fn new(category_id: RecordId) -> Self {
        Self { category_id }
    }
}

impl Request for DeleteCategory {
    type Data = ();
    type Response = Ack;
    const METHOD: Method = Method::DELETE;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/categories/{}", self.category_id).into()
    }
}
