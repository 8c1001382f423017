pub mod endpoints;
mod error;
mod macros;
pub mod repositories;

pub use crate::error::ApiError;
use repositories::*;
use tower_api_client::{Client as ApiClient, Request as ApiRequest};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

const UPLOAD_CSV_PATH: &str = "/transactions/upload-csv";

/// Client for the finance backend. JSON endpoints go through typed
/// [`ApiRequest`]s; CSV import is a multipart upload on its own path.
pub struct Client {
    inner: ApiClient,
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        Self {
            inner: ApiClient::new(base_url),
            http: reqwest::Client::new(),
            base_url: base_url.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn send<R>(&self, request: R) -> Result<R::Response, ApiError>
    where
        R: ApiRequest,
    {
        let path = request.endpoint().into_owned();
        self.inner
            .send(request)
            .await
            .map_err(|e| ApiError::from_client(path, e))
    }

    /// Upload a CSV statement as multipart field `file`. All-or-nothing from
    /// the caller's point of view; partial imports are a backend concern.
    pub async fn upload_csv(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<serde_json::Value, ApiError> {
        let part = reqwest::multipart::Part::bytes(contents)
            .file_name(file_name.to_string())
            .mime_str("text/csv")
            .map_err(|e| ApiError::from_reqwest(UPLOAD_CSV_PATH, e))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(format!("{}{}", self.base_url, UPLOAD_CSV_PATH))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(UPLOAD_CSV_PATH, e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                path: UPLOAD_CSV_PATH.to_string(),
                detail: detail.trim().to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::from_reqwest(UPLOAD_CSV_PATH, e))?;
        if body.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_slice(&body).map_err(|e| ApiError::Network {
            path: UPLOAD_CSV_PATH.to_string(),
            message: e.to_string(),
        })
    }
}

pub struct Request;

impl Request {
    pub fn accounts() -> AccountRepository {
        AccountRepository::new()
    }

    pub fn budgets() -> BudgetRepository {
        BudgetRepository::new()
    }

    pub fn categories() -> CategoryRepository {
        CategoryRepository::new()
    }

    pub fn transactions() -> TransactionRepository {
        TransactionRepository::new()
    }
}
