use tower_api_client::Error as ClientError;

/// Failure of a single backend call. Both variants carry the request path so
/// callers can report which endpoint failed.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Transport, connectivity or response-decoding failure
    Network { path: String, message: String },
    /// The backend answered with a non-2xx status
    HttpStatus {
        status: u16,
        path: String,
        detail: String,
    },
}

impl ApiError {
    pub(crate) fn from_client(path: impl Into<String>, error: ClientError) -> Self {
        let path = path.into();
        match error {
            ClientError::ClientError(status, detail) | ClientError::ServerError(status, detail) => {
                ApiError::HttpStatus {
                    status: status.as_u16(),
                    path,
                    detail: extract_detail(&detail),
                }
            }
            e => ApiError::Network {
                path,
                message: e.to_string(),
            },
        }
    }

    pub(crate) fn from_reqwest(path: impl Into<String>, error: reqwest::Error) -> Self {
        let path = path.into();
        match error.status() {
            Some(status) => ApiError::HttpStatus {
                status: status.as_u16(),
                path,
                detail: error.to_string(),
            },
            None => ApiError::Network {
                path,
                message: error.to_string(),
            },
        }
    }

    pub fn path(&self) -> &str {
        match self {
            ApiError::Network { path, .. } | ApiError::HttpStatus { path, .. } => path,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus { status, .. } => Some(*status),
            ApiError::Network { .. } => None,
        }
    }
}

/// FastAPI-style backends wrap errors as `{"detail": ...}`; fall back to the raw body.
fn extract_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| match value.get("detail") {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
            None => None,
        })
        .unwrap_or_else(|| body.trim().to_string())
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Network { path, message } => {
                write!(f, "Network error on {}: {}", path, message)
            }
            ApiError::HttpStatus {
                status,
                path,
                detail,
            } => {
                if detail.is_empty() {
                    write!(f, "({}) {}", status, path)
                } else {
                    write!(f, "({}) {}: {}", status, path, detail)
                }
            }
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_detail_from_json() {
        assert_eq!(
            extract_detail(r#"{"detail": "Category already exists"}"#),
            "Category already exists"
        );
    }

    #[test]
    fn test_extract_detail_falls_back_to_body() {
        assert_eq!(extract_detail("Internal Server Error\n"), "Internal Server Error");
    }

    #[test]
    fn test_display_http_status() {
        let err = ApiError::HttpStatus {
            status: 404,
            path: "/categories/9".to_string(),
            detail: "Not found".to_string(),
        };
        assert_eq!(err.to_string(), "(404) /categories/9: Not found");
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.path(), "/categories/9");
    }

    #[test]
    fn test_display_network() {
        let err = ApiError::Network {
            path: "/accounts".to_string(),
            message: "connection refused".to_string(),
        };
        assert_eq!(err.to_string(), "Network error on /accounts: connection refused");
        assert_eq!(err.status(), None);
    }
}
