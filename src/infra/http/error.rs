use std::error::Error as StdError;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use recompile_content_types::QueryError;
use serde::Serialize;
use thiserror::Error;

use crate::application::source::SourceError;

pub mod codes {
    pub const BAD_REQUEST: &str = "bad_request";
    pub const UPSTREAM: &str = "upstream_error";
    pub const UPSTREAM_DECODE: &str = "upstream_decode";
}

/// Diagnostic detail carried on error responses for the response logger.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub source: &'static str,
    pub status: StatusCode,
    pub messages: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(source: &'static str, status: StatusCode, error: &dyn StdError) -> Self {
        let mut messages = vec![error.to_string()];
        let mut current = error.source();
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        Self {
            source,
            status,
            messages,
        }
    }

    pub fn attach(self, response: &mut Response) {
        response.extensions_mut().insert(self);
    }
}

#[derive(Debug, Serialize)]
pub struct ProxyErrorBody {
    pub error: ProxyErrorMessage,
}

#[derive(Debug, Serialize)]
pub struct ProxyErrorMessage {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("invalid query string: {0}")]
    InvalidQuery(String),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error("upstream request failed: {0}")]
    Upstream(#[source] SourceError),
}

impl ProxyError {
    fn status(&self) -> StatusCode {
        match self {
            ProxyError::InvalidQuery(_) | ProxyError::Query(_) => StatusCode::BAD_REQUEST,
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ProxyError::InvalidQuery(_) | ProxyError::Query(_) => codes::BAD_REQUEST,
            ProxyError::Upstream(SourceError::Decode(_)) => codes::UPSTREAM_DECODE,
            ProxyError::Upstream(_) => codes::UPSTREAM,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ProxyError::InvalidQuery(_) | ProxyError::Query(_) => "Invalid content request",
            ProxyError::Upstream(SourceError::Decode(_)) => "Upstream response could not be read",
            ProxyError::Upstream(_) => "Upstream content request failed",
        }
    }

    fn hint(&self) -> Option<String> {
        match self {
            ProxyError::InvalidQuery(detail) => Some(detail.clone()),
            ProxyError::Query(err) => Some(err.to_string()),
            ProxyError::Upstream(SourceError::Status { status, .. }) => {
                Some(format!("upstream responded with status {status}"))
            }
            ProxyError::Upstream(_) => None,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ProxyErrorBody {
            error: ProxyErrorMessage {
                code: self.code().to_string(),
                message: self.message().to_string(),
                hint: self.hint(),
            },
        };
        let report = ErrorReport::from_error("infra::http::content", status, &self);
        let mut response = (status, Json(body)).into_response();
        report.attach(&mut response);
        response
    }
}
