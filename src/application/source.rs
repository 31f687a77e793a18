//! Content source trait describing delivery transports.

use async_trait::async_trait;
use recompile_content_types::{ContentQuery, EntryCollection};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("content source responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode content response: {0}")]
    Decode(String),
    #[error("invalid content request: {0}")]
    InvalidRequest(String),
}

impl SourceError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Where raw entries come from. Implementations are picked once at startup.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    async fn fetch(&self, query: &ContentQuery) -> Result<EntryCollection, SourceError>;
}
