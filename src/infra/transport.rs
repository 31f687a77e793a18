//! Shared HTTP plumbing for the remote content sources.

use std::time::Duration;

use reqwest::{Client, Response, Url, header};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::application::source::SourceError;
use crate::infra::error::InfraError;

#[derive(Clone, Debug)]
pub struct JsonTransport {
    client: Client,
    bearer: Option<String>,
}

impl JsonTransport {
    pub fn new(timeout: Duration, bearer: Option<String>) -> Result<Self, InfraError> {
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(timeout)
            .build()
            .map_err(|err| InfraError::http_client(err.to_string()))?;
        Ok(Self { client, bearer })
    }

    pub fn user_agent() -> &'static str {
        concat!("recompile/", env!("CARGO_PKG_VERSION"))
    }

    /// GET `url` with `query` appended and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        mut url: Url,
        query: &[(&str, String)],
    ) -> Result<T, SourceError> {
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        debug!(
            target = "recompile::infra::transport",
            path = url.path(),
            query = url.query().unwrap_or(""),
            "GET content"
        );

        let mut request = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json");
        if let Some(token) = &self.bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(SourceError::transport)?;
        Self::handle(response).await
    }

    async fn handle<T: DeserializeOwned>(response: Response) -> Result<T, SourceError> {
        let status = response.status();
        let bytes = response.bytes().await.map_err(SourceError::transport)?;
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
        serde_json::from_slice(&bytes).map_err(SourceError::decode)
    }
}
