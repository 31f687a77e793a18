//! Client for the same-origin content proxy served by `recompile serve`.

use async_trait::async_trait;
use recompile_content_types::{ContentQuery, EntryCollection, ProxyEnvelope};
use reqwest::Url;

use crate::application::source::{ContentSource, SourceError};
use crate::infra::transport::JsonTransport;

/// Fetches raw collections through the proxy, so no delivery token is needed client-side.
#[derive(Clone, Debug)]
pub struct ProxySource {
    transport: JsonTransport,
    endpoint: Url,
}

impl ProxySource {
    pub fn new(transport: JsonTransport, endpoint: Url) -> Self {
        Self {
            transport,
            endpoint,
        }
    }
}

#[async_trait]
impl ContentSource for ProxySource {
    fn name(&self) -> &'static str {
        "proxy"
    }

    async fn fetch(&self, query: &ContentQuery) -> Result<EntryCollection, SourceError> {
        let params = query.to_proxy_params();
        let mut pairs = vec![("type", params.kind)];
        if let Some(slug) = params.slug {
            pairs.push(("slug", slug));
        }
        if let Some(limit) = params.limit {
            pairs.push(("limit", limit.to_string()));
        }

        let envelope: ProxyEnvelope<EntryCollection> = self
            .transport
            .get_json(self.endpoint.clone(), &pairs)
            .await?;
        Ok(envelope.data)
    }
}
