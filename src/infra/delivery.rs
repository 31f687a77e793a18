//! Contentful Delivery API source.

use async_trait::async_trait;
use recompile_content_types::{ContentQuery, EntryCollection};
use reqwest::Url;

use crate::application::source::{ContentSource, SourceError};
use crate::infra::error::InfraError;
use crate::infra::transport::JsonTransport;

/// Reads published entries straight from the CDN with a delivery token.
#[derive(Clone, Debug)]
pub struct DeliverySource {
    transport: JsonTransport,
    entries_url: Url,
}

impl DeliverySource {
    pub fn new(
        transport: JsonTransport,
        base: &Url,
        space_id: &str,
        environment: &str,
    ) -> Result<Self, InfraError> {
        let entries_url = entries_url(base, space_id, environment)?;
        Ok(Self {
            transport,
            entries_url,
        })
    }

    pub fn entries_url(&self) -> &Url {
        &self.entries_url
    }
}

fn entries_url(base: &Url, space_id: &str, environment: &str) -> Result<Url, InfraError> {
    let mut url = base.clone();
    url.set_query(None);
    url.path_segments_mut()
        .map_err(|_| {
            InfraError::configuration(format!("delivery URL `{base}` cannot carry a path"))
        })?
        .pop_if_empty()
        .extend(["spaces", space_id, "environments", environment, "entries"]);
    Ok(url)
}

#[async_trait]
impl ContentSource for DeliverySource {
    fn name(&self) -> &'static str {
        "delivery"
    }

    async fn fetch(&self, query: &ContentQuery) -> Result<EntryCollection, SourceError> {
        self.transport
            .get_json(self.entries_url.clone(), &query.delivery_params())
            .await
    }
}
