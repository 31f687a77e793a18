//! Startup selection of the content source.

use std::sync::Arc;

use tracing::info;

use crate::application::fallback::FallbackSource;
use crate::application::source::ContentSource;
use crate::config::{ContentMode, ContentSettings, Transport};
use crate::infra::delivery::DeliverySource;
use crate::infra::error::InfraError;
use crate::infra::proxy::ProxySource;
use crate::infra::transport::JsonTransport;

/// Build the source named by the settings, checking that its credentials are present.
pub fn build_source(settings: &ContentSettings) -> Result<Arc<dyn ContentSource>, InfraError> {
    let source: Arc<dyn ContentSource> = match (settings.mode, settings.transport) {
        (ContentMode::Mock, _) => Arc::new(FallbackSource),
        (ContentMode::Live, Transport::Direct) => {
            let space_id = settings.space_id.as_deref().ok_or_else(|| {
                InfraError::configuration(
                    "content.space_id is required for live direct mode (set CONTENTFUL_SPACE_ID or use --mode mock)",
                )
            })?;
            let token = settings.access_token.clone().ok_or_else(|| {
                InfraError::configuration(
                    "content.access_token is required for live direct mode (set CONTENTFUL_ACCESS_TOKEN or use --mode mock)",
                )
            })?;
            let transport = JsonTransport::new(settings.timeout, Some(token))?;
            Arc::new(DeliverySource::new(
                transport,
                &settings.delivery_url,
                space_id,
                &settings.environment,
            )?)
        }
        (ContentMode::Live, Transport::Proxy) => {
            let endpoint = settings.proxy_url.clone().ok_or_else(|| {
                InfraError::configuration("content.proxy_url is required for proxy transport")
            })?;
            let transport = JsonTransport::new(settings.timeout, None)?;
            Arc::new(ProxySource::new(transport, endpoint))
        }
    };

    info!(
        target = "recompile::infra::sources",
        source = source.name(),
        environment = %settings.environment,
        "Content source selected"
    );
    Ok(source)
}
