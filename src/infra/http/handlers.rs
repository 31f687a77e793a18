use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use recompile_content_types::{ContentQuery, EntryCollection, ProxyEnvelope, ProxyParams};

use super::ProxyState;
use super::error::ProxyError;

pub async fn content(
    State(state): State<ProxyState>,
    params: Result<Query<ProxyParams>, QueryRejection>,
) -> Result<Json<ProxyEnvelope<EntryCollection>>, ProxyError> {
    let Query(params) = params.map_err(|rejection| ProxyError::InvalidQuery(rejection.body_text()))?;
    let query = ContentQuery::from_proxy_params(&params)?;
    let data = state
        .source
        .fetch(&query)
        .await
        .map_err(ProxyError::Upstream)?;
    Ok(Json(ProxyEnvelope { data }))
}

pub async fn health() -> StatusCode {
    StatusCode::NO_CONTENT
}
