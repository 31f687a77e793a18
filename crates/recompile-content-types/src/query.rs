use thiserror::Error;

use crate::proxy::ProxyParams;

/// Candidate pool size used by the proxy when a `related` request omits `limit`.
pub const DEFAULT_RELATED_POOL: usize = 7;

const SITE_SETTINGS_TYPE: &str = "siteSettings";
const BLOG_POST_TYPE: &str = "blogPost";
const RESUME_TYPE: &str = "resume";
const NEWEST_FIRST: &str = "-fields.publishDate";
const LINK_DEPTH: &str = "2";

/// One content request, independent of the transport that carries it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentQuery {
    SiteSettings,
    Posts,
    PostBySlug { slug: String },
    RelatedCandidates { exclude_slug: String, limit: usize },
    Resume,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("unknown content type `{0}`")]
    UnknownKind(String),
    #[error("content type `{kind}` requires `{param}`")]
    MissingParam {
        kind: &'static str,
        param: &'static str,
    },
    #[error("`limit` must be greater than zero")]
    ZeroLimit,
}

impl ContentQuery {
    /// Discriminator sent to the content proxy as `type`.
    pub fn kind(&self) -> &'static str {
        match self {
            ContentQuery::SiteSettings => "siteSettings",
            ContentQuery::Posts => "posts",
            ContentQuery::PostBySlug { .. } => "post",
            ContentQuery::RelatedCandidates { .. } => "related",
            ContentQuery::Resume => "resume",
        }
    }

    /// Query parameters for the Delivery API `/entries` endpoint.
    pub fn delivery_params(&self) -> Vec<(&'static str, String)> {
        match self {
            ContentQuery::SiteSettings => vec![
                ("content_type", SITE_SETTINGS_TYPE.to_string()),
                ("limit", "1".to_string()),
            ],
            ContentQuery::Posts => vec![
                ("content_type", BLOG_POST_TYPE.to_string()),
                ("order", NEWEST_FIRST.to_string()),
                ("include", LINK_DEPTH.to_string()),
            ],
            ContentQuery::PostBySlug { slug } => vec![
                ("content_type", BLOG_POST_TYPE.to_string()),
                ("fields.slug", slug.clone()),
                ("include", LINK_DEPTH.to_string()),
            ],
            ContentQuery::RelatedCandidates {
                exclude_slug,
                limit,
            } => vec![
                ("content_type", BLOG_POST_TYPE.to_string()),
                ("fields.slug[ne]", exclude_slug.clone()),
                ("order", NEWEST_FIRST.to_string()),
                ("include", LINK_DEPTH.to_string()),
                ("limit", limit.to_string()),
            ],
            ContentQuery::Resume => vec![
                ("content_type", RESUME_TYPE.to_string()),
                ("limit", "1".to_string()),
            ],
        }
    }

    pub fn to_proxy_params(&self) -> ProxyParams {
        let mut params = ProxyParams {
            kind: self.kind().to_string(),
            ..ProxyParams::default()
        };
        match self {
            ContentQuery::PostBySlug { slug } => params.slug = Some(slug.clone()),
            ContentQuery::RelatedCandidates {
                exclude_slug,
                limit,
            } => {
                params.slug = Some(exclude_slug.clone());
                params.limit = Some(*limit);
            }
            ContentQuery::SiteSettings | ContentQuery::Posts | ContentQuery::Resume => {}
        }
        params
    }

    pub fn from_proxy_params(params: &ProxyParams) -> Result<Self, QueryError> {
        let query = match params.kind.as_str() {
            "siteSettings" => ContentQuery::SiteSettings,
            "posts" => ContentQuery::Posts,
            "resume" => ContentQuery::Resume,
            "post" => ContentQuery::PostBySlug {
                slug: required_slug(params, "post")?,
            },
            "related" => {
                let limit = params.limit.unwrap_or(DEFAULT_RELATED_POOL);
                if limit == 0 {
                    return Err(QueryError::ZeroLimit);
                }
                ContentQuery::RelatedCandidates {
                    exclude_slug: required_slug(params, "related")?,
                    limit,
                }
            }
            other => return Err(QueryError::UnknownKind(other.to_string())),
        };
        Ok(query)
    }
}

fn required_slug(params: &ProxyParams, kind: &'static str) -> Result<String, QueryError> {
    params
        .slug
        .as_deref()
        .map(str::trim)
        .filter(|slug| !slug.is_empty())
        .map(str::to_string)
        .ok_or(QueryError::MissingParam {
            kind,
            param: "slug",
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn related_query_survives_the_proxy_hop() {
        let query = ContentQuery::RelatedCandidates {
            exclude_slug: "intro-to-rag".to_string(),
            limit: 7,
        };
        let params = query.to_proxy_params();
        assert_eq!(params.kind, "related");
        assert_eq!(params.slug.as_deref(), Some("intro-to-rag"));
        assert_eq!(ContentQuery::from_proxy_params(&params), Ok(query));
    }

    #[test]
    fn post_lookup_filters_by_slug() {
        let params = ContentQuery::PostBySlug {
            slug: "hello".to_string(),
        }
        .delivery_params();
        assert!(params.contains(&("fields.slug", "hello".to_string())));
        assert!(params.contains(&("content_type", "blogPost".to_string())));
    }

    #[test]
    fn proxy_rejects_missing_slug_and_unknown_kind() {
        let params = ProxyParams {
            kind: "post".to_string(),
            slug: Some("  ".to_string()),
            limit: None,
        };
        assert_eq!(
            ContentQuery::from_proxy_params(&params),
            Err(QueryError::MissingParam {
                kind: "post",
                param: "slug"
            })
        );

        let params = ProxyParams {
            kind: "authors".to_string(),
            ..ProxyParams::default()
        };
        assert_eq!(
            ContentQuery::from_proxy_params(&params),
            Err(QueryError::UnknownKind("authors".to_string()))
        );
    }

    #[test]
    fn related_defaults_pool_size() {
        let params = ProxyParams {
            kind: "related".to_string(),
            slug: Some("a".to_string()),
            limit: None,
        };
        assert_eq!(
            ContentQuery::from_proxy_params(&params),
            Ok(ContentQuery::RelatedCandidates {
                exclude_slug: "a".to_string(),
                limit: DEFAULT_RELATED_POOL,
            })
        );
    }
}
