//! Content gateway: named accessors over a [`ContentSource`], settled against fallback content.

use std::{sync::Arc, time::Instant};

use metrics::{counter, histogram};
use recompile_content_types::ContentQuery;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::application::fallback::FallbackContent;
use crate::application::source::{ContentSource, SourceError};
use crate::domain::entities::{
    ContactPage, Derived, Footer, Hero, Post, ResumePage, SiteSettings, TagRef,
};
use crate::domain::posts::select_related;
use crate::domain::resolve::{ResolvedRecord, resolve_links};

pub const METRIC_CONTENT_REQUESTS: &str = "recompile_content_requests_total";
pub const METRIC_CONTENT_FETCH_MS: &str = "recompile_content_fetch_ms";

/// Extra candidates requested beyond the related-post limit, since tag filtering happens locally.
const RELATED_HEADROOM: usize = 5;

/// Largest page the Delivery API accepts for `limit`.
const DELIVERY_PAGE_LIMIT: usize = 1000;

#[derive(Debug, Error)]
enum ContentError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("no matching entries")]
    Empty,
    #[error("entry could not be decoded: {0}")]
    Decode(String),
}

impl ContentError {
    fn outcome(&self) -> &'static str {
        match self {
            ContentError::Empty => "empty",
            ContentError::Source(_) | ContentError::Decode(_) => "failed",
        }
    }
}

#[derive(Clone)]
pub struct ContentGateway {
    source: Arc<dyn ContentSource>,
    fallback: Arc<FallbackContent>,
}

impl ContentGateway {
    pub fn new(source: Arc<dyn ContentSource>, fallback: Arc<FallbackContent>) -> Self {
        Self { source, fallback }
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    pub fn fallback(&self) -> &FallbackContent {
        &self.fallback
    }

    pub async fn hero(&self) -> Hero {
        let started = Instant::now();
        let result = self
            .fetch_first::<SiteSettings>(&ContentQuery::SiteSettings)
            .await
            .map(|settings| report_missing("hero", settings.hero_or(&self.fallback.hero)));
        self.settle("hero", started, result, || self.fallback.hero.clone())
    }

    pub async fn posts(&self) -> Vec<Post> {
        let started = Instant::now();
        let result = self.fetch_list::<Post>("posts", &ContentQuery::Posts).await;
        self.settle("posts", started, result, || self.fallback.posts.clone())
    }

    /// The post whose slug is exactly `slug`, from the live source or the fallback list.
    pub async fn post_by_slug(&self, slug: &str) -> Option<Post> {
        let started = Instant::now();
        let query = ContentQuery::PostBySlug {
            slug: slug.to_string(),
        };
        let result = self
            .fetch_list::<Post>("post_by_slug", &query)
            .await
            .and_then(|posts| {
                posts
                    .into_iter()
                    .find(|post| post.slug == slug)
                    .map(Some)
                    .ok_or(ContentError::Empty)
            });
        self.settle("post_by_slug", started, result, || {
            self.fallback.find_post(slug)
        })
    }

    pub async fn footer(&self) -> Footer {
        let started = Instant::now();
        let result = self
            .fetch_first::<SiteSettings>(&ContentQuery::SiteSettings)
            .await
            .map(|settings| self.footer_from(&settings));
        self.settle("footer", started, result, || self.fallback.footer.clone())
    }

    pub async fn site_settings(&self) -> SiteSettings {
        let started = Instant::now();
        let result = self
            .fetch_first::<SiteSettings>(&ContentQuery::SiteSettings)
            .await;
        self.settle("site_settings", started, result, || {
            self.fallback.settings.clone()
        })
    }

    pub async fn resume_page(&self) -> Option<ResumePage> {
        let started = Instant::now();
        let result = self
            .fetch_first::<ResumePage>(&ContentQuery::Resume)
            .await
            .map(Some);
        self.settle("resume_page", started, result, || {
            self.fallback.resume.clone()
        })
    }

    pub async fn contact_page(&self) -> ContactPage {
        let started = Instant::now();
        let result = self
            .fetch_first::<SiteSettings>(&ContentQuery::SiteSettings)
            .await
            .map(|settings| {
                report_missing(
                    "contact_page",
                    settings.contact_page_or(&self.fallback.contact),
                )
            });
        self.settle("contact_page", started, result, || {
            self.fallback.contact.clone()
        })
    }

    /// Up to `limit` posts sharing a tag with `tags`, never the post identified by `slug`.
    pub async fn related_posts(&self, slug: &str, tags: &[TagRef], limit: usize) -> Vec<Post> {
        if limit == 0 || tags.iter().all(|tag| tag.slug().is_none()) {
            debug!(
                target = "recompile::application::gateway",
                slug, limit, "Skipping related posts lookup without tags or limit"
            );
            return Vec::new();
        }

        let started = Instant::now();
        let query = ContentQuery::RelatedCandidates {
            exclude_slug: slug.to_string(),
            limit: limit
                .saturating_add(RELATED_HEADROOM)
                .min(DELIVERY_PAGE_LIMIT),
        };
        let result = self
            .fetch_list::<Post>("related_posts", &query)
            .await
            .map(|candidates| select_related(candidates, slug, tags, limit));
        self.settle("related_posts", started, result, || {
            select_related(self.fallback.posts.iter().cloned(), slug, tags, limit)
        })
    }

    /// Footer derived from an already loaded settings record.
    pub fn footer_from(&self, settings: &SiteSettings) -> Footer {
        report_missing("footer", settings.footer_or(&self.fallback.footer))
    }

    async fn fetch_records(&self, query: &ContentQuery) -> Result<Vec<ResolvedRecord>, ContentError> {
        let collection = self.source.fetch(query).await?;
        if collection.is_empty() {
            return Err(ContentError::Empty);
        }
        Ok(resolve_links(&collection.items, &collection.includes))
    }

    async fn fetch_first<T: DeserializeOwned>(&self, query: &ContentQuery) -> Result<T, ContentError> {
        let record = self
            .fetch_records(query)
            .await?
            .into_iter()
            .next()
            .ok_or(ContentError::Empty)?;
        serde_json::from_value(Value::Object(record))
            .map_err(|err| ContentError::Decode(err.to_string()))
    }

    async fn fetch_list<T: DeserializeOwned>(
        &self,
        accessor: &'static str,
        query: &ContentQuery,
    ) -> Result<Vec<T>, ContentError> {
        let records = self.fetch_records(query).await?;
        let total = records.len();
        let decoded: Vec<T> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| {
                serde_json::from_value(Value::Object(record))
                    .map_err(|err| {
                        warn!(
                            target = "recompile::application::gateway",
                            accessor,
                            index,
                            error = %err,
                            "Skipping entry that does not decode"
                        );
                    })
                    .ok()
            })
            .collect();

        if decoded.is_empty() {
            debug!(
                target = "recompile::application::gateway",
                accessor, total, "No entries decoded"
            );
            return Err(ContentError::Empty);
        }
        Ok(decoded)
    }

    /// The single place where a failed or empty fetch turns into fallback content.
    fn settle<T>(
        &self,
        accessor: &'static str,
        started: Instant,
        result: Result<T, ContentError>,
        fallback: impl FnOnce() -> T,
    ) -> T {
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        histogram!(METRIC_CONTENT_FETCH_MS, "accessor" => accessor).record(elapsed_ms);

        let outcome = match &result {
            Ok(_) => "live",
            Err(err) => err.outcome(),
        };
        counter!(
            METRIC_CONTENT_REQUESTS,
            "accessor" => accessor,
            "outcome" => outcome
        )
        .increment(1);

        match result {
            Ok(value) => value,
            Err(ContentError::Empty) => {
                debug!(
                    target = "recompile::application::gateway",
                    accessor,
                    source = self.source.name(),
                    "No live content, serving fallback"
                );
                fallback()
            }
            Err(err) => {
                warn!(
                    target = "recompile::application::gateway",
                    accessor,
                    source = self.source.name(),
                    error = %err,
                    "Content fetch failed, serving fallback"
                );
                fallback()
            }
        }
    }
}

fn report_missing<T>(accessor: &'static str, derived: Derived<T>) -> T {
    if !derived.missing.is_empty() {
        warn!(
            target = "recompile::application::gateway",
            accessor,
            missing = ?derived.missing,
            "Site settings missing fields, using fallback values"
        );
    }
    derived.value
}
