//! Page-level loaders that combine several gateway accessors into one view.

use serde::Serialize;

use crate::application::gateway::ContentGateway;
use crate::application::generation::RequestGenerations;
use crate::domain::entities::{Footer, Hero, Post, SiteSettings};
use crate::domain::posts::{MonthGroup, month_timeline};

/// Site-wide strings shared by every page, loaded once per view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageChrome {
    pub settings: SiteSettings,
    pub footer: Footer,
}

impl PageChrome {
    pub async fn load(gateway: &ContentGateway) -> Self {
        let settings = gateway.site_settings().await;
        let footer = gateway.footer_from(&settings);
        Self { settings, footer }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeView {
    pub hero: Hero,
    pub posts: Vec<Post>,
    pub timeline: Vec<MonthGroup>,
    pub chrome: PageChrome,
}

impl HomeView {
    pub async fn load(gateway: &ContentGateway) -> Self {
        let (hero, posts, chrome) =
            tokio::join!(gateway.hero(), gateway.posts(), PageChrome::load(gateway));
        let timeline = month_timeline(&posts);
        Self {
            hero,
            posts,
            timeline,
            chrome,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostView {
    pub slug: String,
    pub post: Option<Post>,
    pub related: Vec<Post>,
    pub chrome: PageChrome,
}

/// Result of a navigation: the loaded view, or nothing when a newer navigation overtook it.
#[derive(Debug, Clone, PartialEq)]
pub enum Navigation<T> {
    Current(T),
    Superseded,
}

impl<T> Navigation<T> {
    pub fn into_current(self) -> Option<T> {
        match self {
            Navigation::Current(view) => Some(view),
            Navigation::Superseded => None,
        }
    }
}

/// Opens post views; only the most recently opened one is reported as current.
pub struct PostNavigator {
    gateway: ContentGateway,
    generations: RequestGenerations,
}

impl PostNavigator {
    pub fn new(gateway: ContentGateway) -> Self {
        Self {
            gateway,
            generations: RequestGenerations::new(),
        }
    }

    pub async fn open(&self, slug: &str, related_limit: usize) -> Navigation<PostView> {
        let generation = self.generations.begin();

        let (post, chrome) = tokio::join!(
            self.gateway.post_by_slug(slug),
            PageChrome::load(&self.gateway)
        );
        if !self.generations.is_current(generation) {
            tracing::debug!(
                target = "recompile::application::views",
                slug,
                generation = generation.value(),
                "Discarding superseded post navigation"
            );
            return Navigation::Superseded;
        }

        let related = match &post {
            Some(post) => {
                self.gateway
                    .related_posts(&post.slug, &post.tags, related_limit)
                    .await
            }
            None => Vec::new(),
        };
        if !self.generations.is_current(generation) {
            return Navigation::Superseded;
        }

        Navigation::Current(PostView {
            slug: slug.to_string(),
            post,
            related,
            chrome,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use recompile_content_types::{ContentQuery, EntryCollection};
    use tokio::sync::Notify;

    use super::*;
    use crate::application::fallback::{FallbackContent, FallbackSource};
    use crate::application::source::{ContentSource, SourceError};

    /// Holds `post` queries for the slug `slow` until released; everything else is empty.
    struct GatedSource {
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl ContentSource for GatedSource {
        fn name(&self) -> &'static str {
            "gated"
        }

        async fn fetch(&self, query: &ContentQuery) -> Result<EntryCollection, SourceError> {
            if matches!(query, ContentQuery::PostBySlug { slug } if slug == "slow") {
                self.entered.notify_one();
                self.release.notified().await;
            }
            Ok(EntryCollection::default())
        }
    }

    fn fallback_gateway() -> ContentGateway {
        ContentGateway::new(Arc::new(FallbackSource), Arc::new(FallbackContent::default()))
    }

    #[tokio::test]
    async fn home_view_joins_hero_posts_and_chrome() {
        let view = HomeView::load(&fallback_gateway()).await;
        let fallback = FallbackContent::default();

        assert_eq!(view.hero, fallback.hero);
        assert_eq!(view.posts, fallback.posts);
        assert_eq!(view.chrome.footer, fallback.footer);
        assert_eq!(
            view.timeline.iter().map(|group| group.slugs.len()).sum::<usize>(),
            fallback.posts.len()
        );
    }

    #[tokio::test]
    async fn post_view_carries_related_posts() {
        let navigator = PostNavigator::new(fallback_gateway());
        let view = navigator
            .open("getting-started-with-llms", 3)
            .await
            .into_current()
            .expect("only navigation is current");

        let post = view.post.expect("fallback post");
        assert_eq!(post.slug, "getting-started-with-llms");
        assert!(view.related.iter().all(|related| related.slug != post.slug));
        assert!(!view.related.is_empty());
    }

    #[tokio::test]
    async fn overtaken_navigation_is_superseded() {
        let source = Arc::new(GatedSource {
            entered: Notify::new(),
            release: Notify::new(),
        });
        let gateway = ContentGateway::new(source.clone(), Arc::new(FallbackContent::default()));
        let navigator = Arc::new(PostNavigator::new(gateway));

        let slow = tokio::spawn({
            let navigator = navigator.clone();
            async move { navigator.open("slow", 3).await }
        });
        source.entered.notified().await;

        let fast = navigator.open("recompiling-a-career", 3).await;
        assert!(matches!(fast, Navigation::Current(_)));

        source.release.notify_one();
        let slow = slow.await.expect("navigation task");
        assert_eq!(slow, Navigation::Superseded);
    }
}
