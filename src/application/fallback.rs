//! Static content served whenever the live source fails or comes back empty.

use async_trait::async_trait;
use recompile_content_types::{ContentQuery, EntryCollection};
use serde_json::{Map, Value, json};

use crate::application::source::{ContentSource, SourceError};
use crate::domain::entities::{
    ContactPage, Footer, Hero, Post, ResumePage, ResumeRole, SiteSettings, SkillGroup, Tag,
};

/// Every fallback record, in the same shapes the live path produces.
#[derive(Debug, Clone)]
pub struct FallbackContent {
    pub hero: Hero,
    pub posts: Vec<Post>,
    pub footer: Footer,
    pub settings: SiteSettings,
    pub contact: ContactPage,
    pub resume: Option<ResumePage>,
}

impl FallbackContent {
    pub fn find_post(&self, slug: &str) -> Option<Post> {
        self.posts.iter().find(|post| post.slug == slug).cloned()
    }
}

impl Default for FallbackContent {
    fn default() -> Self {
        Self {
            hero: Hero {
                title: "Welcome to Please Recompile".to_string(),
                subtitle: "Software architecture is evolving. AI is making code cheaper and faster to write; the real value now is in vision, planning, and building systems that last. I'm here for it, join me as I recompile.".to_string(),
            },
            posts: fallback_posts(),
            footer: Footer {
                copyright: "© 2026 Please Recompile".to_string(),
                tagline: "rebuilding how I build".to_string(),
            },
            settings: SiteSettings::from_pairs([
                ("logoText", "// please recompile"),
                ("heroBadgeText", "Currently recompiling"),
                ("backToPostsText", "Back"),
                ("relatedPostsTitle", "Related"),
                ("notFoundTitle", "Page Not Found"),
                ("notFoundMessage", "The page you're looking for doesn't exist."),
                ("loadingText", "Loading..."),
                ("navBlogLabel", "blog"),
                ("navResumeLabel", "resume"),
                ("navContactLabel", "contact"),
                ("contactEmail", "davidarector@gmail.com"),
                ("githubUrl", "https://github.com/jonesopolis"),
                ("linkedinUrl", "https://linkedin.com/in/davidarector"),
            ]),
            contact: ContactPage {
                page_title: "Contact".to_string(),
                page_subtitle: "Let's connect".to_string(),
                seo_title: "contact | please recompile".to_string(),
                intro_text: "Still recompiling. Happy to talk about it. Whether it's AI, architecture, or just swapping ideas, reach out.".to_string(),
            },
            resume: Some(fallback_resume()),
        }
    }
}

fn paragraph_document(text: &str) -> Value {
    json!({
        "nodeType": "document",
        "data": {},
        "content": [{
            "nodeType": "paragraph",
            "data": {},
            "content": [{"nodeType": "text", "value": text, "marks": [], "data": {}}]
        }]
    })
}

fn fallback_post(slug: &str, title: &str, hook: &str, body: &str, date: &str, tags: &[(&str, &str)]) -> Post {
    Post {
        slug: slug.to_string(),
        title: title.to_string(),
        publish_date: date.to_string(),
        tags: tags
            .iter()
            .map(|(name, slug)| Tag::new(*name, *slug).into())
            .collect(),
        hook: Some(hook.to_string()),
        excerpt: None,
        content: Some(paragraph_document(body)),
        main_image: None,
        icon_svg: None,
        meta_title: None,
        meta_description: None,
        extra: Map::new(),
    }
}

fn fallback_posts() -> Vec<Post> {
    vec![
        fallback_post(
            "getting-started-with-llms",
            "Getting Started with LLMs",
            "How LLMs actually work, explained in terms I wish someone had told me earlier.",
            "Large Language Models have revolutionized how we think about AI.",
            "2024-12-15",
            &[("AI", "ai")],
        ),
        fallback_post(
            "architecture-outlives-code",
            "Architecture Outlives Code",
            "When code gets cheap, the decisions around it get expensive.",
            "Generated code is disposable. The boundaries it lives inside are not.",
            "2024-11-30",
            &[("Architecture", "architecture"), ("AI", "ai")],
        ),
        fallback_post(
            "recompiling-a-career",
            "Recompiling a Career",
            "Fourteen years in, and the toolchain changed under my feet.",
            "Every few years the build breaks and you learn the new flags.",
            "2024-11-02",
            &[("Career", "career")],
        ),
    ]
}

fn fallback_resume() -> ResumePage {
    ResumePage {
        full_name: "David Rector".to_string(),
        title: "Software Architect & Technical Leader".to_string(),
        location: Some("Castle Rock, Colorado".to_string()),
        phone: None,
        email: Some("davidarector@gmail.com".to_string()),
        linkedin_url: Some("https://linkedin.com/in/davidrector".to_string()),
        website_url: Some("https://codeinspace.io".to_string()),
        pdf_url: Some("/ATS_Resume.pdf".to_string()),
        summary: Some("Software Architect and Technical Leader with 14+ years architecting enterprise-scale .NET solutions in Azure cloud environments.".to_string()),
        achievements: vec![
            "Led $1.9M project portfolio (2023)".to_string(),
            "4x Microsoft Certified Developer".to_string(),
            "Architected solutions serving 500K+ concurrent users".to_string(),
        ],
        experience: vec![
            ResumeRole {
                title: "Web Development Lead / Solutions Architect".to_string(),
                company: "BlueModus".to_string(),
                dates: "2019–2021, 2023–Present".to_string(),
                location: "Denver, CO".to_string(),
                bullets: vec![
                    "Architected enterprise CMS solutions serving 500K+ concurrent users with 99.9% uptime".to_string(),
                ],
            },
            ResumeRole {
                title: "Team Lead & Technical Architect".to_string(),
                company: "Caroogo.com".to_string(),
                dates: "2021–2023".to_string(),
                location: "Louisville, KY".to_string(),
                bullets: vec![
                    "Led a 5-person backend team building an online car-buying platform".to_string(),
                ],
            },
        ],
        skills: vec![
            SkillGroup {
                category: "Architecture & Design".to_string(),
                items: vec![
                    "Microservices".to_string(),
                    "Event-Driven Architecture".to_string(),
                    "Domain-Driven Design".to_string(),
                ],
            },
        ],
        education: Some("University of Kentucky, B.S. Computer Science, May 2012".to_string()),
        certifications: vec![
            "Microsoft Certified Developer – C#".to_string(),
            "Microsoft Certified Developer – Azure".to_string(),
        ],
    }
}

/// Source used in mock mode: every query comes back empty, so the gateway serves fallback content.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackSource;

#[async_trait]
impl ContentSource for FallbackSource {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn fetch(&self, _query: &ContentQuery) -> Result<EntryCollection, SourceError> {
        Ok(EntryCollection::default())
    }
}
