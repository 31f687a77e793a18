//! Domain records decoded from resolved CMS entries (or authored as fallback content).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::{Date, format_description::FormatItem, macros::format_description};

const ISO_DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub name: String,
    pub slug: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
        }
    }
}

/// A post tag as it arrives after resolution: either the tag entry's fields, or the original
/// link when the tag entry was not part of the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagRef {
    Resolved(Tag),
    Unresolved(Value),
}

impl TagRef {
    pub fn slug(&self) -> Option<&str> {
        match self {
            TagRef::Resolved(tag) => Some(tag.slug.as_str()),
            TagRef::Unresolved(_) => None,
        }
    }
}

impl From<Tag> for TagRef {
    fn from(tag: Tag) -> Self {
        TagRef::Resolved(tag)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub publish_date: String,
    #[serde(default)]
    pub tags: Vec<TagRef>,
    #[serde(default)]
    pub hook: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Rich-text document, passed through as delivered.
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub main_image: Option<String>,
    #[serde(default)]
    pub icon_svg: Option<String>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Post {
    pub fn tag_slugs(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().filter_map(TagRef::slug)
    }

    pub fn has_tag(&self, slug: &str) -> bool {
        self.tag_slugs().any(|candidate| candidate == slug)
    }

    /// Calendar day of `publishDate`; accepts a bare date or an ISO timestamp.
    pub fn published_on(&self) -> Option<Date> {
        let day = self.publish_date.get(..10)?;
        Date::parse(day, ISO_DATE_FORMAT).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub title: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footer {
    pub copyright: String,
    pub tagline: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPage {
    pub page_title: String,
    pub page_subtitle: String,
    pub seo_title: String,
    pub intro_text: String,
}

/// Site-wide labels and strings, keyed by CMS field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteSettings {
    values: Map<String, Value>,
}

impl SiteSettings {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let values = pairs
            .into_iter()
            .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
            .collect();
        Self { values }
    }

    /// A non-empty string setting.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn hero_or(&self, fallback: &Hero) -> Derived<Hero> {
        let mut fill = Filler::new(self);
        let hero = Hero {
            title: fill.text("heroTitle", &fallback.title),
            subtitle: fill.text("heroSubtitle", &fallback.subtitle),
        };
        fill.finish(hero)
    }

    pub fn footer_or(&self, fallback: &Footer) -> Derived<Footer> {
        let mut fill = Filler::new(self);
        let footer = Footer {
            copyright: fill.text("footerCopyright", &fallback.copyright),
            tagline: fill.text("footerTagline", &fallback.tagline),
        };
        fill.finish(footer)
    }

    pub fn contact_page_or(&self, fallback: &ContactPage) -> Derived<ContactPage> {
        let mut fill = Filler::new(self);
        let page = ContactPage {
            page_title: fill.text("contactPageTitle", &fallback.page_title),
            page_subtitle: fill.text("contactPageSubtitle", &fallback.page_subtitle),
            seo_title: fill.text("contactSeoTitle", &fallback.seo_title),
            intro_text: fill.text("contactIntroText", &fallback.intro_text),
        };
        fill.finish(page)
    }
}

/// A record derived from site settings, with the setting keys that had to be filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct Derived<T> {
    pub value: T,
    pub missing: Vec<&'static str>,
}

struct Filler<'a> {
    settings: &'a SiteSettings,
    missing: Vec<&'static str>,
}

impl<'a> Filler<'a> {
    fn new(settings: &'a SiteSettings) -> Self {
        Self {
            settings,
            missing: Vec::new(),
        }
    }

    fn text(&mut self, key: &'static str, fallback: &str) -> String {
        match self.settings.text(key) {
            Some(value) => value.to_string(),
            None => {
                self.missing.push(key);
                fallback.to_string()
            }
        }
    }

    fn finish<T>(self, value: T) -> Derived<T> {
        Derived {
            value,
            missing: self.missing,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRole {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub dates: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumePage {
    pub full_name: String,
    pub title: String,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub linkedin_url: Option<String>,
    pub website_url: Option<String>,
    /// Direct URL once the linked PDF asset is resolved.
    pub pdf_url: Option<String>,
    pub summary: Option<String>,
    pub achievements: Vec<String>,
    pub experience: Vec<ResumeRole>,
    pub skills: Vec<SkillGroup>,
    pub education: Option<String>,
    pub certifications: Vec<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn post_keeps_unresolved_tag_links() {
        let link = json!({"sys": {"type": "Link", "linkType": "Entry", "id": "gone"}});
        let post: Post = serde_json::from_value(json!({
            "slug": "a",
            "title": "A",
            "publishDate": "2025-03-01",
            "tags": [{"name": "AI", "slug": "ai"}, link.clone()],
            "readingTime": 4,
        }))
        .expect("post decodes");

        assert_eq!(post.tags[0], TagRef::Resolved(Tag::new("AI", "ai")));
        assert_eq!(post.tags[1], TagRef::Unresolved(link.clone()));
        assert_eq!(post.tag_slugs().collect::<Vec<_>>(), vec!["ai"]);
        assert_eq!(post.extra.get("readingTime"), Some(&json!(4)));

        let round = serde_json::to_value(&post).expect("post encodes");
        assert_eq!(round["tags"][1], link);
    }

    #[test]
    fn publish_date_parses_dates_and_timestamps() {
        let mut post: Post = serde_json::from_value(json!({
            "slug": "a", "title": "A", "publishDate": "2024-12-15T09:00-07:00"
        }))
        .expect("post decodes");
        assert_eq!(
            post.published_on(),
            Some(time::macros::date!(2024 - 12 - 15))
        );

        post.publish_date = "soon".to_string();
        assert_eq!(post.published_on(), None);
    }

    #[test]
    fn hero_fills_missing_settings_from_fallback() {
        let settings = SiteSettings::from_pairs([("heroTitle", "Live title"), ("heroSubtitle", "")]);
        let fallback = Hero {
            title: "Static".to_string(),
            subtitle: "Static subtitle".to_string(),
        };

        let derived = settings.hero_or(&fallback);
        assert_eq!(derived.value.title, "Live title");
        assert_eq!(derived.value.subtitle, "Static subtitle");
        assert_eq!(derived.missing, vec!["heroSubtitle"]);
    }

    #[test]
    fn resume_tolerates_partial_records() {
        let resume: ResumePage = serde_json::from_value(json!({
            "fullName": "D",
            "experience": [{"title": "Lead", "company": "Acme"}],
        }))
        .expect("resume decodes");
        assert_eq!(resume.full_name, "D");
        assert_eq!(resume.experience[0].bullets.len(), 0);
        assert!(resume.pdf_url.is_none());
    }
}
