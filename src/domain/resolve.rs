//! Link resolution: flattens a delivery response into UI-ready records.
//!
//! Asset links become direct URLs (or `null` when the asset is missing). Entry links inside
//! sequences become the target entry's field map; a missing target leaves the link in place.
//! The two dangling-link policies differ, so callers can still meet raw links inside sequences.
//! Resolution is one level deep: embedded entries keep their own links untouched.

use std::collections::HashMap;

use recompile_content_types::{Includes, Link, LinkType, RawAsset, RawEntry};
use serde_json::{Map, Value};
use url::Url;

/// A flat field map with links replaced by their targets.
pub type ResolvedRecord = Map<String, Value>;

/// Resolve every item against the includes table of the same response.
pub fn resolve_links(items: &[RawEntry], includes: &Includes) -> Vec<ResolvedRecord> {
    let index = LinkIndex::new(includes);
    items.iter().map(|item| index.resolve_entry(item)).collect()
}

/// Per-response lookup table over `includes`, keyed by `sys.id`.
pub struct LinkIndex<'a> {
    assets: HashMap<&'a str, &'a RawAsset>,
    entries: HashMap<&'a str, &'a RawEntry>,
}

impl<'a> LinkIndex<'a> {
    pub fn new(includes: &'a Includes) -> Self {
        let assets = includes
            .assets
            .iter()
            .map(|asset| (asset.sys.id.as_str(), asset))
            .collect();
        let entries = includes
            .entries
            .iter()
            .map(|entry| (entry.sys.id.as_str(), entry))
            .collect();
        Self { assets, entries }
    }

    pub fn resolve_entry(&self, entry: &RawEntry) -> ResolvedRecord {
        entry
            .fields
            .iter()
            .map(|(key, value)| (key.clone(), self.resolve_field(value)))
            .collect()
    }

    fn resolve_field(&self, value: &Value) -> Value {
        if let Value::Array(elements) = value {
            return Value::Array(
                elements
                    .iter()
                    .map(|element| self.resolve_element(element))
                    .collect(),
            );
        }

        match Link::from_value(value) {
            Some(link) if link.link_type == LinkType::Asset => self
                .asset_url(&link.id)
                .map_or(Value::Null, Value::String),
            _ => value.clone(),
        }
    }

    fn resolve_element(&self, element: &Value) -> Value {
        match Link::from_value(element) {
            Some(link) if link.link_type == LinkType::Entry => {
                match self.entries.get(link.id.as_str()) {
                    Some(target) => Value::Object(target.fields.clone()),
                    None => element.clone(),
                }
            }
            _ => element.clone(),
        }
    }

    fn asset_url(&self, id: &str) -> Option<String> {
        self.assets
            .get(id)
            .and_then(|asset| asset.file_url())
            .map(absolute_asset_url)
    }
}

/// Give a CMS file URL an absolute `https` scheme; the CDN hands out `//host/path`.
/// Site-relative paths (`/file.pdf`) are served by the site itself and stay as they are.
pub fn absolute_asset_url(raw: &str) -> String {
    if let Some(rest) = raw.strip_prefix("//") {
        return format!("https://{rest}");
    }
    if raw.starts_with('/') || Url::parse(raw).is_ok() {
        return raw.to_string();
    }
    format!("https://{}", raw.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use recompile_content_types::{AssetFields, AssetFile, Sys};
    use serde_json::json;

    use super::*;

    fn entry(id: &str, fields: Value) -> RawEntry {
        RawEntry {
            sys: Sys::new(id),
            fields: fields.as_object().cloned().unwrap_or_default(),
        }
    }

    fn asset(id: &str, url: &str) -> RawAsset {
        RawAsset {
            sys: Sys::new(id),
            fields: AssetFields {
                title: None,
                file: Some(AssetFile {
                    url: Some(url.to_string()),
                    ..AssetFile::default()
                }),
            },
        }
    }

    fn contains_link(value: &Value) -> bool {
        match value {
            Value::Array(items) => items.iter().any(contains_link),
            other => Link::from_value(other).is_some(),
        }
    }

    #[test]
    fn asset_link_becomes_https_url() {
        let includes = Includes {
            assets: vec![asset("cover", "//images.ctfassets.net/space/cover.png")],
            entries: vec![],
        };
        let items = vec![entry(
            "post",
            json!({"title": "Hi", "mainImage": Link::asset("cover").to_value()}),
        )];

        let resolved = resolve_links(&items, &includes);
        assert_eq!(
            resolved[0]["mainImage"],
            json!("https://images.ctfassets.net/space/cover.png")
        );
        assert_eq!(resolved[0]["title"], json!("Hi"));
    }

    #[test]
    fn dangling_asset_link_becomes_null() {
        let items = vec![entry(
            "post",
            json!({"mainImage": Link::asset("missing").to_value()}),
        )];
        let resolved = resolve_links(&items, &Includes::default());
        assert_eq!(resolved[0]["mainImage"], Value::Null);
    }

    #[test]
    fn asset_without_file_url_becomes_null() {
        let includes = Includes {
            assets: vec![RawAsset {
                sys: Sys::new("bare"),
                fields: AssetFields::default(),
            }],
            entries: vec![],
        };
        let items = vec![entry("post", json!({"iconSvg": Link::asset("bare").to_value()}))];
        let resolved = resolve_links(&items, &includes);
        assert_eq!(resolved[0]["iconSvg"], Value::Null);
    }

    #[test]
    fn entry_links_in_sequences_embed_target_fields() {
        let includes = Includes {
            assets: vec![],
            entries: vec![entry("tag-ai", json!({"name": "AI", "slug": "ai"}))],
        };
        let items = vec![entry(
            "post",
            json!({"tags": [Link::entry("tag-ai").to_value(), "loose-scalar"]}),
        )];

        let resolved = resolve_links(&items, &includes);
        assert_eq!(
            resolved[0]["tags"],
            json!([{"name": "AI", "slug": "ai"}, "loose-scalar"])
        );
    }

    #[test]
    fn dangling_entry_link_in_sequence_is_preserved() {
        let dangling = Link::entry("tag-gone").to_value();
        let items = vec![entry("post", json!({"tags": [dangling.clone()]}))];
        let resolved = resolve_links(&items, &Includes::default());
        assert_eq!(resolved[0]["tags"], json!([dangling]));
    }

    #[test]
    fn single_entry_link_and_asset_links_in_sequences_pass_through() {
        let includes = Includes {
            assets: vec![asset("a", "//cdn/a.png")],
            entries: vec![entry("author", json!({"name": "D"}))],
        };
        let author = Link::entry("author").to_value();
        let gallery = json!([Link::asset("a").to_value()]);
        let items = vec![entry(
            "post",
            json!({"author": author.clone(), "gallery": gallery.clone()}),
        )];

        let resolved = resolve_links(&items, &includes);
        assert_eq!(resolved[0]["author"], author);
        assert_eq!(resolved[0]["gallery"], gallery);
    }

    #[test]
    fn embedded_entries_are_not_resolved_further() {
        let nested = Link::asset("a").to_value();
        let includes = Includes {
            assets: vec![asset("a", "//cdn/a.png")],
            entries: vec![entry("tag", json!({"slug": "ai", "icon": nested.clone()}))],
        };
        let items = vec![entry("post", json!({"tags": [Link::entry("tag").to_value()]}))];

        let resolved = resolve_links(&items, &includes);
        assert_eq!(resolved[0]["tags"][0]["icon"], nested);
    }

    #[test]
    fn matched_links_leave_no_residual_link_values() {
        let includes = Includes {
            assets: vec![asset("img", "//cdn/img.png")],
            entries: vec![entry("tag", json!({"name": "Rust", "slug": "rust"}))],
        };
        let items = vec![entry(
            "post",
            json!({
                "image": Link::asset("img").to_value(),
                "tags": [Link::entry("tag").to_value()],
                "publishDate": "2025-01-02",
            }),
        )];

        let resolved = resolve_links(&items, &includes);
        assert!(!resolved[0].values().any(contains_link));
    }

    #[test]
    fn absolute_url_forms() {
        assert_eq!(absolute_asset_url("//cdn/x.png"), "https://cdn/x.png");
        assert_eq!(
            absolute_asset_url("http://cdn.example/x.png"),
            "http://cdn.example/x.png"
        );
        assert_eq!(absolute_asset_url("cdn.example/x.png"), "https://cdn.example/x.png");
        assert_eq!(absolute_asset_url("/images/x.png"), "/images/x.png");
    }
}
