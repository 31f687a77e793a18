//! Post-list operations: relatedness filtering and the month timeline.

use std::collections::HashSet;

use time::{Date, format_description::FormatItem, macros::format_description};

use crate::domain::entities::{Post, TagRef};

pub const MONTH_KEY_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month padding:zero]");
pub const MONTH_LABEL_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:long] [year]");

/// Keep candidates that share at least one tag slug with `tags`, never the current post,
/// in source order, at most `limit` of them.
pub fn select_related(
    candidates: impl IntoIterator<Item = Post>,
    current_slug: &str,
    tags: &[TagRef],
    limit: usize,
) -> Vec<Post> {
    let wanted: HashSet<&str> = tags.iter().filter_map(TagRef::slug).collect();
    if wanted.is_empty() || limit == 0 {
        return Vec::new();
    }

    candidates
        .into_iter()
        .filter(|post| post.slug != current_slug)
        .filter(|post| post.tag_slugs().any(|slug| wanted.contains(slug)))
        .take(limit)
        .collect()
}

/// A run of consecutive posts published in the same month.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MonthGroup {
    pub key: String,
    pub label: String,
    pub slugs: Vec<String>,
}

/// Group an already ordered post list into month runs; undated posts join the current run.
pub fn month_timeline(posts: &[Post]) -> Vec<MonthGroup> {
    let mut groups: Vec<MonthGroup> = Vec::new();

    for post in posts {
        let month = post.published_on().and_then(month_key_and_label);
        let starts_new = match (&month, groups.last()) {
            (_, None) => true,
            (Some((key, _)), Some(last)) => last.key != *key,
            (None, Some(_)) => false,
        };

        if starts_new {
            let (key, label) = month.unwrap_or_default();
            groups.push(MonthGroup {
                key,
                label,
                slugs: Vec::new(),
            });
        }
        if let Some(group) = groups.last_mut() {
            group.slugs.push(post.slug.clone());
        }
    }

    groups
}

fn month_key_and_label(date: Date) -> Option<(String, String)> {
    let key = date.format(MONTH_KEY_FORMAT).ok()?;
    let label = date.format(MONTH_LABEL_FORMAT).ok()?.to_lowercase();
    Some((key, label))
}
