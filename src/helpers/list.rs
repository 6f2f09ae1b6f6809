//! Tag and category tallies over an index

use std::collections::HashMap;

use crate::content::PostSummary;

/// Count posts per tag, most used first (ties by name)
pub fn count_tags(posts: &[PostSummary]) -> Vec<(String, usize)> {
    let mut tags: HashMap<&str, usize> = HashMap::new();
    for post in posts {
        for tag in &post.tags {
            *tags.entry(tag.as_str()).or_insert(0) += 1;
        }
    }
    sorted_counts(tags)
}

/// Count posts per category, skipping uncategorized posts
pub fn count_categories(posts: &[PostSummary]) -> Vec<(String, usize)> {
    let mut categories: HashMap<&str, usize> = HashMap::new();
    for post in posts.iter().filter(|p| !p.category.is_empty()) {
        *categories.entry(post.category.as_str()).or_insert(0) += 1;
    }
    sorted_counts(categories)
}

fn sorted_counts(counts: HashMap<&str, usize>) -> Vec<(String, usize)> {
    let mut sorted: Vec<_> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted
}
