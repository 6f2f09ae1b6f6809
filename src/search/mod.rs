//! Search module - client-side filtering over the loaded post index
//!
//! [`SearchEngine`] holds the loaded posts, an optional tag restriction and
//! the latest query text. The visible set is always derived from those
//! three values:
//!
//! ```text
//! visible = filter(restriction non-empty ? restriction : all_posts, query)
//! ```
//!
//! Input handling (debounce, tag buttons, clearing) lives in
//! [`controller::SearchController`].

pub mod controller;
pub mod debounce;

use std::collections::BTreeSet;

use crate::content::PostSummary;

pub use controller::{PostView, SearchController, TagSelection};
pub use debounce::{run_debounced, Clock, Debouncer, ManualClock, SystemClock, TaskHandle};

/// Search state for one page
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    all_posts: Vec<PostSummary>,
    tag_restriction: Vec<PostSummary>,
    query: String,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine over an already loaded index
    pub fn with_posts(posts: Vec<PostSummary>) -> Self {
        let mut engine = Self::new();
        engine.set_posts(posts);
        engine
    }

    /// Replace the loaded posts. Clears any tag restriction.
    pub fn set_posts(&mut self, posts: Vec<PostSummary>) {
        self.all_posts = posts;
        self.tag_restriction.clear();
    }

    /// Restrict the base set to an explicit subset. An empty subset lifts
    /// the restriction, the same as selecting "all".
    pub fn set_tag_restriction(&mut self, posts: Vec<PostSummary>) {
        self.tag_restriction = posts;
    }

    /// Apply a tag filter button. "all", or a tag no post carries, lifts
    /// the restriction.
    pub fn select_tag(&mut self, selection: &TagSelection) {
        let subset = match selection {
            TagSelection::All => Vec::new(),
            TagSelection::Tag(tag) => self.posts_with_tag(tag),
        };
        self.set_tag_restriction(subset);
    }

    /// Search under a tag selection without touching the stored state
    pub fn search_with_tag(&self, selection: &TagSelection, query: &str) -> Vec<&PostSummary> {
        let query = normalize(query);

        let mut base: Vec<&PostSummary> = match selection {
            TagSelection::All => Vec::new(),
            TagSelection::Tag(tag) => self.all_posts.iter().filter(|p| p.has_tag(tag)).collect(),
        };
        if base.is_empty() {
            base = self.all_posts.iter().collect();
        }

        if query.is_empty() {
            return base;
        }
        base.into_iter().filter(|post| matches(post, &query)).collect()
    }

    /// Record the latest query text without recomputing anything
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// The latest query text, as typed
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether the stored query has any content after normalization
    pub fn has_query(&self) -> bool {
        !normalize(&self.query).is_empty()
    }

    pub fn all_posts(&self) -> &[PostSummary] {
        &self.all_posts
    }

    pub fn is_restricted(&self) -> bool {
        !self.tag_restriction.is_empty()
    }

    /// The restriction when one is set, otherwise every post
    pub fn base(&self) -> &[PostSummary] {
        if self.tag_restriction.is_empty() {
            &self.all_posts
        } else {
            &self.tag_restriction
        }
    }

    /// Filter the base set by a free-text query
    ///
    /// Matching is a case- and whitespace-insensitive substring test against
    /// the title, description, excerpt, tags and category. A blank query
    /// returns the base set untouched.
    pub fn search(&self, query: &str) -> Vec<&PostSummary> {
        let query = normalize(query);
        let base = self.base();

        if query.is_empty() {
            return base.iter().collect();
        }

        base.iter().filter(|post| matches(post, &query)).collect()
    }

    /// The visible set for the stored query
    pub fn visible(&self) -> Vec<&PostSummary> {
        self.search(&self.query)
    }

    /// Reset the query and return the base set
    pub fn clear(&mut self) -> Vec<&PostSummary> {
        self.query.clear();
        self.base().iter().collect()
    }

    /// Every tag in the index, sorted and de-duplicated
    pub fn all_tags(&self) -> Vec<String> {
        self.all_posts
            .iter()
            .flat_map(|post| post.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Posts carrying exactly this tag
    pub fn posts_with_tag(&self, tag: &str) -> Vec<PostSummary> {
        self.all_posts
            .iter()
            .filter(|post| post.has_tag(tag))
            .cloned()
            .collect()
    }
}

/// Lowercase, trim and collapse whitespace runs to a single space
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// `query` must already be normalized
fn matches(post: &PostSummary, query: &str) -> bool {
    let hit = |field: &str| normalize(field).contains(query);

    hit(&post.title)
        || hit(&post.description)
        || hit(&post.excerpt)
        || post.tags.iter().any(|tag| hit(tag))
        || hit(&post.category)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn post(file: &str, title: &str, tags: &[&str]) -> PostSummary {
        PostSummary {
            file: file.to_string(),
            title: title.to_string(),
            date: "2024-01-01".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            category: String::new(),
            description: String::new(),
            excerpt: String::new(),
        }
    }

    pub(crate) fn sample_posts() -> Vec<PostSummary> {
        let mut intro = post("c.md", "Intro to Rust", &["rust", "tag1"]);
        intro.description = "Ownership and borrowing".to_string();
        let mut web = post("b.md", "Building a Web Server", &["rust", "web"]);
        web.excerpt = "We use axum and tokio to serve files.".to_string();
        let mut notes = post("a.md", "Weekend notes", &["life"]);
        notes.category = "Diary".to_string();
        vec![intro, web, notes]
    }

    fn files(posts: &[&PostSummary]) -> Vec<String> {
        posts.iter().map(|p| p.file.clone()).collect()
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Hello   WORLD \t\n"), "hello world");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_empty_query_returns_base() {
        let engine = SearchEngine::with_posts(sample_posts());
        assert_eq!(files(&engine.search("")), vec!["c.md", "b.md", "a.md"]);
        assert_eq!(files(&engine.search("   ")), vec!["c.md", "b.md", "a.md"]);
    }

    #[test]
    fn test_query_is_case_and_space_insensitive() {
        let engine = SearchEngine::with_posts(sample_posts());
        assert_eq!(files(&engine.search("  TAG1  ")), vec!["c.md"]);
        assert_eq!(files(&engine.search("web   SERVER")), vec!["b.md"]);
    }

    #[test]
    fn test_matches_every_field() {
        let engine = SearchEngine::with_posts(sample_posts());
        assert_eq!(files(&engine.search("borrowing")), vec!["c.md"]);
        assert_eq!(files(&engine.search("axum")), vec!["b.md"]);
        assert_eq!(files(&engine.search("diary")), vec!["a.md"]);
        assert_eq!(files(&engine.search("rust")), vec!["c.md", "b.md"]);
        assert!(engine.search("haskell").is_empty());
    }

    #[test]
    fn test_restriction_bounds_results() {
        let mut engine = SearchEngine::with_posts(sample_posts());
        let web = engine.posts_with_tag("web");
        engine.set_tag_restriction(web);

        assert!(engine.is_restricted());
        assert_eq!(files(&engine.search("")), vec!["b.md"]);
        assert_eq!(files(&engine.search("rust")), vec!["b.md"]);
        assert!(engine.search("intro").is_empty());
    }

    #[test]
    fn test_empty_restriction_means_all() {
        let mut engine = SearchEngine::with_posts(sample_posts());
        engine.set_tag_restriction(engine.posts_with_tag("life"));
        engine.set_tag_restriction(Vec::new());
        assert_eq!(engine.search("").len(), 3);
    }

    #[test]
    fn test_set_posts_clears_restriction() {
        let mut engine = SearchEngine::with_posts(sample_posts());
        engine.set_tag_restriction(engine.posts_with_tag("life"));
        engine.set_posts(sample_posts());
        assert!(!engine.is_restricted());
    }

    #[test]
    fn test_visible_and_clear() {
        let mut engine = SearchEngine::with_posts(sample_posts());
        engine.set_query("weekend");
        assert!(engine.has_query());
        assert_eq!(files(&engine.visible()), vec!["a.md"]);

        assert_eq!(engine.clear().len(), 3);
        assert_eq!(engine.query(), "");
        assert_eq!(engine.visible().len(), 3);
    }

    #[test]
    fn test_all_tags_sorted_unique() {
        let engine = SearchEngine::with_posts(sample_posts());
        assert_eq!(engine.all_tags(), vec!["life", "rust", "tag1", "web"]);
    }

    #[test]
    fn test_posts_with_tag_is_exact() {
        let engine = SearchEngine::with_posts(sample_posts());
        assert_eq!(engine.posts_with_tag("rust").len(), 2);
        assert!(engine.posts_with_tag("Rust").is_empty());
    }

    #[test]
    fn test_select_tag() {
        let mut engine = SearchEngine::with_posts(sample_posts());

        engine.select_tag(&TagSelection::parse("web"));
        assert_eq!(files(&engine.visible()), vec!["b.md"]);

        engine.select_tag(&TagSelection::parse("missing"));
        assert!(!engine.is_restricted());

        engine.select_tag(&TagSelection::parse("rust"));
        engine.select_tag(&TagSelection::All);
        assert_eq!(engine.visible().len(), 3);
    }

    #[test]
    fn test_search_with_tag_matches_select_tag() {
        let engine = SearchEngine::with_posts(sample_posts());
        let cases = [("rust", "web"), ("", "rust"), ("notes", "all"), ("rust", "life"), ("x", "nope")];

        for (query, tag) in cases {
            let selection = TagSelection::parse(tag);
            let mut stateful = engine.clone();
            stateful.select_tag(&selection);
            assert_eq!(
                files(&engine.search_with_tag(&selection, query)),
                files(&stateful.search(query)),
                "query {:?} tag {:?}",
                query,
                tag
            );
        }

        // Read-only
        assert!(!engine.is_restricted());
    }

    #[test]
    fn test_empty_index() {
        let engine = SearchEngine::new();
        assert!(engine.search("").is_empty());
        assert!(engine.search("anything").is_empty());
        assert!(engine.all_tags().is_empty());
    }
}
