//! Search controller - adapts UI events to search commands
//!
//! The view layer turns toolkit events (button clicks, key presses) into
//! calls on [`SearchController`] and receives the visible posts back
//! through [`PostView`].

use std::time::Duration;

use super::debounce::{Clock, Debouncer};
use super::SearchEngine;
use crate::content::PostSummary;

/// Receives the currently visible posts. An empty slice means the view
/// should show its empty state.
pub trait PostView {
    fn show_posts(&mut self, posts: &[&PostSummary]);
}

/// A click in the tag filter bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagSelection {
    All,
    Tag(String),
}

impl TagSelection {
    /// The filter bar labels its reset button "all"
    pub fn parse(value: &str) -> Self {
        if value == "all" {
            TagSelection::All
        } else {
            TagSelection::Tag(value.to_string())
        }
    }
}

/// Owns the search state for one page and drives its view
pub struct SearchController<V: PostView, C: Clock> {
    engine: SearchEngine,
    view: V,
    debouncer: Debouncer<String, C>,
    selected: TagSelection,
}

impl<V: PostView, C: Clock> SearchController<V, C> {
    pub fn new(view: V, clock: C, delay: Duration) -> Self {
        Self {
            engine: SearchEngine::new(),
            view,
            debouncer: Debouncer::new(clock, delay),
            selected: TagSelection::All,
        }
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn selected_tag(&self) -> &TagSelection {
        &self.selected
    }

    /// The index finished loading (possibly empty)
    pub fn on_posts_loaded(&mut self, posts: Vec<PostSummary>) {
        tracing::debug!("Search loaded {} posts", posts.len());
        self.engine.set_posts(posts);
        self.selected = TagSelection::All;
        self.emit();
    }

    /// Apply a tag filter right away, against the latest query text
    pub fn on_tag_selected(&mut self, selection: TagSelection) {
        self.engine.select_tag(&selection);
        self.selected = selection;

        // The result below already reflects the pending query
        self.debouncer.cancel_pending();
        self.emit();
    }

    /// A keystroke in the search box. Recomputation waits for the quiet period.
    pub fn on_query_changed(&mut self, text: &str) {
        self.engine.set_query(text);
        self.debouncer.schedule(text.to_string());
    }

    /// Run the debounced search if it is due. Returns whether it ran.
    pub fn tick(&mut self) -> bool {
        match self.debouncer.poll() {
            Some(query) => {
                let results = self.engine.search(&query);
                tracing::debug!("Search {:?} matched {} posts", query, results.len());
                self.view.show_posts(&results);
                true
            }
            None => false,
        }
    }

    /// Escape in the search box: empty the query and show the base set now
    pub fn on_clear(&mut self) {
        self.debouncer.cancel_pending();
        let base = self.engine.clear();
        self.view.show_posts(&base);
    }

    fn emit(&mut self) {
        let visible = self.engine.visible();
        self.view.show_posts(&visible);
    }
}
