//! Search the post index from the terminal

use anyhow::Result;
use std::cell::RefCell;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::content::loader::load_index;
use crate::content::PostSummary;
use crate::search::{run_debounced, PostView, SearchEngine, TagSelection};
use crate::Site;

/// Prints result sets to stdout
#[derive(Default)]
pub struct ConsoleView {
    shown: usize,
}

impl ConsoleView {
    /// Number of result sets printed so far
    pub fn shown(&self) -> usize {
        self.shown
    }
}

impl PostView for ConsoleView {
    fn show_posts(&mut self, posts: &[&PostSummary]) {
        self.shown += 1;
        if posts.is_empty() {
            println!("No posts found.");
            return;
        }
        for post in posts {
            let tags = if post.tags.is_empty() {
                String::new()
            } else {
                format!(" #{}", post.tags.join(" #"))
            };
            println!("  {} - {} [{}]{}", post.date, post.title, post.file, tags);
        }
    }
}

/// One-shot search over the built index
pub async fn run(site: &Site, query: &str, tag: Option<&str>) -> Result<()> {
    let posts = load_index(&site.index_path()).await;
    let engine = SearchEngine::with_posts(posts);
    let selection = tag.map(TagSelection::parse).unwrap_or(TagSelection::All);

    let results = engine.search_with_tag(&selection, query);
    tracing::debug!("{:?} matched {} posts", query, results.len());
    ConsoleView::default().show_posts(&results);

    Ok(())
}

/// A query waiting out the quiet period
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuery {
    generation: u64,
    query: String,
}

/// Search state for one interactive session
///
/// Every input line bumps the generation. A debounced query only runs if
/// nothing else was entered after it, so a tag change or a clear
/// supersedes the query still waiting in the channel.
pub struct InteractiveSession<V: PostView> {
    engine: SearchEngine,
    view: V,
    generation: u64,
}

impl<V: PostView> InteractiveSession<V> {
    pub fn new(posts: Vec<PostSummary>, view: V) -> Self {
        Self {
            engine: SearchEngine::with_posts(posts),
            view,
            generation: 0,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Show the current visible set
    pub fn show_visible(&mut self) {
        let visible = self.engine.visible();
        self.view.show_posts(&visible);
    }

    /// `#tag` (or `#all`) filters right away, an empty line clears the
    /// query, anything else is a query to debounce
    pub fn handle_line(&mut self, line: &str) -> Option<PendingQuery> {
        self.generation += 1;
        let line = line.trim();

        if let Some(tag) = line.strip_prefix('#') {
            self.engine.select_tag(&TagSelection::parse(tag.trim()));
            self.show_visible();
            None
        } else if line.is_empty() {
            let base = self.engine.clear();
            self.view.show_posts(&base);
            None
        } else {
            self.engine.set_query(line);
            Some(PendingQuery {
                generation: self.generation,
                query: line.to_string(),
            })
        }
    }

    /// Run a debounced query unless it was superseded. Returns whether it ran.
    pub fn fire(&mut self, pending: PendingQuery) -> bool {
        if pending.generation != self.generation {
            tracing::debug!("Dropping superseded query {:?}", pending.query);
            return false;
        }
        let results = self.engine.search(&pending.query);
        self.view.show_posts(&results);
        true
    }
}

/// Feed input lines into a session, debouncing queries on the tokio timer
pub async fn drive<R, V>(
    session: InteractiveSession<V>,
    input: R,
    delay: Duration,
) -> InteractiveSession<V>
where
    R: AsyncBufRead + Unpin,
    V: PostView,
{
    let session = RefCell::new(session);
    let (tx, rx) = mpsc::channel::<PendingQuery>(32);

    let reader = {
        let session = &session;
        async move {
            let mut lines = input.lines();
            loop {
                let line = match lines.next_line().await {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        tracing::error!("Failed to read input: {}", e);
                        break;
                    }
                };

                let pending = session.borrow_mut().handle_line(&line);
                if let Some(pending) = pending {
                    if tx.send(pending).await.is_err() {
                        break;
                    }
                }
            }
        }
    };

    let searcher = run_debounced(rx, delay, |pending| {
        session.borrow_mut().fire(pending);
    });

    tokio::join!(reader, searcher);

    session.into_inner()
}

/// Search as you type on stdin
pub async fn run_interactive(site: &Site) -> Result<()> {
    let posts = load_index(&site.index_path()).await;
    let mut session = InteractiveSession::new(posts, ConsoleView::default());

    println!("Type to search, #tag to filter, empty line to clear, Ctrl+D to quit.");
    session.show_visible();

    let input = BufReader::new(tokio::io::stdin());
    let session = drive(session, input, site.config.search.debounce()).await;
    tracing::debug!("Printed {} result sets", session.view().shown());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::write_index;
    use crate::search::tests::sample_posts;
    use tempfile::TempDir;

    /// Records the file names of every emitted set
    #[derive(Default)]
    struct RecordingView {
        renders: Vec<Vec<String>>,
    }

    impl PostView for RecordingView {
        fn show_posts(&mut self, posts: &[&PostSummary]) {
            self.renders
                .push(posts.iter().map(|p| p.file.clone()).collect());
        }
    }

    const DELAY: Duration = Duration::from_millis(200);

    #[test]
    fn test_tag_change_supersedes_pending_query() {
        let mut session = InteractiveSession::new(sample_posts(), RecordingView::default());

        let pending = session.handle_line("rust").unwrap();
        assert!(session.handle_line("#web").is_none());
        assert_eq!(session.view().renders, vec![vec!["b.md".to_string()]]);

        // The tag change already showed web and rust, nothing more to emit
        assert!(!session.fire(pending));
        assert_eq!(session.view().renders.len(), 1);
    }

    #[test]
    fn test_clear_supersedes_pending_query() {
        let mut session = InteractiveSession::new(sample_posts(), RecordingView::default());

        let pending = session.handle_line("weekend").unwrap();
        assert!(session.handle_line("").is_none());
        assert!(!session.fire(pending));
        assert_eq!(session.view().renders, vec![vec!["c.md", "b.md", "a.md"]]);
    }

    #[test]
    fn test_latest_query_fires() {
        let mut session = InteractiveSession::new(sample_posts(), RecordingView::default());

        let stale = session.handle_line("rust").unwrap();
        let latest = session.handle_line("weekend").unwrap();
        assert!(!session.fire(stale));
        assert!(session.fire(latest));
        assert_eq!(session.view().renders, vec![vec!["a.md"]]);
    }

    #[tokio::test]
    async fn test_drive_emits_tag_change_once() {
        let session = InteractiveSession::new(sample_posts(), RecordingView::default());
        let input: &[u8] = b"rust\n#web\n";

        let session = drive(session, input, DELAY).await;
        assert_eq!(session.view().renders, vec![vec!["b.md"]]);
    }

    #[tokio::test]
    async fn test_drive_fires_last_query_on_close() {
        let session = InteractiveSession::new(sample_posts(), RecordingView::default());
        let input: &[u8] = b"r\nru\nrust\n";

        let session = drive(session, input, DELAY).await;
        assert_eq!(session.view().renders, vec![vec!["c.md", "b.md"]]);
    }

    #[tokio::test]
    async fn test_run_with_all_tag() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        write_index(&site.index_path(), &sample_posts()).unwrap();
        run(&site, "", Some("all")).await.unwrap();
    }

    #[test]
    fn test_console_view_counts_empty_state() {
        let mut view = ConsoleView::default();
        view.show_posts(&[]);
        assert_eq!(view.shown(), 1);
    }

    #[tokio::test]
    async fn test_run_with_missing_index() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        run(&site, "anything", None).await.unwrap();
    }

    #[tokio::test]
    async fn test_run_with_tag() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        write_index(&site.index_path(), &sample_posts()).unwrap();
        run(&site, "rust", Some("web")).await.unwrap();
    }
}
