//! Content module - documents, front-matter, excerpts and post pages

pub mod excerpt;
mod frontmatter;
pub mod loader;
mod markdown;
pub mod page;
mod post;

pub use excerpt::excerpt;
pub use frontmatter::{strip_bom, FrontMatter, FrontMatterValue};
pub use markdown::MarkdownRenderer;
pub use post::{Document, PostSummary};
