//! Helper functions shared by the commands and the server
//!
//! Date parsing and display, HTML escaping, URL building and tag tallies.

mod date;
mod html;
mod list;
mod url;

pub use date::*;
pub use html::*;
pub use list::*;
pub use url::*;
