//! Content loading and transformation

pub mod error;
pub mod frontmatter;
pub mod index;
pub mod markdown;
pub mod post;

pub use error::ContentError;
pub use frontmatter::FrontMatter;
pub use index::PostIndex;
pub use markdown::MarkdownRenderer;
pub use post::{Post, PostSummary, Route};
