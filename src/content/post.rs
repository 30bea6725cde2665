//! Post view models

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// List-view projection of a post (no rendered body).
///
/// `year`, `month` and `url` are derived from `date` and `id` at
/// construction time and are never stored independently of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    /// Stable slug derived from the source filename
    pub id: String,

    /// Post title from front-matter
    pub title: String,

    /// Publication date (ISO-like when serialized, sorts lexicographically)
    pub date: NaiveDateTime,

    /// Optional teaser from front-matter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    /// Optional tags from front-matter
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tags: Vec<String>,

    /// 4-digit year, derived from `date`
    pub year: String,

    /// 2-digit zero-padded month, derived from `date`
    pub month: String,

    /// Route path: /{year}/{month}/{id}.html
    pub url: String,
}

impl PostSummary {
    /// Build a summary, deriving the routing fields from the date
    pub fn new(
        id: String,
        title: String,
        date: NaiveDateTime,
        excerpt: Option<String>,
        tags: Vec<String>,
    ) -> Self {
        let route = Route::derive(&id, &date);
        Self {
            id,
            title,
            date,
            excerpt,
            tags,
            url: route.url(),
            year: route.year,
            month: route.month,
        }
    }
}

/// Detail-view projection of a post, including the rendered HTML body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(flatten)]
    pub summary: PostSummary,

    /// Rendered HTML fragment for the post body
    pub content_html: String,
}

/// A detail-page route, derived from a document's slug and date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub year: String,
    pub month: String,
    pub slug: String,
}

impl Route {
    /// Derive the route for a post. This is the single place year/month
    /// come from, so the index, the loader and route enumeration agree.
    pub fn derive(slug: &str, date: &NaiveDateTime) -> Self {
        Self {
            year: format!("{:04}", date.year()),
            month: format!("{:02}", date.month()),
            slug: slug.to_string(),
        }
    }

    /// Route path with `.html` suffix
    pub fn url(&self) -> String {
        format!("/{}/{}/{}.html", self.year, self.month, self.slug)
    }
}
