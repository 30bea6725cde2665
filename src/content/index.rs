//! Post index - enumerates content documents and derives date-based routes

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{ContentError, FrontMatter, MarkdownRenderer, Post, PostSummary, Route};
use crate::Blog;

/// Reads the posts directory and derives the sorted post index, single
/// post details and the route table. Holds no state between calls beyond
/// the configured directory and the markdown renderer.
pub struct PostIndex {
    posts_dir: PathBuf,
    renderer: MarkdownRenderer,
}

impl PostIndex {
    /// Create an index over a blog's configured posts directory
    pub fn new(blog: &Blog) -> Self {
        let renderer = MarkdownRenderer::with_options(
            &blog.config.highlight.theme,
            blog.config.highlight.enable,
        );
        Self::with_dir(blog.posts_dir.clone(), renderer)
    }

    /// Create an index over an explicit directory
    pub fn with_dir(posts_dir: impl Into<PathBuf>, renderer: MarkdownRenderer) -> Self {
        Self {
            posts_dir: posts_dir.into(),
            renderer,
        }
    }

    /// Build the full post index, sorted by date descending.
    ///
    /// A document that cannot be read or parsed aborts the build rather
    /// than being silently dropped, so a broken page never goes unnoticed.
    pub fn build_index(&self) -> Result<Vec<PostSummary>, ContentError> {
        let mut posts: Vec<PostSummary> = Vec::new();
        let mut seen = HashSet::new();

        for path in self.document_paths() {
            let (summary, _body) = self.read_document(&path)?;
            // Two documents with the same stem (e.g. intro.md and
            // intro.markdown) would collide on one route
            if !seen.insert(summary.id.clone()) {
                return Err(ContentError::malformed(
                    &path,
                    format!("duplicate slug '{}'", summary.id),
                ));
            }
            posts.push(summary);
        }

        // Stable sort keeps equal dates in enumeration order
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(posts)
    }

    /// Load a single post by slug, rendering its body to HTML.
    ///
    /// The identifier may carry a trailing `.html` suffix from the routing
    /// layer; it is stripped before lookup. The post URL is always derived
    /// from the parsed date, never from caller-supplied route segments.
    pub fn load_post(&self, identifier: &str) -> Result<Post, ContentError> {
        let slug = identifier.strip_suffix(".html").unwrap_or(identifier);

        let path = self
            .resolve_slug(slug)
            .ok_or_else(|| ContentError::NotFound(slug.to_string()))?;

        let (summary, body) = self.read_document(&path)?;
        let content_html = self
            .renderer
            .render(&body)
            .map_err(|e| ContentError::malformed(&path, e.to_string()))?;

        Ok(Post {
            summary,
            content_html,
        })
    }

    /// Enumerate all valid detail-page routes, ordered like the index.
    ///
    /// Derived the same way as `build_index`, so every returned route
    /// resolves through `load_post`.
    pub fn list_routes(&self) -> Result<Vec<Route>, ContentError> {
        let index = self.build_index()?;
        Ok(index
            .iter()
            .map(|s| Route::derive(&s.id, &s.date))
            .collect())
    }

    /// All markdown document paths in the posts directory, in a
    /// deterministic order. Only the top level is enumerated: a slug is
    /// a bare filename, so lookup and enumeration must cover the same
    /// set of files.
    fn document_paths(&self) -> Vec<PathBuf> {
        if !self.posts_dir.exists() {
            return Vec::new();
        }

        WalkDir::new(&self.posts_dir)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file() && is_markdown_file(e.path()))
            .map(|e| e.path().to_path_buf())
            .collect()
    }

    /// Resolve a slug to its source file by exact filename match
    fn resolve_slug(&self, slug: &str) -> Option<PathBuf> {
        // Slugs never contain path separators; anything else is NotFound
        if slug.is_empty() || slug.contains(['/', '\\']) || slug.contains("..") {
            return None;
        }

        for ext in ["md", "markdown"] {
            let candidate = self.posts_dir.join(format!("{}.{}", slug, ext));
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        None
    }

    /// Read one document: parse front-matter, validate the schema and
    /// derive routing fields. Returns the summary and the raw body.
    fn read_document(&self, path: &Path) -> Result<(PostSummary, String), ContentError> {
        let raw =
            fs::read_to_string(path).map_err(|e| ContentError::malformed(path, e.to_string()))?;

        let (fm, body) =
            FrontMatter::parse(&raw).map_err(|e| ContentError::malformed(path, e.to_string()))?;

        let title = fm
            .title
            .clone()
            .ok_or_else(|| ContentError::malformed(path, "missing title field"))?;

        let date = fm.parse_date().ok_or_else(|| ContentError::InvalidDate {
            path: path.to_path_buf(),
            value: fm.date.clone(),
        })?;

        let id = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string())
            .ok_or_else(|| ContentError::malformed(path, "filename is not valid UTF-8"))?;

        let summary = PostSummary::new(id, title, date, fm.excerpt, fm.tags);
        Ok((summary, body.to_string()))
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_post(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    fn index_for(dir: &Path) -> PostIndex {
        PostIndex::with_dir(dir, MarkdownRenderer::new())
    }

    fn fixture() -> TempDir {
        let tmp = TempDir::new().unwrap();
        write_post(
            tmp.path(),
            "january-notes.md",
            "---\ntitle: January Notes\ndate: 2024-01-10\ntags: notes\n---\n\nJanuary body.\n",
        );
        write_post(
            tmp.path(),
            "february-update.md",
            "---\ntitle: February Update\ndate: 2024-02-01\nexcerpt: Short teaser\n---\n\nFebruary body.\n",
        );
        tmp
    }

    #[test]
    fn test_index_sorted_by_date_descending() {
        let tmp = fixture();
        let index = index_for(tmp.path()).build_index().unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index[0].id, "february-update");
        assert_eq!(index[1].id, "january-notes");
        assert!(index[0].date >= index[1].date);
    }

    #[test]
    fn test_url_matches_derived_year_and_month() {
        let tmp = fixture();
        let index = index_for(tmp.path()).build_index().unwrap();

        for summary in &index {
            assert_eq!(
                summary.url,
                format!("/{}/{}/{}.html", summary.year, summary.month, summary.id)
            );
            assert_eq!(summary.year, summary.date.format("%Y").to_string());
            assert_eq!(summary.month, summary.date.format("%m").to_string());
        }
    }

    #[test]
    fn test_equal_dates_keep_stable_order() {
        let tmp = TempDir::new().unwrap();
        for name in ["a-post.md", "b-post.md", "c-post.md"] {
            write_post(
                tmp.path(),
                name,
                "---\ntitle: Same Day\ndate: 2024-05-05\n---\n\nBody.\n",
            );
        }

        let ids: Vec<_> = index_for(tmp.path())
            .build_index()
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["a-post", "b-post", "c-post"]);
    }

    #[test]
    fn test_load_post_derives_fields_and_renders() {
        let tmp = TempDir::new().unwrap();
        write_post(
            tmp.path(),
            "hello.md",
            "---\ntitle: Hello\ndate: \"2024-03-05\"\n---\n\n# Hi\n",
        );

        let post = index_for(tmp.path()).load_post("hello").unwrap();
        assert_eq!(post.summary.title, "Hello");
        assert_eq!(post.summary.year, "2024");
        assert_eq!(post.summary.month, "03");
        assert_eq!(post.summary.url, "/2024/03/hello.html");
        assert!(post.content_html.contains("<h1>Hi</h1>"));
    }

    #[test]
    fn test_load_post_strips_html_suffix() {
        let tmp = fixture();
        let index = index_for(tmp.path());

        let post = index.load_post("january-notes.html").unwrap();
        assert_eq!(post.summary.id, "january-notes");
    }

    #[test]
    fn test_load_post_is_idempotent() {
        let tmp = fixture();
        let index = index_for(tmp.path());

        let a = index.load_post("february-update").unwrap();
        let b = index.load_post("february-update").unwrap();
        assert_eq!(a.summary, b.summary);
        assert_eq!(a.content_html, b.content_html);
    }

    #[test]
    fn test_missing_slug_is_not_found() {
        let tmp = fixture();
        let err = index_for(tmp.path()).load_post("missing-slug").unwrap_err();
        assert!(matches!(err, ContentError::NotFound(_)));
    }

    #[test]
    fn test_traversal_slug_is_not_found() {
        let tmp = fixture();
        let err = index_for(tmp.path())
            .load_post("../february-update")
            .unwrap_err();
        assert!(matches!(err, ContentError::NotFound(_)));
    }

    #[test]
    fn test_missing_date_fails_the_build() {
        let tmp = fixture();
        write_post(
            tmp.path(),
            "undated.md",
            "---\ntitle: No Date\n---\n\nBody.\n",
        );

        let err = index_for(tmp.path()).build_index().unwrap_err();
        assert!(matches!(err, ContentError::InvalidDate { .. }));
    }

    #[test]
    fn test_unparsable_date_is_invalid() {
        let tmp = TempDir::new().unwrap();
        write_post(
            tmp.path(),
            "bad-date.md",
            "---\ntitle: Bad\ndate: next tuesday\n---\n\nBody.\n",
        );

        let err = index_for(tmp.path()).load_post("bad-date").unwrap_err();
        assert!(matches!(err, ContentError::InvalidDate { .. }));
    }

    #[test]
    fn test_broken_frontmatter_is_malformed() {
        let tmp = TempDir::new().unwrap();
        write_post(tmp.path(), "broken.md", "---\ntitle: Broken\nno end\n");

        let err = index_for(tmp.path()).build_index().unwrap_err();
        assert!(matches!(err, ContentError::MalformedDocument { .. }));
    }

    #[test]
    fn test_missing_title_is_malformed() {
        let tmp = TempDir::new().unwrap();
        write_post(
            tmp.path(),
            "untitled.md",
            "---\ndate: 2024-01-01\n---\n\nBody.\n",
        );

        let err = index_for(tmp.path()).build_index().unwrap_err();
        assert!(matches!(err, ContentError::MalformedDocument { .. }));
    }

    #[test]
    fn test_routes_resolve_through_loader() {
        let tmp = fixture();
        let index = index_for(tmp.path());

        let routes = index.list_routes().unwrap();
        assert_eq!(routes.len(), 2);

        for route in routes {
            let post = index.load_post(&route.slug).unwrap();
            assert_eq!(post.summary.year, route.year);
            assert_eq!(post.summary.month, route.month);
            assert_eq!(post.summary.url, route.url());
            assert!(!post.content_html.is_empty());
        }
    }

    #[test]
    fn test_nested_documents_are_not_enumerated() {
        let tmp = fixture();
        let drafts = tmp.path().join("2024-drafts");
        fs::create_dir_all(&drafts).unwrap();
        write_post(
            &drafts,
            "nested.md",
            "---\ntitle: Nested\ndate: 2024-06-01\n---\n\nNested body.\n",
        );

        let index = index_for(tmp.path());

        // Lookup only covers bare filenames, so enumeration must too
        let routes = index.list_routes().unwrap();
        assert_eq!(routes.len(), 2);
        assert!(routes.iter().all(|r| r.slug != "nested"));
        for route in &routes {
            assert!(index.load_post(&route.slug).is_ok());
        }

        let err = index.load_post("nested").unwrap_err();
        assert!(matches!(err, ContentError::NotFound(_)));
    }

    #[test]
    fn test_duplicate_slug_fails_the_build() {
        let tmp = TempDir::new().unwrap();
        write_post(
            tmp.path(),
            "intro.md",
            "---\ntitle: Intro\ndate: 2024-01-01\n---\n\nFirst.\n",
        );
        write_post(
            tmp.path(),
            "intro.markdown",
            "---\ntitle: Intro Again\ndate: 2024-02-02\n---\n\nSecond.\n",
        );

        let err = index_for(tmp.path()).build_index().unwrap_err();
        match err {
            ContentError::MalformedDocument { reason, .. } => {
                assert!(reason.contains("duplicate slug 'intro'"));
            }
            other => panic!("expected MalformedDocument, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_directory_yields_empty_index() {
        let index = index_for(Path::new("/nonexistent/posts"));
        assert!(index.build_index().unwrap().is_empty());
    }
}
