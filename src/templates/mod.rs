//! Built-in page templates using the Tera template engine
//!
//! The list and detail views are embedded directly in the binary. They
//! consume PostSummary/Post records as read-only view models.

use anyhow::Result;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{Post, PostSummary};

/// Template renderer with the embedded templates loaded
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all built-in templates registered
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Post bodies are pre-rendered HTML, so autoescaping is off
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("builtin/layout.html")),
            ("index.html", include_str!("builtin/index.html")),
            ("post.html", include_str!("builtin/post.html")),
        ])?;

        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Render the post list page
    pub fn render_index(&self, config: &SiteConfig, posts: &[PostSummary]) -> Result<String> {
        let mut context = self.base_context(config);
        context.insert("posts", posts);
        self.render("index.html", &context)
    }

    /// Render a post detail page
    pub fn render_post(&self, config: &SiteConfig, post: &Post) -> Result<String> {
        let mut context = self.base_context(config);
        context.insert("post", post);
        self.render("post.html", &context)
    }

    /// Render a template with a given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    fn base_context(&self, config: &SiteConfig) -> Context {
        let mut context = Context::new();
        context.insert("config", config);
        context.insert(
            "current_year",
            &chrono::Utc::now().format("%Y").to_string(),
        );
        context
    }
}

/// Tera filter: format an ISO date string with a strftime pattern
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "%Y-%m-%d".to_string(),
    };

    match NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(dt) => Ok(tera::Value::String(dt.format(&format).to_string())),
        // Not a date we understand; pass through unchanged
        Err(_) => Ok(tera::Value::String(s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_summary() -> PostSummary {
        PostSummary::new(
            "hello-world".to_string(),
            "Hello World".to_string(),
            NaiveDate::from_ymd_opt(2024, 3, 5)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            Some("A teaser".to_string()),
            vec!["rust".to_string()],
        )
    }

    #[test]
    fn test_render_index() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();
        let html = renderer.render_index(&config, &[sample_summary()]).unwrap();

        assert!(html.contains("Hello World"));
        assert!(html.contains("/2024/03/hello-world.html"));
        assert!(html.contains("A teaser"));
    }

    #[test]
    fn test_render_index_with_no_posts() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();
        let html = renderer.render_index(&config, &[]).unwrap();
        assert!(html.contains("post-list"));
    }

    #[test]
    fn test_render_post_keeps_content_html() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();
        let post = Post {
            summary: sample_summary(),
            content_html: "<h1>Hi</h1>".to_string(),
        };

        let html = renderer.render_post(&config, &post).unwrap();
        assert!(html.contains("<h1>Hi</h1>"));
        assert!(html.contains("Hello World"));
    }

    #[test]
    fn test_date_format_filter() {
        let value = tera::Value::String("2024-03-05T00:00:00".to_string());
        let mut args = HashMap::new();
        args.insert(
            "format".to_string(),
            tera::Value::String("%B %d, %Y".to_string()),
        );
        let out = date_format_filter(&value, &args).unwrap();
        assert_eq!(out, tera::Value::String("March 05, 2024".to_string()));
    }
}
