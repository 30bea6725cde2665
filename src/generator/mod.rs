//! Generator module - writes the static site into the public directory

use anyhow::{Context as _, Result};
use std::fs;
use walkdir::WalkDir;

use crate::content::PostIndex;
use crate::templates::TemplateRenderer;
use crate::Blog;

/// Static site generator
pub struct Generator {
    blog: Blog,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        Ok(Self {
            blog: blog.clone(),
            renderer,
        })
    }

    /// Generate the entire site.
    ///
    /// A malformed document or an invalid date aborts generation; broken
    /// pages are never silently published.
    pub fn generate(&self, index: &PostIndex) -> Result<()> {
        fs::create_dir_all(&self.blog.public_dir)?;

        self.copy_assets()?;

        let posts = index.build_index()?;
        tracing::info!("Indexed {} posts", posts.len());

        // List page
        let html = self.renderer.render_index(&self.blog.config, &posts)?;
        fs::write(self.blog.public_dir.join("index.html"), html)?;

        // Machine-readable index
        let json = serde_json::to_string_pretty(&posts)?;
        fs::write(self.blog.public_dir.join("posts.json"), json)?;

        // Detail pages, one per enumerated route
        for route in index.list_routes()? {
            let post = index.load_post(&route.slug)?;
            let html = self.renderer.render_post(&self.blog.config, &post)?;

            let output_path = self
                .blog
                .public_dir
                .join(&route.year)
                .join(&route.month)
                .join(format!("{}.html", route.slug));

            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {:?}", parent))?;
            }
            fs::write(&output_path, html)
                .with_context(|| format!("failed to write {:?}", output_path))?;
            tracing::debug!("Generated post: {:?}", output_path);
        }

        Ok(())
    }

    /// Copy static assets (css, images) into the public directory
    fn copy_assets(&self) -> Result<()> {
        if !self.blog.assets_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(&self.blog.assets_dir)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let relative = path.strip_prefix(&self.blog.assets_dir)?;
            let target = self.blog.public_dir.join(relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &target)?;
            tracing::debug!("Copied asset: {:?}", target);
        }

        Ok(())
    }
}
