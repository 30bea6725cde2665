//! Generate static files

use anyhow::Result;

use crate::content::PostIndex;
use crate::generator::Generator;
use crate::Blog;

/// Generate the static site
pub fn run(blog: &Blog) -> Result<()> {
    let start = std::time::Instant::now();

    let index = PostIndex::new(blog);
    let generator = Generator::new(blog)?;
    generator.generate(&index)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}
