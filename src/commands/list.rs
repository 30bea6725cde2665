//! List site content

use anyhow::Result;

use crate::content::PostIndex;
use crate::Blog;

/// List site content by type
pub fn run(blog: &Blog, content_type: &str) -> Result<()> {
    let index = PostIndex::new(blog);

    match content_type {
        "post" | "posts" => {
            let posts = index.build_index()?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}]",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.url
                );
            }
        }
        "route" | "routes" => {
            let routes = index.list_routes()?;
            println!("Routes ({}):", routes.len());
            for route in routes {
                println!("  {}", route.url());
            }
        }
        "tag" | "tags" => {
            let posts = index.build_index()?;
            let mut tags: std::collections::HashMap<String, usize> =
                std::collections::HashMap::new();
            for post in &posts {
                for tag in &post.tags {
                    *tags.entry(tag.clone()).or_insert(0) += 1;
                }
            }
            println!("Tags ({}):", tags.len());
            let mut tags: Vec<_> = tags.into_iter().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, route, tag",
                content_type
            );
        }
    }

    Ok(())
}
