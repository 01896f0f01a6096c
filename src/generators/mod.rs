// Copyright © 2024 Siteflow. All rights reserved.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Feed Generators
//!
//! Machine-readable outputs derived from the [`SiteContext`]:
//!
//! | Name           | Route                | Content type                     |
//! |----------------|----------------------|----------------------------------|
//! | `robots`       | `/robots.txt`        | `text/plain; charset=utf-8`      |
//! | `sitemap`      | `/sitemap.xml`       | `application/xml; charset=utf-8` |
//! | `search-index` | `/search-index.json` | `application/json`               |
//!
//! # Examples
//!
//! ```rust,no_run
//! use siteflow::content::SiteContext;
//! use siteflow::generators;
//! use std::path::Path;
//!
//! let people = vec!["people/abu_noman_md_sakib.json".to_string()];
//! let context = SiteContext::load(Path::new("data"), &people).unwrap();
//! for generator in generators::all(&["/".to_string()]).unwrap() {
//!     let feed = generator.generate(&context).unwrap();
//!     let _ = generators::write_feed(Path::new("public"), &feed).unwrap();
//! }
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::content::SiteContext;
use crate::core::error::{Result, SiteflowError};
use crate::core::traits::{Feed, FeedGenerator};

/// `robots.txt` generator.
pub mod robots;
/// Search index generator.
pub mod search;
/// `sitemap.xml` generator.
pub mod sitemap;

pub use robots::RobotsGenerator;
pub use search::SearchIndexGenerator;
pub use sitemap::SitemapGenerator;

/// Names accepted by [`by_name`], in output order.
pub const FEED_NAMES: &[&str] = &["robots", "sitemap", "search-index"];

/// Returns every generator, in the order of [`FEED_NAMES`].
///
/// `static_paths` are the sitemap's top-level pages.
pub fn all(static_paths: &[String]) -> Result<Vec<Box<dyn FeedGenerator>>> {
    FEED_NAMES
        .iter()
        .map(|name| by_name(name, static_paths))
        .collect()
}

/// Looks up a generator by its short name.
pub fn by_name(
    name: &str,
    static_paths: &[String],
) -> Result<Box<dyn FeedGenerator>> {
    match name {
        "robots" => Ok(Box::new(RobotsGenerator)),
        "sitemap" => {
            Ok(Box::new(SitemapGenerator::new(static_paths.to_vec())?))
        }
        "search-index" => Ok(Box::new(SearchIndexGenerator)),
        other => Err(SiteflowError::internal_error(format!(
            "Unknown feed `{}` (expected one of: {})",
            other,
            FEED_NAMES.join(", ")
        ))),
    }
}

/// Renders every feed for `context`.
pub fn generate_all(
    context: &SiteContext,
    static_paths: &[String],
) -> Result<Vec<Feed>> {
    all(static_paths)?
        .iter()
        .map(|generator| generator.generate(context))
        .collect()
}

/// Writes `feed` under `output_dir` at the file named by its route and
/// returns the written path.
pub fn write_feed(output_dir: &Path, feed: &Feed) -> Result<PathBuf> {
    let path = output_dir.join(feed.route.trim_start_matches('/'));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            SiteflowError::output_error(parent.to_path_buf(), e)
        })?;
    }

    let file = File::create(&path)
        .map_err(|e| SiteflowError::output_error(path.clone(), e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(feed.body.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|e| SiteflowError::output_error(path.clone(), e))?;

    debug!("Wrote {} ({} bytes)", path.display(), feed.body.len());
    Ok(path)
}
