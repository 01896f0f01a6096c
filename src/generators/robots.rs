// Copyright © 2024 Siteflow. All rights reserved.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `robots.txt`: allow everything and point crawlers at the sitemap.

use crate::content::SiteContext;
use crate::core::error::Result;
use crate::core::traits::FeedGenerator;

use super::sitemap::SITEMAP_ROUTE;

/// Route of the robots-exclusion document.
pub const ROBOTS_ROUTE: &str = "/robots.txt";

/// Generator for `/robots.txt`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RobotsGenerator;

impl FeedGenerator for RobotsGenerator {
    fn route(&self) -> &'static str {
        ROBOTS_ROUTE
    }

    fn content_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }

    fn render(&self, context: &SiteContext) -> Result<String> {
        Ok(format!(
            "User-agent: *\nAllow: /\n\nSitemap: {}\n",
            context.canonical_url(SITEMAP_ROUTE)
        ))
    }
}
