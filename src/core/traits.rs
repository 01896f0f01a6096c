// Copyright © 2024 Siteflow. All rights reserved.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Core Traits Module
//!
//! The seam shared by the machine-readable outputs. Each feed generator reads
//! the immutable [`SiteContext`] and produces one response body for a fixed
//! route; routing and delivery belong to the caller.

use crate::content::SiteContext;
use crate::core::error::Result;

/// A generated response: route, content type and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    /// Site path the body is served under, e.g. `/sitemap.xml`.
    pub route: &'static str,
    /// Value of the `Content-Type` header.
    pub content_type: &'static str,
    /// Response body.
    pub body: String,
}

/// Trait for generators of machine-readable site outputs.
pub trait FeedGenerator: Send + Sync + std::fmt::Debug {
    /// Site path the output is served under.
    fn route(&self) -> &'static str;

    /// Value of the `Content-Type` header for the output.
    fn content_type(&self) -> &'static str;

    /// Produces the response body from the derived content.
    fn render(&self, context: &SiteContext) -> Result<String>;

    /// Produces the complete [`Feed`].
    fn generate(&self, context: &SiteContext) -> Result<Feed> {
        Ok(Feed {
            route: self.route(),
            content_type: self.content_type(),
            body: self.render(context)?,
        })
    }
}
