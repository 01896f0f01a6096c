// Copyright © 2024 Siteflow. All rights reserved.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Siteflow Library
//!
//! Siteflow is the content pipeline of a static organisation website. It
//! validates the JSON content files against declarative schemas, derives
//! sorted and filtered views from them, and generates the site's
//! machine-readable outputs: `sitemap.xml`, `search-index.json` and
//! `robots.txt`.
//!
//! For more information, visit the [Siteflow documentation](https://docs.rs/siteflow).

#![doc = include_str!("../README.md")]
#![doc(html_root_url = "https://docs.rs/siteflow")]
#![crate_name = "siteflow"]
#![crate_type = "lib"]

/// Command-line interface.
pub mod cli;

/// Content loading and derived views.
pub mod content;

/// Configuration, errors and the feed generator trait.
pub mod core;

/// Feed generators and output writing.
pub mod generators;

/// Typed content records.
pub mod model;

/// Validation run over the content manifest.
pub mod process;

/// Declarative schemas and the value checker.
pub mod schema;

/// Template rendering utilities.
pub mod template;

pub use crate::content::SiteContext;
pub use crate::core::config::{Config, ConfigBuilder};
pub use crate::core::error::{Result, SiteflowError};
pub use crate::core::traits::{Feed, FeedGenerator};
pub use crate::process::{validate_content, ValidationReport};
pub use crate::schema::ValidationError;
