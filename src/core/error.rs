// Copyright © 2024 Siteflow. All rights reserved.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Error Handling for Siteflow
//!
//! This module defines the error taxonomy shared by the validator, the
//! content loader and the feed generators. The `thiserror` crate is used to
//! keep the variants declarative.
//!
//! Field-level schema violations are *not* errors in this sense: they are
//! collected as [`crate::schema::ValidationError`] values so that a single run
//! can report every problem at once.

use std::path::PathBuf;
use thiserror::Error;

/// A unified result type for the Siteflow library.
pub type Result<T> = std::result::Result<T, SiteflowError>;

/// The main error type for Siteflow, encompassing all fatal error cases.
#[derive(Error, Debug)]
pub enum SiteflowError {
    /// A content file is missing or unreadable.
    ///
    /// This is fatal for a whole validator run.
    #[error("Failed to read `{}`: {source}", path.display())]
    ReadError {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A content file holds malformed JSON, or JSON that does not match the
    /// typed record it is loaded into.
    #[error("Failed to parse `{}`: {source}", path.display())]
    ParseError {
        /// Path of the file that could not be parsed.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Error related to configuration initialisation or validation.
    #[error("Configuration error: {message}.")]
    ConfigError {
        /// Detailed description of the configuration error.
        message: String,
        /// Optional path of the file or directory that caused the error.
        path: Option<PathBuf>,
    },

    /// Error related to template registration or rendering.
    #[error(
        "Template rendering error: {message} in template `{template}`."
    )]
    TemplateRenderingError {
        /// Description of the template rendering error.
        message: String,
        /// The template identifier associated with the error.
        template: String,
    },

    /// Error while writing a generated feed to disk.
    #[error("Output generation error at `{}`: {source}", path.display())]
    OutputGenerationError {
        /// Path associated with the error.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// General internal error.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl SiteflowError {
    /// Creates a `ReadError` for the given path.
    pub fn read_error(path: PathBuf, source: std::io::Error) -> Self {
        SiteflowError::ReadError { path, source }
    }

    /// Creates a `ParseError` for the given path.
    pub fn parse_error(path: PathBuf, source: serde_json::Error) -> Self {
        SiteflowError::ParseError { path, source }
    }

    /// Creates a `ConfigError` with a specific message.
    ///
    /// # Parameters
    /// - `message`: A description of the configuration error.
    /// - `path`: Optional path of the file causing the error.
    pub fn config_error<S: Into<String>>(
        message: S,
        path: Option<PathBuf>,
    ) -> Self {
        SiteflowError::ConfigError {
            message: message.into(),
            path,
        }
    }

    /// Creates a `TemplateRenderingError` with a message and template name.
    pub fn template_rendering_error<S: Into<String>>(
        message: S,
        template: &str,
    ) -> Self {
        SiteflowError::TemplateRenderingError {
            message: message.into(),
            template: template.to_string(),
        }
    }

    /// Wraps an IO error raised while writing output.
    pub fn output_error(path: PathBuf, source: std::io::Error) -> Self {
        SiteflowError::OutputGenerationError { path, source }
    }

    /// Creates a general internal error with a custom message.
    pub fn internal_error<S: Into<String>>(message: S) -> Self {
        SiteflowError::InternalError(message.into())
    }
}
