// Copyright © 2024 Siteflow. All rights reserved.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Template Rendering Module
//!
//! Thin wrapper around a Handlebars registry used for the XML feeds.
//! Values are escaped for XML rather than HTML, and built-in templates are
//! registered up front so a missing or broken template surfaces when the
//! engine is created, not in the middle of a render.

use handlebars::Handlebars;
use log::debug;
use serde::Serialize;

use crate::core::error::{Result, SiteflowError};

/// Name of the built-in sitemap `<url>` element template.
pub const SITEMAP_ENTRY_TEMPLATE: &str = "sitemap-entry";

const SITEMAP_ENTRY_SOURCE: &str =
    "<url><loc>{{loc}}</loc>{{#if lastmod}}<lastmod>{{lastmod}}</lastmod>{{/if}}</url>";

/// Handlebars registry with XML escaping and the built-in feed templates.
#[derive(Clone)]
pub struct TemplateEngine {
    registry: Handlebars<'static>,
}

impl std::fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateEngine")
            .field("templates", &self.registry.get_templates().len())
            .finish()
    }
}

impl TemplateEngine {
    /// Creates an engine with the built-in templates registered.
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(xml_escape);
        Self { registry }.with_template(SITEMAP_ENTRY_TEMPLATE, SITEMAP_ENTRY_SOURCE)
    }

    /// Registers (or replaces) a named template.
    pub fn with_template(mut self, name: &str, source: &str) -> Result<Self> {
        debug!("Registering template `{}`", name);
        self.registry
            .register_template_string(name, source)
            .map_err(|e| {
                SiteflowError::template_rendering_error(
                    format!("Failed to register template: {}", e),
                    name,
                )
            })?;
        Ok(self)
    }

    /// Returns `true` when a template with this name is registered.
    pub fn has_template(&self, name: &str) -> bool {
        self.registry.has_template(name)
    }

    /// Renders a registered template against a serialisable context.
    pub fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<String> {
        if !self.has_template(name) {
            return Err(SiteflowError::template_rendering_error(
                "Template not found",
                name,
            ));
        }
        self.registry.render(name, context).map_err(|e| {
            SiteflowError::template_rendering_error(
                format!("Template rendering failed: {}", e),
                name,
            )
        })
    }
}

/// Escapes the five XML special characters.
pub fn xml_escape(data: &str) -> String {
    let mut escaped = String::with_capacity(data.len());
    for c in data.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sitemap_template_is_builtin() {
        let engine = TemplateEngine::new().unwrap();
        assert!(engine.has_template(SITEMAP_ENTRY_TEMPLATE));

        let bare = engine
            .render(
                SITEMAP_ENTRY_TEMPLATE,
                &json!({ "loc": "https://example.org", "lastmod": null }),
            )
            .unwrap();
        assert_eq!(bare, "<url><loc>https://example.org</loc></url>");

        let dated = engine
            .render(
                SITEMAP_ENTRY_TEMPLATE,
                &json!({ "loc": "https://example.org/news/a", "lastmod": "2024-01-05" }),
            )
            .unwrap();
        assert_eq!(
            dated,
            "<url><loc>https://example.org/news/a</loc><lastmod>2024-01-05</lastmod></url>"
        );
    }

    #[test]
    fn test_values_are_xml_escaped() {
        let engine = TemplateEngine::new()
            .unwrap()
            .with_template("loc", "<loc>{{value}}</loc>")
            .unwrap();
        let rendered = engine
            .render("loc", &json!({ "value": "https://example.org/?a=1&b='2'" }))
            .unwrap();
        assert_eq!(
            rendered,
            "<loc>https://example.org/?a=1&amp;b=&apos;2&apos;</loc>"
        );
    }

    #[test]
    fn test_unknown_template_and_missing_values() {
        let engine = TemplateEngine::new().unwrap();
        assert!(matches!(
            engine.render("missing", &json!({})),
            Err(SiteflowError::TemplateRenderingError { .. })
        ));

        let engine = engine.with_template("greeting", "Hello {{name}}").unwrap();
        assert_eq!(engine.render("greeting", &json!({})).unwrap(), "Hello ");
        assert_eq!(
            engine.render("greeting", &json!({ "name": "campus" })).unwrap(),
            "Hello campus"
        );
    }

    #[test]
    fn test_broken_template_is_rejected() {
        let result = TemplateEngine::new()
            .unwrap()
            .with_template("broken", "{{#each entries}}");
        assert!(matches!(
            result,
            Err(SiteflowError::TemplateRenderingError { .. })
        ));
    }
}
