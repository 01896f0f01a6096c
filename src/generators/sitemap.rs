// Copyright © 2024 Siteflow. All rights reserved.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `sitemap.xml`: static pages first, then news and events in their derived
//! order. Dated items carry `<lastmod>`.

use log::debug;
use serde::Serialize;

use crate::content::SiteContext;
use crate::core::error::Result;
use crate::core::traits::FeedGenerator;
use crate::template::{TemplateEngine, SITEMAP_ENTRY_TEMPLATE};

/// Route of the sitemap.
pub const SITEMAP_ROUTE: &str = "/sitemap.xml";

const HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n";
const FOOTER: &str = "</urlset>\n";

#[derive(Debug, Serialize)]
struct Entry {
    loc: String,
    lastmod: Option<String>,
}

/// Generator for `/sitemap.xml`.
#[derive(Debug, Clone)]
pub struct SitemapGenerator {
    static_paths: Vec<String>,
    engine: TemplateEngine,
}

impl SitemapGenerator {
    /// Creates a generator listing `static_paths` ahead of the dated items.
    pub fn new(static_paths: Vec<String>) -> Result<Self> {
        Ok(Self {
            static_paths,
            engine: TemplateEngine::new()?,
        })
    }

    fn entries(&self, context: &SiteContext) -> Vec<Entry> {
        let statics = self.static_paths.iter().map(|path| Entry {
            loc: context.canonical_url(path),
            lastmod: None,
        });
        let news = context.news().iter().map(|item| Entry {
            loc: context.canonical_url(&format!("/news/{}", item.slug)),
            lastmod: Some(item.published_at.format("%Y-%m-%d").to_string()),
        });
        let events = context.events().iter().map(|item| Entry {
            loc: context.canonical_url(&format!("/events/{}", item.slug)),
            lastmod: Some(item.start_date.format("%Y-%m-%d").to_string()),
        });
        statics.chain(news).chain(events).collect()
    }
}

impl FeedGenerator for SitemapGenerator {
    fn route(&self) -> &'static str {
        SITEMAP_ROUTE
    }

    fn content_type(&self) -> &'static str {
        "application/xml; charset=utf-8"
    }

    fn render(&self, context: &SiteContext) -> Result<String> {
        let entries = self.entries(context);
        debug!("Rendering sitemap with {} entries", entries.len());

        let mut xml = String::from(HEADER);
        for entry in &entries {
            xml.push_str(&self.engine.render(SITEMAP_ENTRY_TEMPLATE, entry)?);
            xml.push('\n');
        }
        xml.push_str(FOOTER);
        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fixtures;

    fn static_paths() -> Vec<String> {
        vec!["/".to_string(), "/news".to_string()]
    }

    #[test]
    fn test_sitemap_orders_statics_news_events() {
        let mut raw = fixtures::raw("https://example.org/");
        raw.news = vec![
            fixtures::news("older", "2024-01-05"),
            fixtures::news("newer", "2024-03-01"),
        ];
        raw.events = vec![fixtures::event("spring-social", "2024-04-12")];
        let context = SiteContext::from_raw(raw);

        let xml = SitemapGenerator::new(static_paths())
            .unwrap()
            .render(&context)
            .unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset"));
        assert!(xml.ends_with("</urlset>\n"));
        assert!(xml.contains("<url><loc>https://example.org</loc></url>\n"));
        assert!(xml.contains("<url><loc>https://example.org/news</loc></url>\n"));

        let newer = xml.find("/news/newer").unwrap();
        let older = xml.find("/news/older").unwrap();
        let event = xml.find("/events/spring-social").unwrap();
        let news_index = xml.find("https://example.org/news<").unwrap();
        assert!(news_index < newer);
        assert!(newer < older);
        assert!(older < event);

        assert!(xml.contains(
            "<url><loc>https://example.org/news/newer</loc><lastmod>2024-03-01</lastmod></url>"
        ));
        assert!(xml.contains(
            "<url><loc>https://example.org/events/spring-social</loc><lastmod>2024-04-12</lastmod></url>"
        ));
    }

    #[test]
    fn test_static_entries_have_no_lastmod() {
        let context =
            SiteContext::from_raw(fixtures::raw("https://example.org"));
        let xml = SitemapGenerator::new(static_paths())
            .unwrap()
            .render(&context)
            .unwrap();
        assert!(!xml.contains("<lastmod>"));
        assert_eq!(xml.matches("<url>").count(), 2);
    }

    #[test]
    fn test_feed_metadata() {
        let context =
            SiteContext::from_raw(fixtures::raw("https://example.org"));
        let feed = SitemapGenerator::new(vec![])
            .unwrap()
            .generate(&context)
            .unwrap();
        assert_eq!(feed.route, "/sitemap.xml");
        assert_eq!(feed.content_type, "application/xml; charset=utf-8");
    }
}
