// Copyright © 2024 Siteflow. All rights reserved.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Content Derivation Module
//!
//! Loads every collection once into an immutable [`SiteContext`] and exposes
//! the derived views consumed by the feed generators and page templates:
//!
//! - news, most recent first (stable for equal dates)
//! - events, soonest first (stable for equal dates)
//! - members, officers and alumni, restricted to public records in source order
//! - site, join and person profiles as-is
//!
//! The context is built once per process and passed by reference; nothing
//! mutates it afterwards.

use std::fs;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use crate::core::error::{Result, SiteflowError};
use crate::model::{
    AlumniItem, DirectoryItem, EventItem, JoinInfo, NewsItem, Person, Site,
};
use crate::schema::tables::{
    ALUMNI_FILE, EVENTS_FILE, JOIN_FILE, MEMBERS_FILE, NEWS_FILE,
    OFFICERS_FILE, SITE_FILE,
};

/// Raw collections exactly as read from disk, before any derivation.
#[derive(Debug, Clone)]
pub struct RawContent {
    /// Site metadata.
    pub site: Site,
    /// News in source order.
    pub news: Vec<NewsItem>,
    /// Events in source order.
    pub events: Vec<EventItem>,
    /// All members, public or not.
    pub members: Vec<DirectoryItem>,
    /// All officers, public or not.
    pub officers: Vec<DirectoryItem>,
    /// All alumni, public or not.
    pub alumni: Vec<AlumniItem>,
    /// Join page.
    pub join: JoinInfo,
    /// Person profiles in manifest order.
    pub people: Vec<Person>,
}

impl RawContent {
    /// Reads every collection from `data_dir`.
    ///
    /// `people` lists person-profile files relative to `data_dir`.
    pub fn load(data_dir: &Path, people: &[String]) -> Result<Self> {
        Ok(Self {
            site: load_json(&data_dir.join(SITE_FILE))?,
            news: load_json(&data_dir.join(NEWS_FILE))?,
            events: load_json(&data_dir.join(EVENTS_FILE))?,
            members: load_json(&data_dir.join(MEMBERS_FILE))?,
            officers: load_json(&data_dir.join(OFFICERS_FILE))?,
            alumni: load_json(&data_dir.join(ALUMNI_FILE))?,
            join: load_json(&data_dir.join(JOIN_FILE))?,
            people: people
                .iter()
                .map(|file| load_json(&data_dir.join(file)))
                .collect::<Result<Vec<_>>>()?,
        })
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    debug!("Loading {}", path.display());
    let raw = fs::read_to_string(path)
        .map_err(|e| SiteflowError::read_error(path.to_path_buf(), e))?;
    serde_json::from_str(&raw)
        .map_err(|e| SiteflowError::parse_error(path.to_path_buf(), e))
}

/// Immutable snapshot of all derived collections.
#[derive(Debug, Clone)]
pub struct SiteContext {
    site: Site,
    base_url: String,
    news: Vec<NewsItem>,
    events: Vec<EventItem>,
    members: Vec<DirectoryItem>,
    officers: Vec<DirectoryItem>,
    alumni: Vec<AlumniItem>,
    join: JoinInfo,
    people: Vec<Person>,
}

impl SiteContext {
    /// Loads `data_dir` and derives every view.
    pub fn load(data_dir: &Path, people: &[String]) -> Result<Self> {
        let context = Self::from_raw(RawContent::load(data_dir, people)?);
        info!(
            "Loaded content from {}: {} news, {} events, {} members, {} officers, {} alumni",
            data_dir.display(),
            context.news.len(),
            context.events.len(),
            context.members.len(),
            context.officers.len(),
            context.alumni.len()
        );
        Ok(context)
    }

    /// Derives every view from already-loaded collections.
    pub fn from_raw(raw: RawContent) -> Self {
        let RawContent {
            site,
            mut news,
            mut events,
            members,
            officers,
            alumni,
            join,
            people,
        } = raw;

        // `sort_by` is stable: equal dates keep their source order.
        news.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        events.sort_by(|a, b| a.start_date.cmp(&b.start_date));

        for (index, person) in people.iter().enumerate() {
            if people[..index].iter().any(|p| p.slug == person.slug) {
                warn!("Duplicate person slug `{}`", person.slug);
            }
        }

        let base_url = site.canonical_base_url.trim_end_matches('/').to_string();

        Self {
            site,
            base_url,
            news,
            events,
            members: members.into_iter().filter(|m| m.is_public).collect(),
            officers: officers.into_iter().filter(|o| o.is_public).collect(),
            alumni: alumni.into_iter().filter(|a| a.is_public).collect(),
            join,
            people,
        }
    }

    /// Site metadata.
    pub fn site(&self) -> &Site {
        &self.site
    }

    /// News, most recent first.
    pub fn news(&self) -> &[NewsItem] {
        &self.news
    }

    /// Events, soonest first.
    pub fn events(&self) -> &[EventItem] {
        &self.events
    }

    /// Public members in source order.
    pub fn members(&self) -> &[DirectoryItem] {
        &self.members
    }

    /// Public officers in source order.
    pub fn officers(&self) -> &[DirectoryItem] {
        &self.officers
    }

    /// Public alumni in source order.
    pub fn alumni(&self) -> &[AlumniItem] {
        &self.alumni
    }

    /// Join page.
    pub fn join(&self) -> &JoinInfo {
        &self.join
    }

    /// Person profiles in manifest order.
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    /// Looks up a person profile by slug.
    pub fn person(&self, slug: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.slug == slug)
    }

    /// Builds the canonical absolute URL for a site path.
    pub fn canonical_url(&self, path: &str) -> String {
        canonical_url(&self.base_url, path)
    }
}

/// Joins `base` and `path` with exactly one slash; the root path maps to the
/// bare base URL.
///
/// ```
/// # use siteflow::content::canonical_url;
/// assert_eq!(canonical_url("https://example.org/", "/"), "https://example.org");
/// assert_eq!(canonical_url("https://example.org/", "news/x"), "https://example.org/news/x");
/// ```
pub fn canonical_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path == "/" || path.is_empty() {
        return base.to_string();
    }
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Renders a calendar date as `January 5, 2024` (en-US, long month).
///
/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp, which is read in UTC.
pub fn format_date(iso: &str) -> Result<String> {
    let date = NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .or_else(|_| {
            DateTime::parse_from_rfc3339(iso)
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
        .map_err(|e| {
            SiteflowError::internal_error(format!(
                "Invalid date `{}`: {}",
                iso, e
            ))
        })?;
    Ok(format_naive_date(date))
}

/// Renders an already-parsed date the same way as [`format_date`].
pub fn format_naive_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}


#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    #[test]
    fn test_news_sorted_most_recent_first() {
        let mut raw = fixtures::raw("https://example.org/");
        raw.news = vec![
            fixtures::news("january", "2024-01-05"),
            fixtures::news("march", "2024-03-01"),
            fixtures::news("february", "2024-02-10"),
        ];
        let context = SiteContext::from_raw(raw);
        let slugs: Vec<_> =
            context.news().iter().map(|n| n.slug.as_str()).collect();
        assert_eq!(slugs, vec!["march", "february", "january"]);
    }

    #[test]
    fn test_equal_dates_keep_source_order() {
        let mut raw = fixtures::raw("https://example.org");
        raw.news = vec![
            fixtures::news("first", "2024-01-05"),
            fixtures::news("newer", "2024-02-01"),
            fixtures::news("second", "2024-01-05"),
            fixtures::news("third", "2024-01-05"),
        ];
        raw.events = vec![
            fixtures::event("b", "2024-05-01"),
            fixtures::event("a", "2024-05-01"),
            fixtures::event("early", "2024-04-01"),
        ];
        let context = SiteContext::from_raw(raw);
        let news: Vec<_> =
            context.news().iter().map(|n| n.slug.as_str()).collect();
        assert_eq!(news, vec!["newer", "first", "second", "third"]);
        let events: Vec<_> =
            context.events().iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(events, vec!["early", "b", "a"]);
    }

    #[test]
    fn test_directory_views_drop_private_records() {
        let mut raw = fixtures::raw("https://example.org");
        raw.members = vec![
            fixtures::directory("m1", true, None),
            fixtures::directory("m2", false, None),
            fixtures::directory("m3", true, None),
        ];
        raw.officers = vec![fixtures::directory("o1", false, Some("Chair"))];
        raw.alumni = vec![
            fixtures::alumnus("a1", false, None),
            fixtures::alumnus("a2", true, None),
        ];
        let context = SiteContext::from_raw(raw);
        let members: Vec<_> =
            context.members().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(members, vec!["m1", "m3"]);
        assert!(context.officers().is_empty());
        assert_eq!(context.alumni().len(), 1);
        assert_eq!(context.alumni()[0].id, "a2");
    }

    #[test]
    fn test_canonical_url() {
        assert_eq!(canonical_url("https://example.org/", "/"), "https://example.org");
        assert_eq!(canonical_url("https://example.org", "/"), "https://example.org");
        assert_eq!(
            canonical_url("https://example.org/", "/news/x"),
            "https://example.org/news/x"
        );
        assert_eq!(
            canonical_url("https://example.org", "news/x"),
            "https://example.org/news/x"
        );
        assert_eq!(canonical_url("https://example.org", ""), "https://example.org");

        let context =
            SiteContext::from_raw(fixtures::raw("https://example.org/"));
        assert_eq!(
            context.canonical_url("/sitemap.xml"),
            "https://example.org/sitemap.xml"
        );
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-01-05").unwrap(), "January 5, 2024");
        assert_eq!(format_date("2023-12-31").unwrap(), "December 31, 2023");
        assert_eq!(
            format_date("2024-03-01T23:30:00-05:00").unwrap(),
            "March 2, 2024"
        );
        assert!(format_date("not a date").is_err());
    }

    #[test]
    fn test_person_lookup() {
        let mut raw = fixtures::raw("https://example.org");
        raw.people.push(fixtures::person("second-profile"));
        let context = SiteContext::from_raw(raw);
        assert_eq!(context.people().len(), 2);
        assert!(context.person("second-profile").is_some());
        assert!(context.person("missing").is_none());
    }

    #[test]
    fn test_load_reports_missing_and_malformed_files() {
        let temp_dir = TempDir::new().unwrap();
        let people = vec!["people/p.json".to_string()];

        let err = SiteContext::load(temp_dir.path(), &people).unwrap_err();
        assert!(matches!(err, SiteflowError::ReadError { .. }));

        fs::write(temp_dir.path().join(SITE_FILE), "{ not json").unwrap();
        let err = SiteContext::load(temp_dir.path(), &people).unwrap_err();
        assert!(matches!(err, SiteflowError::ParseError { .. }));
    }

    proptest! {
        #[test]
        fn prop_news_descending_events_ascending(
            news_days in prop::collection::vec(0u32..400, 0..20),
            event_days in prop::collection::vec(0u32..400, 0..20),
        ) {
            let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
            let date = |days: u32| {
                (start + chrono::Duration::days(i64::from(days)))
                    .format("%Y-%m-%d")
                    .to_string()
            };
            let mut raw = fixtures::raw("https://example.org");
            raw.news = news_days
                .iter()
                .enumerate()
                .map(|(i, d)| fixtures::news(&format!("n{}", i), &date(*d)))
                .collect();
            raw.events = event_days
                .iter()
                .enumerate()
                .map(|(i, d)| fixtures::event(&format!("e{}", i), &date(*d)))
                .collect();

            let context = SiteContext::from_raw(raw);
            prop_assert_eq!(context.news().len(), news_days.len());
            for pair in context.news().windows(2) {
                prop_assert!(pair[0].published_at >= pair[1].published_at);
            }
            for pair in context.events().windows(2) {
                prop_assert!(pair[0].start_date <= pair[1].start_date);
            }
        }

        #[test]
        fn prop_public_records_kept_once_in_order(
            flags in prop::collection::vec(any::<bool>(), 0..30),
        ) {
            let mut raw = fixtures::raw("https://example.org");
            raw.members = flags
                .iter()
                .enumerate()
                .map(|(i, public)| {
                    fixtures::directory(&format!("m{}", i), *public, None)
                })
                .collect();
            let expected: Vec<String> = flags
                .iter()
                .enumerate()
                .filter(|(_, public)| **public)
                .map(|(i, _)| format!("m{}", i))
                .collect();

            let context = SiteContext::from_raw(raw);
            let actual: Vec<String> =
                context.members().iter().map(|m| m.id.clone()).collect();
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn prop_canonical_url_single_separator(
            trailing in any::<bool>(),
            segments in prop::collection::vec("[a-z0-9-]{1,8}", 1..4),
        ) {
            let base = if trailing { "https://example.org/" } else { "https://example.org" };
            let path = format!("/{}", segments.join("/"));
            let url = canonical_url(base, &path);
            prop_assert_eq!(url, format!("https://example.org{}", path));
        }
    }
}
