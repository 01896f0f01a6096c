// Copyright © 2024 Siteflow. All rights reserved.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `search-index.json`: a flat list of rows for client-side substring search.
//!
//! News and events link to their own detail pages; directory rows link to the
//! shared listing page of their collection.

use serde::{Deserialize, Serialize};

use crate::content::SiteContext;
use crate::core::error::{Result, SiteflowError};
use crate::core::traits::FeedGenerator;
use crate::model::{AlumniItem, DirectoryItem, EventItem, NewsItem};

/// Route of the search index.
pub const SEARCH_INDEX_ROUTE: &str = "/search-index.json";

/// Kind of record a row points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowKind {
    /// News item.
    News,
    /// Event.
    Event,
    /// Public member.
    Member,
    /// Public officer.
    Officer,
    /// Public alumnus.
    Alumni,
}

/// One searchable row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRow {
    /// Record kind.
    #[serde(rename = "type")]
    pub kind: RowKind,
    /// Display title.
    pub title: String,
    /// Short excerpt shown under the title.
    pub excerpt: String,
    /// Site path to navigate to.
    pub url: String,
    /// Lower-cased haystack.
    pub text: String,
}

impl From<&NewsItem> for SearchRow {
    fn from(item: &NewsItem) -> Self {
        Self {
            kind: RowKind::News,
            title: item.title.clone(),
            excerpt: item.summary.clone(),
            url: format!("/news/{}", item.slug),
            text: haystack(&[
                item.title.as_str(),
                item.summary.as_str(),
                item.content.as_str(),
                item.tags.join(" ").as_str(),
            ]),
        }
    }
}

impl From<&EventItem> for SearchRow {
    fn from(item: &EventItem) -> Self {
        Self {
            kind: RowKind::Event,
            title: item.title.clone(),
            excerpt: item.description.clone(),
            url: format!("/events/{}", item.slug),
            text: haystack(&[
                item.title.as_str(),
                item.description.as_str(),
                item.location.as_str(),
            ]),
        }
    }
}

fn member_row(item: &DirectoryItem) -> SearchRow {
    SearchRow {
        kind: RowKind::Member,
        title: item.name.clone(),
        excerpt: item.bio.clone(),
        url: "/members".to_string(),
        text: haystack(&[
            item.name.as_str(),
            item.program.as_str(),
            item.bio.as_str(),
        ]),
    }
}

fn officer_row(item: &DirectoryItem) -> SearchRow {
    let role = item.role.as_deref();
    SearchRow {
        kind: RowKind::Officer,
        title: item.name.clone(),
        excerpt: format!("{} | {}", role.unwrap_or("Officer"), item.program),
        url: "/officers".to_string(),
        text: haystack(&[
            item.name.as_str(),
            role.unwrap_or_default(),
            item.program.as_str(),
            item.bio.as_str(),
        ]),
    }
}

fn alumni_row(item: &AlumniItem) -> SearchRow {
    let position = item.current_position.as_deref();
    SearchRow {
        kind: RowKind::Alumni,
        title: item.name.clone(),
        excerpt: position.unwrap_or(&item.bio).to_string(),
        url: "/alumni".to_string(),
        text: haystack(&[
            item.name.as_str(),
            position.unwrap_or_default(),
            item.bio.as_str(),
        ]),
    }
}

fn haystack(parts: &[&str]) -> String {
    parts.join(" ").to_lowercase()
}

/// Builds every row: news, events, members, officers, alumni, in that order.
pub fn search_rows(context: &SiteContext) -> Vec<SearchRow> {
    let mut rows = Vec::with_capacity(
        context.news().len()
            + context.events().len()
            + context.members().len()
            + context.officers().len()
            + context.alumni().len(),
    );
    rows.extend(context.news().iter().map(SearchRow::from));
    rows.extend(context.events().iter().map(SearchRow::from));
    rows.extend(context.members().iter().map(member_row));
    rows.extend(context.officers().iter().map(officer_row));
    rows.extend(context.alumni().iter().map(alumni_row));
    rows
}

/// Generator for `/search-index.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchIndexGenerator;

impl FeedGenerator for SearchIndexGenerator {
    fn route(&self) -> &'static str {
        SEARCH_INDEX_ROUTE
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn render(&self, context: &SiteContext) -> Result<String> {
        serde_json::to_string(&search_rows(context)).map_err(|e| {
            SiteflowError::internal_error(format!(
                "Failed to serialise search index: {}",
                e
            ))
        })
    }
}
