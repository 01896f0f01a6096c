// Copyright © 2024 Siteflow. All rights reserved.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Content Records
//!
//! Typed, read-only records for every content collection. Field names are
//! camelCase on the wire, matching the JSON files under the data directory.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::schema::whole_number;

/// A labelled external link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Display label.
    pub label: String,
    /// Absolute URL.
    pub url: String,
}

/// Search-engine metadata attached to a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seo {
    /// Page title.
    pub title: String,
    /// Meta description.
    pub description: String,
    /// Open Graph image path.
    pub og_image: String,
}

/// Credit block for the site's developer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperCredit {
    /// Developer name.
    pub name: String,
    /// Role on the project.
    pub role: String,
    /// Short biography.
    pub bio_short: String,
    /// Photo path.
    pub photo: String,
    /// External profiles.
    pub links: Vec<Link>,
}

/// Site-wide metadata singleton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    /// Full organisation name.
    pub site_name: String,
    /// Abbreviated name.
    pub site_short_name: String,
    /// Tagline.
    pub tagline: String,
    /// Base URL every canonical link is built from.
    pub canonical_base_url: String,
    /// Mirror deployments.
    pub mirror_urls: Vec<String>,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Postal address.
    pub address: String,
    /// Embedded map URL.
    pub maps_embed_url: String,
    /// Social media links.
    pub social_links: Vec<Link>,
    /// Developer credit.
    pub developer_credit: DeveloperCredit,
}

/// A news post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    /// Stable identifier.
    pub id: String,
    /// URL slug.
    pub slug: String,
    /// Headline.
    pub title: String,
    /// Teaser text.
    pub summary: String,
    /// Body.
    pub content: String,
    /// Cover image path.
    pub cover_image: String,
    /// Gallery image paths.
    pub gallery: Vec<String>,
    /// Publication date.
    pub published_at: NaiveDate,
    /// Author.
    pub author: String,
    /// Tags.
    pub tags: Vec<String>,
    /// Search-engine metadata.
    pub seo: Seo,
}

/// Whether an event is still ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// Not yet held.
    Upcoming,
    /// Already held.
    Past,
}

/// An event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventItem {
    /// Stable identifier.
    pub id: String,
    /// URL slug.
    pub slug: String,
    /// Event name.
    pub title: String,
    /// Description.
    pub description: String,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day.
    pub end_date: NaiveDate,
    /// Venue.
    pub location: String,
    /// Registration form URL.
    pub registration_url: String,
    /// Cover image path.
    pub cover_image: String,
    /// Gallery image paths.
    pub gallery: Vec<String>,
    /// Recording link; empty when there is none.
    pub video_url: String,
    /// Highlighted on the home page.
    pub is_featured: bool,
    /// Upcoming or past.
    pub status: EventStatus,
}

/// A member or officer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryItem {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Officer role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Programme of study.
    pub program: String,
    /// PhD, MS, Undergrad...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub academic_level: Option<String>,
    /// Subject of study.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Enrollment term, e.g. `Fall 2025`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrollment_term: Option<String>,
    /// Officer term.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    /// Expected or actual graduation year.
    #[serde(
        default,
        deserialize_with = "whole_year",
        skip_serializing_if = "Option::is_none"
    )]
    pub graduation_year: Option<i64>,
    /// Current job.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_position: Option<String>,
    /// Photo path.
    pub photo: String,
    /// LinkedIn profile.
    pub linkedin_url: String,
    /// Biography.
    pub bio: String,
    /// Visibility flag.
    pub is_public: bool,
}

/// An alumni record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlumniItem {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Role, usually `Alumnus`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Programme completed.
    pub program: String,
    /// Graduation year.
    #[serde(
        default,
        deserialize_with = "whole_year",
        skip_serializing_if = "Option::is_none"
    )]
    pub graduation_year: Option<i64>,
    /// Current job.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_position: Option<String>,
    /// Employer or institution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    /// Photo path.
    pub photo: String,
    /// LinkedIn profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    /// Other profiles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Link>>,
    /// Biography.
    pub bio: String,
    /// Visibility flag.
    pub is_public: bool,
}

/// One section of the new-student guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideSection {
    /// Heading.
    pub title: String,
    /// Body.
    pub content: String,
}

/// Join-page singleton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinInfo {
    /// Membership form.
    pub new_member_form_url: String,
    /// Achievement submission form.
    pub achievement_form_url: String,
    /// Ordered guide sections.
    pub new_student_guide_sections: Vec<GuideSection>,
}

/// A standalone person profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// URL slug.
    pub slug: String,
    /// Full name.
    pub name: String,
    /// One-line headline.
    pub headline: String,
    /// Biography.
    pub bio: String,
    /// Photo path.
    pub photo: String,
    /// Affiliation.
    pub affiliation: String,
    /// External profile URLs.
    pub same_as: Vec<String>,
    /// Highlight bullet points.
    pub highlights: Vec<String>,
    /// Search-engine metadata.
    pub seo: Seo,
}

/// Accepts any JSON number the `Integer` constraint accepts, so `2021.0`
/// loads as `2021`.
fn whole_year<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    whole_number(&value).map(Some).ok_or_else(|| {
        <D::Error as serde::de::Error>::custom(format!(
            "expected a whole year, found {}",
            value
        ))
    })
}
