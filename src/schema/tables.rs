// Copyright © 2024 Siteflow. All rights reserved.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Constraint tables for every content collection, plus the fixed list of
//! files the validator checks.

use std::path::PathBuf;

use super::{Constraint, Field, Schema};

/// Site metadata singleton.
pub const SITE_FILE: &str = "site.json";
/// News list.
pub const NEWS_FILE: &str = "news.json";
/// Events list.
pub const EVENTS_FILE: &str = "events.json";
/// Members directory.
pub const MEMBERS_FILE: &str = "members.json";
/// Officers directory.
pub const OFFICERS_FILE: &str = "officers.json";
/// Alumni directory.
pub const ALUMNI_FILE: &str = "alumni.json";
/// Join-page singleton.
pub const JOIN_FILE: &str = "join.json";

const TEXT: Constraint = Constraint::Text { min_len: 0 };
const NON_EMPTY: Constraint = Constraint::Text { min_len: 1 };

const LINK_FIELDS: &[Field] = &[
    Field::required("label", NON_EMPTY),
    Field::required("url", Constraint::Url),
];
const LINK: Constraint = Constraint::Object(LINK_FIELDS);

const SEO_FIELDS: &[Field] = &[
    Field::required("title", NON_EMPTY),
    Field::required("description", NON_EMPTY),
    Field::required("ogImage", Constraint::RootPath),
];

const DEVELOPER_CREDIT_FIELDS: &[Field] = &[
    Field::required("name", NON_EMPTY),
    Field::required("role", NON_EMPTY),
    Field::required("bioShort", NON_EMPTY),
    Field::required("photo", Constraint::RootPath),
    Field::required("links", Constraint::ListOf(&LINK)),
];

const SITE_FIELDS: &[Field] = &[
    Field::required("siteName", NON_EMPTY),
    Field::required("siteShortName", NON_EMPTY),
    Field::required("tagline", NON_EMPTY),
    Field::required("canonicalBaseUrl", Constraint::Url),
    Field::required("mirrorUrls", Constraint::ListOf(&Constraint::Url)),
    Field::required("email", Constraint::Email),
    Field::required("phone", NON_EMPTY),
    Field::required("address", NON_EMPTY),
    Field::required("mapsEmbedUrl", Constraint::Url),
    Field::required("socialLinks", Constraint::ListOf(&LINK)),
    Field::required(
        "developerCredit",
        Constraint::Object(DEVELOPER_CREDIT_FIELDS),
    ),
];

const NEWS_ITEM_FIELDS: &[Field] = &[
    Field::required("id", NON_EMPTY),
    Field::required("slug", Constraint::Slug),
    Field::required("title", NON_EMPTY),
    Field::required("summary", NON_EMPTY),
    Field::required("content", NON_EMPTY),
    Field::required("coverImage", Constraint::RootPath),
    Field::required("gallery", Constraint::ListOf(&Constraint::RootPath)),
    Field::required("publishedAt", Constraint::Date),
    Field::required("author", NON_EMPTY),
    Field::required("tags", Constraint::ListOf(&NON_EMPTY)),
    Field::required("seo", Constraint::Object(SEO_FIELDS)),
];

// `videoUrl` is free text; events without a recording carry "".
const EVENT_ITEM_FIELDS: &[Field] = &[
    Field::required("id", NON_EMPTY),
    Field::required("slug", Constraint::Slug),
    Field::required("title", NON_EMPTY),
    Field::required("description", NON_EMPTY),
    Field::required("startDate", Constraint::Date),
    Field::required("endDate", Constraint::Date),
    Field::required("location", NON_EMPTY),
    Field::required("registrationUrl", Constraint::Url),
    Field::required("coverImage", Constraint::RootPath),
    Field::required("gallery", Constraint::ListOf(&Constraint::RootPath)),
    Field::required("videoUrl", TEXT),
    Field::required("isFeatured", Constraint::Boolean),
    Field::required("status", Constraint::OneOf(&["upcoming", "past"])),
];

const DIRECTORY_ITEM_FIELDS: &[Field] = &[
    Field::required("id", NON_EMPTY),
    Field::required("name", NON_EMPTY),
    Field::optional("role", TEXT),
    Field::required("program", NON_EMPTY),
    Field::optional("academicLevel", TEXT),
    Field::optional("subject", TEXT),
    Field::optional("enrollmentTerm", TEXT),
    Field::optional("term", TEXT),
    Field::optional("graduationYear", Constraint::Integer),
    Field::optional("currentPosition", TEXT),
    Field::required("photo", Constraint::RootPath),
    Field::required("linkedinUrl", Constraint::Url),
    Field::required("bio", NON_EMPTY),
    Field::required("isPublic", Constraint::Boolean),
];

const ALUMNI_ITEM_FIELDS: &[Field] = &[
    Field::required("id", NON_EMPTY),
    Field::required("name", NON_EMPTY),
    Field::optional("role", TEXT),
    Field::required("program", NON_EMPTY),
    Field::optional("graduationYear", Constraint::Integer),
    Field::optional("currentPosition", TEXT),
    Field::optional("institution", TEXT),
    Field::required("photo", Constraint::RootPath),
    Field::optional("linkedinUrl", Constraint::Url),
    Field::optional("links", Constraint::ListOf(&LINK)),
    Field::required("bio", NON_EMPTY),
    Field::required("isPublic", Constraint::Boolean),
];

const GUIDE_SECTION_FIELDS: &[Field] = &[
    Field::required("title", NON_EMPTY),
    Field::required("content", NON_EMPTY),
];

const JOIN_FIELDS: &[Field] = &[
    Field::required("newMemberFormUrl", Constraint::Url),
    Field::required("achievementFormUrl", Constraint::Url),
    Field::required(
        "newStudentGuideSections",
        Constraint::ListOf(&Constraint::Object(GUIDE_SECTION_FIELDS)),
    ),
];

const PERSON_FIELDS: &[Field] = &[
    Field::required("slug", Constraint::Slug),
    Field::required("name", NON_EMPTY),
    Field::required("headline", NON_EMPTY),
    Field::required("bio", NON_EMPTY),
    Field::required("photo", Constraint::RootPath),
    Field::required("affiliation", NON_EMPTY),
    Field::required("sameAs", Constraint::ListOf(&Constraint::Url)),
    Field::required("highlights", Constraint::ListOf(&NON_EMPTY)),
    Field::required("seo", Constraint::Object(SEO_FIELDS)),
];

const NEWS_ITEM: Constraint = Constraint::Object(NEWS_ITEM_FIELDS);
const EVENT_ITEM: Constraint = Constraint::Object(EVENT_ITEM_FIELDS);
const DIRECTORY_ITEM: Constraint = Constraint::Object(DIRECTORY_ITEM_FIELDS);
const ALUMNI_ITEM: Constraint = Constraint::Object(ALUMNI_ITEM_FIELDS);

/// Site metadata singleton.
pub static SITE: Schema = Schema::new("site", Constraint::Object(SITE_FIELDS));
/// List of news items.
pub static NEWS: Schema = Schema::new("news", Constraint::ListOf(&NEWS_ITEM));
/// List of events.
pub static EVENTS: Schema =
    Schema::new("events", Constraint::ListOf(&EVENT_ITEM));
/// List of members or officers.
pub static DIRECTORY: Schema =
    Schema::new("directory", Constraint::ListOf(&DIRECTORY_ITEM));
/// List of alumni.
pub static ALUMNI: Schema =
    Schema::new("alumni", Constraint::ListOf(&ALUMNI_ITEM));
/// Join-page singleton.
pub static JOIN: Schema = Schema::new("join", Constraint::Object(JOIN_FIELDS));
/// A single person profile.
pub static PERSON: Schema =
    Schema::new("person", Constraint::Object(PERSON_FIELDS));

/// One entry of the validation manifest.
#[derive(Debug, Clone)]
pub struct ContentFile {
    /// Path relative to the data directory.
    pub path: PathBuf,
    /// Contract the file must satisfy.
    pub schema: &'static Schema,
}

impl ContentFile {
    fn new(path: &str, schema: &'static Schema) -> Self {
        Self {
            path: PathBuf::from(path),
            schema,
        }
    }
}

/// Builds the ordered list of (file, schema) pairs checked by the validator.
///
/// `people` lists the person-profile files, relative to the data directory.
pub fn manifest(people: &[String]) -> Vec<ContentFile> {
    let mut files = vec![
        ContentFile::new(SITE_FILE, &SITE),
        ContentFile::new(NEWS_FILE, &NEWS),
        ContentFile::new(EVENTS_FILE, &EVENTS),
        ContentFile::new(MEMBERS_FILE, &DIRECTORY),
        ContentFile::new(OFFICERS_FILE, &DIRECTORY),
        ContentFile::new(ALUMNI_FILE, &ALUMNI),
        ContentFile::new(JOIN_FILE, &JOIN),
    ];
    files.extend(people.iter().map(|path| ContentFile::new(path, &PERSON)));
    files
}
