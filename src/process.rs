// Copyright © 2024 Siteflow. All rights reserved.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Validation Run
//!
//! Walks the content manifest in order. Each file is read, parsed as JSON
//! and checked against its schema.
//!
//! - An unreadable or missing file aborts the run with
//!   [`SiteflowError::ReadError`].
//! - Malformed JSON is recorded against that file and the run moves on.
//! - Field violations are accumulated, so one run reports every problem.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde_json::Value;

use crate::core::error::{Result, SiteflowError};
use crate::schema::tables::ContentFile;
use crate::schema::ValidationError;

/// Reads a content file as UTF-8 text.
///
/// # Errors
///
/// Returns [`SiteflowError::ReadError`] if the file is missing or unreadable.
pub fn read_content<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path)
        .map_err(|e| SiteflowError::read_error(path.to_path_buf(), e))
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Parsed and matched its schema.
    Valid,
    /// Not well-formed JSON; holds the parser message.
    Malformed(String),
    /// Parsed, with one or more field violations.
    Invalid(Vec<ValidationError>),
}

/// Outcome for a single manifest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Path relative to the data directory.
    pub file: PathBuf,
    /// Result of checking the file.
    pub outcome: FileOutcome,
}

impl FileReport {
    /// Returns `true` unless the file is valid.
    pub fn is_failure(&self) -> bool {
        !matches!(self.outcome, FileOutcome::Valid)
    }
}

/// Per-file outcomes of a validation run, in manifest order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// One report per manifest entry.
    pub files: Vec<FileReport>,
}

impl ValidationReport {
    /// Returns `true` if any file is malformed or has violations.
    pub fn has_errors(&self) -> bool {
        self.files.iter().any(FileReport::is_failure)
    }

    /// Reports for the files that did not pass.
    pub fn failures(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|report| report.is_failure())
    }

    /// Total number of field violations across all files.
    pub fn violation_count(&self) -> usize {
        self.files
            .iter()
            .map(|report| match &report.outcome {
                FileOutcome::Invalid(errors) => errors.len(),
                _ => 0,
            })
            .sum()
    }

    /// Renders the failure listing printed to stderr, with file names shown
    /// under `data_dir`.
    ///
    /// ```text
    /// Validation failed for data/news.json
    /// - 0.slug: Invalid: must match ^[a-z0-9-]+$
    /// ```
    pub fn render(&self, data_dir: &Path) -> String {
        let mut out = String::new();
        for report in self.failures() {
            let shown = data_dir.join(&report.file);
            match &report.outcome {
                FileOutcome::Malformed(message) => {
                    let _ = writeln!(
                        out,
                        "Failed to parse {}: {}",
                        shown.display(),
                        message
                    );
                }
                FileOutcome::Invalid(errors) => {
                    let _ = writeln!(
                        out,
                        "Validation failed for {}",
                        shown.display()
                    );
                    for error in errors {
                        let _ = writeln!(out, "- {}", error);
                    }
                }
                FileOutcome::Valid => {}
            }
        }
        out
    }
}

/// Checks one file's text against its schema.
pub fn check_file(entry: &ContentFile, text: &str) -> FileOutcome {
    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => return FileOutcome::Malformed(e.to_string()),
    };
    let errors = entry.schema.validate(&value);
    if errors.is_empty() {
        FileOutcome::Valid
    } else {
        FileOutcome::Invalid(errors)
    }
}

/// Validates every manifest entry under `data_dir`.
///
/// # Errors
///
/// Stops at the first file that cannot be read.
pub fn validate_content(
    data_dir: &Path,
    manifest: &[ContentFile],
) -> Result<ValidationReport> {
    let mut report = ValidationReport::default();
    for entry in manifest {
        let path = data_dir.join(&entry.path);
        debug!("Validating {} as {}", path.display(), entry.schema.name);
        let text = read_content(&path)?;
        let outcome = check_file(entry, &text);
        if let FileOutcome::Invalid(errors) = &outcome {
            debug!("{}: {} violation(s)", path.display(), errors.len());
        }
        report.files.push(FileReport {
            file: entry.path.clone(),
            outcome,
        });
    }

    info!(
        "Validated {} file(s): {} failing, {} violation(s)",
        report.files.len(),
        report.failures().count(),
        report.violation_count()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::SiteContext;
    use crate::schema::tables::{manifest, NEWS_FILE};
    use serde_json::json;
    use tempfile::TempDir;

    const PEOPLE: &str = "people/profile.json";

    fn write_json(dir: &Path, file: &str, value: &Value) {
        let path = dir.join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, serde_json::to_string_pretty(value).unwrap())
            .unwrap();
    }

    fn news_item(slug: &str) -> Value {
        json!({
            "id": "news-001",
            "slug": slug,
            "title": "Welcome night",
            "summary": "Meet the board.",
            "content": "Full write-up.",
            "coverImage": "/images/news/welcome.jpg",
            "gallery": [],
            "publishedAt": "2024-01-05",
            "author": "Media Team",
            "tags": ["community"],
            "seo": {
                "title": "Welcome night",
                "description": "Meet the board.",
                "ogImage": "/images/news/welcome.jpg"
            }
        })
    }

    fn valid_tree() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        write_json(
            dir,
            "site.json",
            &json!({
                "siteName": "Student Association",
                "siteShortName": "SA",
                "tagline": "Together on campus",
                "canonicalBaseUrl": "https://example.org",
                "mirrorUrls": [],
                "email": "board@example.org",
                "phone": "+1 555 0100",
                "address": "1 Campus Way",
                "mapsEmbedUrl": "https://maps.example.org/embed",
                "socialLinks": [],
                "developerCredit": {
                    "name": "Dev",
                    "role": "Web lead",
                    "bioShort": "Builds the site.",
                    "photo": "/images/dev.jpg",
                    "links": []
                }
            }),
        );
        write_json(dir, "news.json", &json!([news_item("welcome-night")]));
        write_json(dir, "events.json", &json!([]));
        write_json(dir, "members.json", &json!([]));
        write_json(dir, "officers.json", &json!([]));
        write_json(dir, "alumni.json", &json!([]));
        write_json(
            dir,
            "join.json",
            &json!({
                "newMemberFormUrl": "https://forms.example.org/join",
                "achievementFormUrl": "https://forms.example.org/achievement",
                "newStudentGuideSections": []
            }),
        );
        write_json(
            dir,
            PEOPLE,
            &json!({
                "slug": "profile",
                "name": "Profile Name",
                "headline": "Researcher",
                "bio": "Bio",
                "photo": "/images/people/profile.jpg",
                "affiliation": "University",
                "sameAs": [],
                "highlights": [],
                "seo": {
                    "title": "Profile",
                    "description": "Profile page",
                    "ogImage": "/images/people/profile.jpg"
                }
            }),
        );
        temp_dir
    }

    #[test]
    fn test_valid_tree_passes() {
        let temp_dir = valid_tree();
        let report =
            validate_content(temp_dir.path(), &manifest(&[PEOPLE.into()]))
                .unwrap();
        assert_eq!(report.files.len(), 8);
        assert!(!report.has_errors());
        assert_eq!(report.render(Path::new("data")), "");
    }

    #[test]
    fn test_bad_slug_is_one_violation_and_run_continues() {
        let temp_dir = valid_tree();
        write_json(temp_dir.path(), NEWS_FILE, &json!([news_item("My Slug!")]));
        // A later file is broken too; it must still be reported.
        fs::write(temp_dir.path().join("alumni.json"), "[{").unwrap();

        let report =
            validate_content(temp_dir.path(), &manifest(&[PEOPLE.into()]))
                .unwrap();
        assert!(report.has_errors());
        assert_eq!(report.files.len(), 8);
        assert_eq!(report.failures().count(), 2);

        let news = &report.files[1];
        assert_eq!(news.file, PathBuf::from("news.json"));
        match &news.outcome {
            FileOutcome::Invalid(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].path, "0.slug");
                assert!(errors[0].message.contains("^[a-z0-9-]+$"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(matches!(report.files[5].outcome, FileOutcome::Malformed(_)));

        let rendered = report.render(Path::new("data"));
        assert!(rendered.starts_with(
            "Validation failed for data/news.json\n- 0.slug: Invalid: must match ^[a-z0-9-]+$\n"
        ));
        assert!(rendered.contains("Failed to parse data/alumni.json: "));
    }

    #[test]
    fn test_missing_file_aborts_with_read_error() {
        let temp_dir = valid_tree();
        fs::remove_file(temp_dir.path().join("events.json")).unwrap();

        let result =
            validate_content(temp_dir.path(), &manifest(&[PEOPLE.into()]));
        match result {
            Err(SiteflowError::ReadError { path, .. }) => {
                assert!(path.ends_with("events.json"));
            }
            other => panic!("expected ReadError, got {:?}", other),
        }
    }

    #[test]
    fn test_violations_are_counted_per_field() {
        let temp_dir = valid_tree();
        let mut item = news_item("ok-slug");
        item["publishedAt"] = json!("2024-02-30");
        item["coverImage"] = json!("images/cover.jpg");
        write_json(temp_dir.path(), NEWS_FILE, &json!([item]));

        let report =
            validate_content(temp_dir.path(), &manifest(&[PEOPLE.into()]))
                .unwrap();
        assert_eq!(report.violation_count(), 2);
    }

    fn directory_entry(id: &str, year: Value) -> Value {
        json!({
            "id": id,
            "name": "Nusrat Jahan",
            "program": "MS in Computer Science",
            "graduationYear": year,
            "photo": "/images/members/nusrat.jpg",
            "linkedinUrl": "https://linkedin.com/in/nusrat",
            "bio": "Works on distributed systems.",
            "isPublic": true
        })
    }

    #[test]
    fn test_validated_whole_number_years_load() {
        let temp_dir = valid_tree();
        let people = [PEOPLE.to_string()];
        write_json(
            temp_dir.path(),
            "members.json",
            &json!([
                directory_entry("member-001", json!(2021.0)),
                directory_entry("member-002", json!(3_000_000_000_u64)),
            ]),
        );
        let mut alumnus = directory_entry("alumni-001", json!(2019.0));
        let _ = alumnus.as_object_mut().unwrap().remove("linkedinUrl");
        write_json(temp_dir.path(), "alumni.json", &json!([alumnus]));

        let report =
            validate_content(temp_dir.path(), &manifest(&people)).unwrap();
        assert!(!report.has_errors(), "{}", report.render(temp_dir.path()));

        let context = SiteContext::load(temp_dir.path(), &people).unwrap();
        let years: Vec<_> =
            context.members().iter().map(|m| m.graduation_year).collect();
        assert_eq!(years, vec![Some(2021), Some(3_000_000_000)]);
        assert_eq!(context.alumni()[0].graduation_year, Some(2019));
    }

    #[test]
    fn test_fractional_year_fails_validation_before_load() {
        let temp_dir = valid_tree();
        let people = [PEOPLE.to_string()];
        write_json(
            temp_dir.path(),
            "members.json",
            &json!([directory_entry("member-001", json!(2021.5))]),
        );

        let report =
            validate_content(temp_dir.path(), &manifest(&people)).unwrap();
        assert_eq!(report.violation_count(), 1);
        assert!(SiteContext::load(temp_dir.path(), &people).is_err());
    }

    #[test]
    fn test_read_content_missing_file() {
        let result = read_content("definitely/not/here.json");
        assert!(matches!(result, Err(SiteflowError::ReadError { .. })));
    }
}
