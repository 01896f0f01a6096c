// Copyright © 2024 Siteflow. All rights reserved.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Command-line interface for Siteflow
//!
//! Parses arguments, resolves the [`Config`] and runs one of:
//!
//! - `validate` (also the default with no subcommand): check every content
//!   file and exit non-zero on any violation;
//! - `build`: validate, then write every feed into the output directory;
//! - `feed <name>`: print a single feed body to stdout.
//!
//! # Examples
//!
//! ```
//! use siteflow::cli;
//!
//! let matches = cli::build().get_matches_from(vec![
//!     "siteflow",
//!     "feed",
//!     "sitemap",
//!     "--data-dir",
//!     "content",
//! ]);
//!
//! let feed = matches.subcommand_matches("feed").unwrap();
//! assert_eq!(feed.get_one::<String>("name").unwrap(), "sitemap");
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::builder::PossibleValuesParser;
use clap::{value_parser, Arg, ArgMatches, Command};
use log::{debug, info};

use crate::content::SiteContext;
use crate::core::config::{Config, ConfigBuilder, CONFIG_FILE_NAME};
use crate::core::error::{Result, SiteflowError};
use crate::generators::{self, FEED_NAMES};
use crate::process::validate_content;
use crate::schema::tables::manifest;

/// The current version of Siteflow, as defined in `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Line printed when every content file passes.
pub const SUCCESS_MESSAGE: &str = "All content files are valid.";

fn data_dir_arg() -> Arg {
    Arg::new("data-dir")
        .short('d')
        .long("data-dir")
        .help("Directory holding the JSON content files [default: data]")
        .value_parser(value_parser!(PathBuf))
}

/// Builds the Siteflow command tree.
pub fn build() -> Command {
    debug!("Building CLI command structure");

    Command::new("siteflow")
        .about("Validates site content and generates its machine-readable feeds.")
        .version(VERSION)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Configuration file [default: siteflow.toml when present]")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .subcommand(
            Command::new("validate")
                .about("Validate every content file against its schema")
                .arg(data_dir_arg()),
        )
        .subcommand(
            Command::new("build")
                .about("Validate, then write robots.txt, sitemap.xml and search-index.json")
                .arg(data_dir_arg())
                .arg(
                    Arg::new("output-dir")
                        .short('o')
                        .long("output-dir")
                        .help("Output directory [default: public]")
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("feed")
                .about("Print one feed to stdout")
                .arg(
                    Arg::new("name")
                        .help("Feed to render")
                        .required(true)
                        .value_parser(PossibleValuesParser::new(
                            FEED_NAMES.iter().copied(),
                        )),
                )
                .arg(data_dir_arg()),
        )
}

/// Parses the process arguments and runs the selected command.
pub fn execute() -> Result<ExitCode> {
    run(&build().get_matches())
}

/// Runs the command described by already-parsed `matches`.
pub fn run(matches: &ArgMatches) -> Result<ExitCode> {
    match matches.subcommand() {
        Some(("validate", sub)) => validate(&resolve_config(matches, sub)?),
        Some(("build", sub)) => build_site(&resolve_config(matches, sub)?),
        Some(("feed", sub)) => {
            let name = sub.get_one::<String>("name").ok_or_else(|| {
                SiteflowError::internal_error("Missing feed name")
            })?;
            print_feed(&resolve_config(matches, sub)?, name)
        }
        Some((other, _)) => Err(SiteflowError::internal_error(format!(
            "Unknown command: {}",
            other
        ))),
        None => validate(&resolve_config(matches, matches)?),
    }
}

/// Layers the configuration file and the subcommand's flags.
fn resolve_config(root: &ArgMatches, sub: &ArgMatches) -> Result<Config> {
    let mut builder = ConfigBuilder::new();

    let explicit = sub
        .get_one::<PathBuf>("config")
        .or_else(|| root.get_one::<PathBuf>("config"));
    if let Some(path) = explicit {
        builder = builder.with_file(path);
    } else if Path::new(CONFIG_FILE_NAME).is_file() {
        builder = builder.with_file(CONFIG_FILE_NAME);
    }

    if let Some(dir) = optional_path(sub, "data-dir") {
        builder = builder.with_data_dir(dir);
    }
    if let Some(dir) = optional_path(sub, "output-dir") {
        builder = builder.with_output_dir(dir);
    }

    builder.build()
}

fn optional_path(matches: &ArgMatches, id: &str) -> Option<PathBuf> {
    matches.try_get_one::<PathBuf>(id).ok().flatten().cloned()
}

fn validate(config: &Config) -> Result<ExitCode> {
    Ok(if content_is_valid(config)? {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Runs the validator and prints its outcome.
fn content_is_valid(config: &Config) -> Result<bool> {
    info!("Validating content in {}", config.data_dir.display());
    let report =
        validate_content(&config.data_dir, &manifest(&config.people))?;

    if report.has_errors() {
        eprint!("{}", report.render(&config.data_dir));
        return Ok(false);
    }
    println!("{}", SUCCESS_MESSAGE);
    Ok(true)
}

fn load_context(config: &Config) -> Result<SiteContext> {
    if !config.data_dir.is_dir() {
        return Err(SiteflowError::config_error(
            "Data directory does not exist",
            Some(config.data_dir.clone()),
        ));
    }
    SiteContext::load(&config.data_dir, &config.people)
}

fn build_site(config: &Config) -> Result<ExitCode> {
    if !content_is_valid(config)? {
        return Ok(ExitCode::from(1));
    }

    let context = load_context(config)?;
    for feed in generators::generate_all(&context, &config.static_paths)? {
        let path = generators::write_feed(&config.output_dir, &feed)?;
        println!("Wrote {}", path.display());
    }
    info!("Build finished in {}", config.output_dir.display());
    Ok(ExitCode::SUCCESS)
}

fn print_feed(config: &Config, name: &str) -> Result<ExitCode> {
    let context = load_context(config)?;
    let feed =
        generators::by_name(name, &config.static_paths)?.generate(&context)?;
    debug!("Serving {} as {}", feed.route, feed.content_type);

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(feed.body.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|e| SiteflowError::output_error(PathBuf::from("<stdout>"), e))?;
    Ok(ExitCode::SUCCESS)
}
