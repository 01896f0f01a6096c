// Copyright © 2024 Siteflow. All rights reserved.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Siteflow CLI
//!
//! Entry point for the `siteflow` binary. Initialises the logger and hands
//! control to [`siteflow::cli`].

use std::process::ExitCode;

use anyhow::Context;
use log::info;

fn run() -> anyhow::Result<ExitCode> {
    info!("Starting Siteflow v{}", siteflow::cli::VERSION);
    siteflow::cli::execute().context("Siteflow run failed")
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(1)
        }
    }
}
