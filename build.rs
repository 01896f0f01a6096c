// Copyright © 2024 Siteflow. All rights reserved.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build script that refuses toolchains older than the declared MSRV.

use std::process;

/// Minimum rustc version required to compile the crate.
const MIN_RUSTC_VERSION: &str = "1.74.0";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    match version_check::is_min_version(MIN_RUSTC_VERSION) {
        Some(true) => {}
        Some(false) => {
            eprintln!(
                "siteflow requires rustc {} or newer",
                MIN_RUSTC_VERSION
            );
            process::exit(1);
        }
        None => {
            println!(
                "cargo:warning=unable to determine rustc version, assuming >= {}",
                MIN_RUSTC_VERSION
            );
        }
    }
}
