// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::path::Path;
use tracing::info;

const RULE_WIDTH: usize = 80;

pub fn print_start_banner() {
    println!("{}", "*".repeat(RULE_WIDTH));
    println!(
        "{} v{} - centralised web accessibility checker",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    println!("{}", "*".repeat(RULE_WIDTH));
    info!("Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
}

pub fn print_target_count(count: usize) {
    let message = format!("Number of websites to be scanned: {}", count);
    println!("{}", message);
    println!("{}", "*".repeat(RULE_WIDTH));
    info!("{}", message);
}

pub fn print_completion_banner(results_path: &Path) {
    println!();
    println!("{}", "-".repeat(RULE_WIDTH));
    println!(
        "Scan complete! Data can be found in the {} folder.",
        results_path.display()
    );
    info!("Scan complete!");
}
