// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Config command

use super::Output;
use crate::config::{default_path, Config};
use anyhow::Result;

/// Print the effective configuration
pub fn run(config: &Config, output: Output) -> Result<()> {
    if output.json {
        return output.print_json(config);
    }
    if let Some(path) = default_path() {
        println!("# default file: {}", path.display());
    }
    print!("{}", config.to_toml()?);
    Ok(())
}
