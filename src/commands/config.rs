// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Config command - show effective configuration

use super::Output;
use crate::config::Config;
use anyhow::{bail, Result};
use std::collections::BTreeMap;

/// Print one configuration key, or the whole effective configuration
pub fn run(config: &Config, key: Option<&str>, out: Output) -> Result<()> {
    let Some(key) = key else {
        if out.json {
            return out.json(config);
        }
        print!("{}", config.to_toml()?);
        return Ok(());
    };

    let Some(value) = config.get(key) else {
        bail!("Unknown config key: {}. Valid: {}", key, Config::KEYS.join(", "));
    };

    if out.json {
        out.json(&BTreeMap::from([(key, value)]))
    } else {
        println!("{value}");
        Ok(())
    }
}
