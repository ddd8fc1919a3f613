// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Command implementations

pub mod communities;
pub mod completions;
pub mod config;
pub mod inspect;
pub mod metrics;
pub mod report;

use crate::dataset::Dataset;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// How command results are written to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    /// Emit JSON instead of text
    pub json: bool,
    /// Color headings
    pub color: bool,
}

impl Output {
    /// Print a section heading
    pub fn heading(&self, text: &str) {
        if self.color {
            println!("{}", text.bold().cyan());
        } else {
            println!("{text}");
        }
    }

    /// Print a `label: value` line
    pub fn field(&self, label: &str, value: impl std::fmt::Display) {
        if self.color {
            println!("  {:<24} {}", label.dimmed(), value);
        } else {
            println!("  {label:<24} {value}");
        }
    }

    /// Print a value as pretty JSON
    pub fn json<T: Serialize>(&self, value: &T) -> Result<()> {
        let content = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
        println!("{content}");
        Ok(())
    }
}

/// Load the dataset a command works on
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    info!("Loading dataset from {}", path.display());
    Dataset::load(path)
}

/// Render a yes/no flag for text output
pub(crate) fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
