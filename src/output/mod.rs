//
//  scribe-cli
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Renders API results either as tables for people or as pretty JSON for
//! scripts.
//!
//! ## Core Components
//!
//! - [`OutputFormat`]: `table` or `json`
//! - [`OutputWriter`]: main entry point for writing formatted output
//! - [`TableOutput`]: implemented by every record the CLI prints
//!
//! ## Example
//!
//! ```rust,ignore
//! use scribe_cli::output::{OutputWriter, OutputFormat};
//!
//! let writer = OutputWriter::new(OutputFormat::Json);
//! writer.write_list(&form_fills)?;
//! writer.write_success("Form fill submitted");
//! ```

mod table;

pub use table::*;

use std::str::FromStr;

use console::style;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("Unknown output format '{}'", other),
        }
    }
}

/// A record that knows how to lay itself out in a table.
///
/// `fields` drives the single-record view; `headers` and `row` drive lists.
pub trait TableOutput {
    fn headers() -> Vec<&'static str>;

    fn row(&self, color: bool) -> Vec<String>;

    /// Label/value pairs for the detail view. Defaults to the list columns.
    fn fields(&self, color: bool) -> Vec<(&'static str, String)> {
        Self::headers().into_iter().zip(self.row(color)).collect()
    }
}

/// Writes results and status messages in the selected format.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", self.render(value)?);
        Ok(())
    }

    pub fn write_list<T: Serialize + TableOutput>(&self, values: &[T]) -> anyhow::Result<()> {
        if values.is_empty() && !self.is_json() {
            self.write_info("Nothing to show");
            return Ok(());
        }
        println!("{}", self.render_list(values)?);
        Ok(())
    }

    /// Prints any JSON value; used for raw responses.
    pub fn write_value(&self, value: &serde_json::Value) -> anyhow::Result<()> {
        match value {
            serde_json::Value::String(text) if !self.is_json() => println!("{}", text),
            serde_json::Value::Null if !self.is_json() => {}
            _ => println!("{}", serde_json::to_string_pretty(value)?),
        }
        Ok(())
    }

    pub fn render<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<String> {
        Ok(match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(value)?,
            OutputFormat::Table => value
                .fields(self.color)
                .into_iter()
                .map(|(key, value)| format_field(key, &value, self.color))
                .collect::<Vec<_>>()
                .join("\n"),
        })
    }

    pub fn render_list<T: Serialize + TableOutput>(&self, values: &[T]) -> anyhow::Result<String> {
        Ok(match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(values)?,
            OutputFormat::Table => TableBuilder::new()
                .color(self.color)
                .headers(T::headers())
                .rows(values.iter().map(|v| v.row(self.color)))
                .build()
                .to_string(),
        })
    }

    pub fn write_error(&self, msg: &str) {
        if self.color {
            eprintln!("{} {}", style("error:").red().bold(), msg);
        } else {
            eprintln!("error: {}", msg);
        }
    }

    pub fn write_warning(&self, msg: &str) {
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }

    /// Informational messages go to stderr so `--json` output stays parseable.
    pub fn write_info(&self, msg: &str) {
        eprintln!("{}", msg);
    }

    pub fn write_success(&self, msg: &str) {
        if self.is_json() {
            return;
        }
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

fn format_field(key: &str, value: &str, color: bool) -> String {
    if color {
        format!("{}: {}", style(key).dim(), value)
    } else {
        format!("{}: {}", key, value)
    }
}
