//! Check report types and formatting.

use std::collections::BTreeMap;
use std::fmt;

use owo_colors::OwoColorize;

use crate::gamemode::{ConfigError, ConfigKind};
use crate::utils::plural_s;

/// A single broken descriptor
#[derive(Debug, Clone)]
pub struct CheckFailure {
    /// Logical name of the file.
    pub name: String,
    /// 1-based line, when the error points at one.
    pub line: Option<usize>,
    /// Full diagnostic.
    pub message: String,
}

/// Broken descriptors grouped by kind
#[derive(Debug, Default)]
pub struct CheckReport {
    pub checked: usize,
    pub failures: BTreeMap<ConfigKind, Vec<CheckFailure>>,
}

impl CheckReport {
    pub fn new(checked: usize) -> Self {
        Self {
            checked,
            failures: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, kind: ConfigKind, name: String, error: &ConfigError) {
        self.failures.entry(kind).or_default().push(CheckFailure {
            name,
            line: error.line(),
            message: error.to_string(),
        });
    }

    /// Total broken file count.
    pub fn failure_count(&self) -> usize {
        self.failures.values().map(Vec::len).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Print every failure to stderr, grouped by kind.
    pub fn print(&mut self) {
        for (kind, failures) in &mut self.failures {
            failures.sort_by(|a, b| a.name.cmp(&b.name));

            eprintln!();
            eprintln!(
                "{} {}",
                kind.dir_name().red().bold(),
                format!("({} file{})", failures.len(), plural_s(failures.len())).dimmed()
            );
            for failure in failures.iter() {
                let location = match failure.line {
                    Some(line) => format!("{}:{line}", failure.name),
                    None => failure.name.clone(),
                };
                eprintln!("{}{}{}", "[".dimmed(), location.cyan(), "]".dimmed());
                eprintln!("{} {}", "→".red(), failure.message);
            }
        }
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let broken = self.failure_count();
        if broken == 0 {
            write!(f, "{}", "all configs valid".green())
        } else {
            write!(
                f,
                "{} {} {} {}",
                "found".dimmed(),
                broken.to_string().red().bold(),
                format!("broken config{}", plural_s(broken)).dimmed(),
                format!("of {}", self.checked).dimmed()
            )
        }
    }
}
