//! Output formatting
//!
//! - `config` - Output configuration types
//! - `console` - Colored console rendering of reports and repository lists
//! - `json` - JSON output

mod config;
mod console;
mod json;

use std::io;

use serde::Serialize;
use termcolor::StandardStream;

use crate::github::{LanguageShare, Repository, User};
use crate::scan::ScanReport;

pub use config::OutputConfig;
pub use console::{first_line, write_languages, write_report, write_repositories, write_title};
pub use json::{print_json, to_json};

/// JSON shape of the repository list view.
#[derive(Debug, Serialize)]
pub struct RepositoriesView<'a> {
    pub title: String,
    pub user: &'a User,
    pub repositories: &'a [Repository],
}

/// JSON shape of the search view.
#[derive(Debug, Serialize)]
pub struct SearchView<'a> {
    pub title: String,
    pub languages: &'a [LanguageShare],
    pub report: &'a ScanReport,
}

/// Print a scan report to stdout.
pub fn print_report(report: &ScanReport, config: &OutputConfig) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(config.color_choice());
    write_report(&mut stdout, report, config)
}

/// Print the repository list view to stdout.
pub fn print_repositories(
    title: &str,
    user: &User,
    repositories: &[Repository],
    config: &OutputConfig,
) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(config.color_choice());
    write_title(&mut stdout, title)?;
    write_repositories(&mut stdout, Some(user), repositories)
}

/// Print the search view to stdout: title, languages, then the report.
pub fn print_search(
    title: &str,
    languages: &[LanguageShare],
    report: &ScanReport,
    config: &OutputConfig,
) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(config.color_choice());
    write_title(&mut stdout, title)?;
    write_languages(&mut stdout, languages)?;
    write_report(&mut stdout, report, config)
}
