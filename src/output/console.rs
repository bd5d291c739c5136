//! Console rendering with colors

use std::io::{self, Write};

use termcolor::{Color, ColorSpec, WriteColor};

use super::config::OutputConfig;
use crate::github::{LanguageShare, Repository, User};
use crate::query::SearchQuery;
use crate::scan::ScanReport;

const COMMENT_INDENT: &str = "    ";

/// Extract the first line from a string.
pub fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or(s)
}

fn count_of(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Write a view title in bold.
pub fn write_title(out: &mut impl WriteColor, title: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_bold(true))?;
    write!(out, "{}", title)?;
    out.reset()?;
    writeln!(out)
}

/// Write a repository's language breakdown as percentages of its bytes.
pub fn write_languages(out: &mut impl WriteColor, languages: &[LanguageShare]) -> io::Result<()> {
    let total: u64 = languages.iter().map(|l| l.bytes).sum();
    if total == 0 {
        return Ok(());
    }

    out.set_color(ColorSpec::new().set_fg(Some(Color::Black)).set_intense(true))?;
    write!(out, "Languages:")?;
    out.reset()?;

    let parts: Vec<String> = languages
        .iter()
        .map(|l| format!("{} {:.1}%", l.name, l.bytes as f64 * 100.0 / total as f64))
        .collect();
    writeln!(out, " {}", parts.join(", "))
}

/// Write one comment line, highlighting every occurrence of the query.
fn write_comment_line(
    out: &mut impl WriteColor,
    line: &str,
    query: &SearchQuery,
) -> io::Result<()> {
    let mut comment_color = ColorSpec::new();
    comment_color.set_fg(Some(Color::Green));
    let mut hit_color = ColorSpec::new();
    hit_color.set_fg(Some(Color::Yellow)).set_bold(true);

    write!(out, "{}", COMMENT_INDENT)?;
    let mut rest = line;
    while let Some((start, end)) = query.find(rest) {
        out.set_color(&comment_color)?;
        write!(out, "{}", &rest[..start])?;
        out.set_color(&hit_color)?;
        write!(out, "{}", &rest[start..end])?;
        rest = &rest[end..];
    }
    out.set_color(&comment_color)?;
    write!(out, "{}", rest)?;
    out.reset()?;
    writeln!(out)
}

/// Write every file of a scan report with its comments, then a summary line.
pub fn write_report(
    out: &mut impl WriteColor,
    report: &ScanReport,
    config: &OutputConfig,
) -> io::Result<()> {
    for file in &report.files {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
        write!(out, "{}", file.path)?;
        out.reset()?;
        writeln!(out)?;

        for comment in &file.comments {
            if config.full {
                for line in comment.lines() {
                    write_comment_line(out, line.trim_end(), &report.query)?;
                }
            } else {
                write_comment_line(out, first_line(comment).trim_end(), &report.query)?;
            }
        }
    }

    if !report.files.is_empty() {
        writeln!(out)?;
    }
    write_summary(out, report)
}

fn write_summary(out: &mut impl WriteColor, report: &ScanReport) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Black)).set_intense(true))?;
    let found = if report.query.is_empty() {
        count_of(report.comment_count(), "comment", "comments")
    } else {
        format!(
            "{} matching \"{}\"",
            count_of(report.comment_count(), "comment", "comments"),
            report.query.as_str()
        )
    };
    write!(
        out,
        "{} in {} ({} scanned, {} skipped)",
        found,
        count_of(report.files.len(), "file", "files"),
        report.files_scanned,
        report.files_skipped
    )?;
    out.reset()?;
    writeln!(out)
}

/// Write a user's header line followed by their repositories.
pub fn write_repositories(
    out: &mut impl WriteColor,
    user: Option<&User>,
    repositories: &[Repository],
) -> io::Result<()> {
    if let Some(user) = user {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        write!(out, "{}", user.login)?;
        out.reset()?;
        if let Some(name) = &user.name {
            write!(out, " ({})", name)?;
        }
        writeln!(
            out,
            " - {}",
            count_of(repositories.len(), "repository", "repositories")
        )?;
    }

    for repo in repositories {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
        write!(out, "{}", repo.name)?;
        out.reset()?;

        let mut details = Vec::new();
        if let Some(language) = &repo.language {
            details.push(language.clone());
        }
        details.push(format!("★ {}", repo.stargazers_count));
        if let Some(updated) = repo.updated_at {
            details.push(format!("updated {}", updated.format("%Y-%m-%d")));
        }
        if repo.fork {
            details.push("fork".to_string());
        }
        out.set_color(ColorSpec::new().set_fg(Some(Color::Black)).set_intense(true))?;
        write!(out, "  {}", details.join(" · "))?;
        out.reset()?;
        writeln!(out)?;

        if let Some(description) = repo.description.as_deref().filter(|d| !d.is_empty()) {
            writeln!(out, "{}{}", COMMENT_INDENT, description)?;
        }
    }
    Ok(())
}
