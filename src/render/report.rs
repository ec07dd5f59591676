//! Markdown report grouped by file.
//!
//! The report opens with the pull request header, a priority summary, and
//! the files with the most open threads, then lists items file by file.

use std::collections::BTreeMap;
use std::io::Write;

use crate::github::error::InboxError;
use crate::inbox::{Comment, DISPLAY_LIMIT, InboxItem, PrMeta, Priority, truncate_chars};

use super::io_error;

const HOT_FILE_COUNT: usize = 3;

/// Writes the Markdown report for an inbox.
///
/// # Errors
///
/// Returns [`InboxError::Io`] if writing to the output fails.
pub fn write_report<W: Write>(
    writer: &mut W,
    meta: &PrMeta,
    items: &[InboxItem],
) -> Result<(), InboxError> {
    write_header(writer, meta)?;
    write_summary(writer, items)?;

    for (file_path, file_items) in group_by_file(items) {
        writeln!(writer, "## {file_path}").map_err(|e| io_error(&e))?;
        writeln!(writer).map_err(|e| io_error(&e))?;
        for item in file_items {
            write_item(writer, item)?;
        }
        writeln!(writer).map_err(|e| io_error(&e))?;
    }

    Ok(())
}

/// Renders the Markdown report into a string.
///
/// # Errors
///
/// Returns [`InboxError::Io`] if the report is not valid UTF-8, which cannot
/// happen for reports built from Rust strings.
pub fn render_report(meta: &PrMeta, items: &[InboxItem]) -> Result<String, InboxError> {
    let mut buffer = Vec::new();
    write_report(&mut buffer, meta, items)?;
    String::from_utf8(buffer).map_err(|e| InboxError::Io {
        message: format!("report is not valid UTF-8: {e}"),
    })
}

fn write_header<W: Write>(writer: &mut W, meta: &PrMeta) -> Result<(), InboxError> {
    writeln!(writer, "# PR Inbox for {} #{}", meta.repo, meta.number).map_err(|e| io_error(&e))?;
    writeln!(writer).map_err(|e| io_error(&e))?;
    writeln!(writer, "[{}]({})", meta.title, meta.url).map_err(|e| io_error(&e))?;
    writeln!(writer).map_err(|e| io_error(&e))?;

    let goal = truncate_chars(meta.goal.trim(), DISPLAY_LIMIT);
    if !goal.is_empty() {
        for line in goal.lines() {
            if line.is_empty() {
                writeln!(writer, ">").map_err(|e| io_error(&e))?;
            } else {
                writeln!(writer, "> {line}").map_err(|e| io_error(&e))?;
            }
        }
        writeln!(writer).map_err(|e| io_error(&e))?;
    }
    Ok(())
}

fn write_summary<W: Write>(writer: &mut W, items: &[InboxItem]) -> Result<(), InboxError> {
    let count = |priority: Priority| items.iter().filter(|i| i.priority == priority).count();
    writeln!(
        writer,
        "Summary: P0 {} | P1 {} | P2 {}",
        count(Priority::P0),
        count(Priority::P1),
        count(Priority::P2)
    )
    .map_err(|e| io_error(&e))?;
    writeln!(writer).map_err(|e| io_error(&e))?;

    let hot_files = hot_files(items);
    if !hot_files.is_empty() {
        let rendered: Vec<String> = hot_files
            .iter()
            .map(|(file, count)| format!("{file} ({count})"))
            .collect();
        writeln!(writer, "Hot files: {}", rendered.join(", ")).map_err(|e| io_error(&e))?;
        writeln!(writer).map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Files with the most items, busiest first; ties keep first-appearance order.
fn hot_files(items: &[InboxItem]) -> Vec<(&str, usize)> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(file, _)| *file == item.file_path) {
            Some((_, count)) => *count += 1,
            None => counts.push((item.file_path.as_str(), 1)),
        }
    }
    counts.sort_by(|left, right| right.1.cmp(&left.1));
    counts.truncate(HOT_FILE_COUNT);
    counts
}

fn group_by_file(items: &[InboxItem]) -> BTreeMap<&str, Vec<&InboxItem>> {
    let mut grouped: BTreeMap<&str, Vec<&InboxItem>> = BTreeMap::new();
    for item in items {
        grouped.entry(item.file_path.as_str()).or_default().push(item);
    }
    for file_items in grouped.values_mut() {
        file_items.sort_by(|left, right| {
            left.priority
                .cmp(&right.priority)
                .then_with(|| left.line_number.cmp(&right.line_number))
        });
    }
    grouped
}

fn write_item<W: Write>(writer: &mut W, item: &InboxItem) -> Result<(), InboxError> {
    let location = if item.line_number == 0 {
        String::new()
    } else {
        format!("L{} ", item.line_number)
    };
    writeln!(
        writer,
        "- [{}] {location}by {} — {}",
        item.priority, item.author, item.summary
    )
    .map_err(|e| io_error(&e))?;
    writeln!(writer, "  - Latest: {}", item.latest).map_err(|e| io_error(&e))?;
    if let Some(created) = &item.root_created_at {
        writeln!(writer, "  - Created: {created}").map_err(|e| io_error(&e))?;
    }
    if let Some(updated) = &item.latest_created_at {
        writeln!(writer, "  - Updated: {updated}").map_err(|e| io_error(&e))?;
    }
    writeln!(writer, "  - Link: {}", item.url).map_err(|e| io_error(&e))?;

    if let Some(diff_hunk) = item.diff_hunk.as_deref().filter(|hunk| !hunk.is_empty()) {
        write_diff(writer, diff_hunk)?;
    }

    if !item.comments.is_empty() {
        writeln!(writer, "  - Comments ({}):", item.comments.len()).map_err(|e| io_error(&e))?;
        for comment in &item.comments {
            write_comment(writer, comment, &item.url)?;
        }
    }
    Ok(())
}

fn write_diff<W: Write>(writer: &mut W, diff_hunk: &str) -> Result<(), InboxError> {
    writeln!(writer, "  - Diff:").map_err(|e| io_error(&e))?;
    writeln!(writer).map_err(|e| io_error(&e))?;
    writeln!(writer, "    ```diff").map_err(|e| io_error(&e))?;
    let lines: Vec<&str> = diff_hunk.lines().collect();
    let kept = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(0, |last| last + 1);
    for line in lines.iter().take(kept) {
        writeln!(writer, "    {line}").map_err(|e| io_error(&e))?;
    }
    writeln!(writer, "    ```").map_err(|e| io_error(&e))?;
    Ok(())
}

fn write_comment<W: Write>(
    writer: &mut W,
    comment: &Comment,
    item_url: &str,
) -> Result<(), InboxError> {
    let body = truncate_chars(&comment.body, DISPLAY_LIMIT);
    if comment.created_at.is_empty() {
        writeln!(writer, "    - {}: {body}", comment.author).map_err(|e| io_error(&e))?;
    } else {
        writeln!(
            writer,
            "    - {} ({}): {body}",
            comment.author, comment.created_at
        )
        .map_err(|e| io_error(&e))?;
    }
    if !comment.url.is_empty() && comment.url != item_url {
        writeln!(writer, "      - {}", comment.url).map_err(|e| io_error(&e))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
