use std::future::Future;
use std::io::{self, Write};

use colored::Colorize;
use comfy_table::{presets::NOTHING, ContentArrangement, Table};
use serde::Serialize;

/// Write a plain table: header row, dashed rule, one line per row.
/// Columns are as wide as their widest cell and are never truncated.
pub fn print_table<W, S>(out: &mut W, headers: &[&str], rows: &[Vec<S>]) -> io::Result<()>
where
    W: Write + ?Sized,
    S: AsRef<str>,
{
    if headers.is_empty() {
        return Ok(());
    }

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.as_ref().chars().count())
                .fold(h.chars().count(), usize::max)
        })
        .collect();

    let mut table = Table::new();
    table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(headers.iter().copied());

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    table.add_row(rule);

    for row in rows {
        table.add_row(
            (0..headers.len())
                .map(|i| row.get(i).map(|c| c.as_ref()).unwrap_or("").to_string()),
        );
    }

    for line in table.lines() {
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}

/// Compact single-line JSON, for `--json`.
pub fn print_json<W, T>(out: &mut W, value: &T) -> io::Result<()>
where
    W: Write + ?Sized,
    T: Serialize + ?Sized,
{
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)
}

/// Indented JSON, the human view of single objects.
pub fn print_pretty<W, T>(out: &mut W, value: &T) -> io::Result<()>
where
    W: Write + ?Sized,
    T: Serialize + ?Sized,
{
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

/// Print a decorated section header.
pub fn print_header<W: Write + ?Sized>(out: &mut W, title: &str) -> io::Result<()> {
    let line = "─".repeat(36);
    writeln!(out)?;
    writeln!(out, "  {}", title.bold())?;
    writeln!(out, "  {}", line.dimmed())
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Create a styled spinner with a message. Draws on stderr and stays
/// hidden when stderr is not a terminal.
pub fn spinner(msg: &str) -> indicatif::ProgressBar {
    let pb = indicatif::ProgressBar::new_spinner();
    if let Ok(style) = indicatif::ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("  {spinner} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Await `fut` behind a spinner, unless output is JSON.
pub async fn with_spinner<F: Future>(json: bool, msg: &str, fut: F) -> F::Output {
    let sp = (!json).then(|| spinner(msg));
    let result = fut.await;
    if let Some(sp) = sp {
        sp.finish_and_clear();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(headers: &[&str], rows: &[Vec<&str>]) -> String {
        let mut buf = Vec::new();
        print_table(&mut buf, headers, rows).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_print_table_contains_headers_and_cells() {
        let out = render(&["ID", "Name"], &[vec!["1", "Alice"], vec!["2", "Bob"]]);
        for needle in ["ID", "Name", "1", "Alice", "2", "Bob"] {
            assert!(out.contains(needle), "missing {needle:?} in {out:?}");
        }
        assert_eq!(out.lines().count(), 4);
    }

    #[test]
    fn test_print_table_does_not_truncate_long_values() {
        let long = "x".repeat(400);
        let out = render(&["ID", "Title"], &[vec!["1", long.as_str()]]);
        assert!(out.contains(&long));
    }

    #[test]
    fn test_print_table_rule_spans_widest_cell() {
        let out = render(&["ID"], &[vec!["abcdef"]]);
        assert!(out.contains("------"));
    }

    #[test]
    fn test_print_table_short_rows_are_padded() {
        let out = render(&["ID", "Title", "Board"], &[vec!["1"]]);
        assert!(out.contains("Board"));
        assert_eq!(out.lines().count(), 3);
    }

    #[test]
    fn test_print_table_without_headers_writes_nothing() {
        assert!(render(&[], &[vec!["1"]]).is_empty());
    }

    #[test]
    fn test_print_json_is_single_line() {
        let mut buf = Vec::new();
        print_json(&mut buf, &serde_json::json!({ "a": "b", "c": "d" })).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1);
        let decoded: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded["a"], "b");
        assert_eq!(decoded["c"], "d");
    }
}
