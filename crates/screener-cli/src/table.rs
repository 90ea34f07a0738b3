//! Plain-text result table.
//!
//! Widths are measured in terminal columns so that full-width names line up.

use screener_core::{Record, ScreenView, SortState};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Names wider than this are truncated with an ellipsis.
pub const MAX_NAME_WIDTH: usize = 24;

const EMPTY_MESSAGE: &str = "No records match the current conditions";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

const COLUMNS: [(&str, Align); 7] = [
    ("Code", Align::Left),
    ("Name", Align::Left),
    ("Price", Align::Right),
    ("Detected", Align::Left),
    ("Cup depth (%)", Align::Right),
    ("Handle days", Align::Right),
    ("Volume ratio", Align::Right),
];

fn cells(record: &Record) -> [String; 7] {
    [
        record.code.clone(),
        truncate_to_width(&record.name, MAX_NAME_WIDTH),
        format!("{:.1}", record.price),
        record.detection_date.clone(),
        format!("{:.1}", record.cup_depth),
        format!("{}", record.handle_days),
        format!("{:.2}x", record.volume_ratio),
    ]
}

/// Renders the view as a table followed by a summary line.
pub fn render(view: &ScreenView<'_>, sort: SortState) -> String {
    let summary = format!(
        "{} of {} records ({})",
        view.len(),
        view.total(),
        sort_label(sort)
    );

    if view.is_empty() {
        return format!("{EMPTY_MESSAGE}\n{summary}\n");
    }

    let rows: Vec<[String; 7]> = view.iter().map(cells).collect();
    let mut widths = COLUMNS.map(|(title, _)| title.width());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let mut out = String::new();
    push_line(&mut out, COLUMNS.map(|(title, _)| title.to_string()).iter(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, rule.iter(), &widths);
    for row in &rows {
        push_line(&mut out, row.iter(), &widths);
    }
    out.push_str(&summary);
    out.push('\n');
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a String>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .zip(COLUMNS)
        .map(|((cell, width), (_, align))| pad(cell, *width, align))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

fn pad(cell: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(cell.width()));
    match align {
        Align::Left => format!("{cell}{fill}"),
        Align::Right => format!("{fill}{cell}"),
    }
}

fn sort_label(sort: SortState) -> String {
    match sort {
        SortState::Unsorted => "unsorted".to_string(),
        SortState::Sorted { field, dir } => format!("sorted by {field} {dir}"),
    }
}

/// Truncates a string to a display width, ending with `…` when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use screener_core::{derive_view, Field, ScreenParams};

    fn rec(code: &str, name: &str, depth: f64) -> Record {
        Record {
            code: code.to_string(),
            name: name.to_string(),
            price: 2850.5,
            detection_date: "2024-01-15".to_string(),
            cup_depth: depth,
            handle_days: 8.0,
            volume_ratio: 1.75,
        }
    }

    #[test]
    fn renders_formatted_metrics() {
        let source = vec![rec("7203", "Toyota", 22.44)];
        let view = derive_view(&source, &ScreenParams::new());
        let out = render(&view, SortState::Unsorted);

        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("Code"));
        assert!(lines[1].starts_with("----"));
        assert!(lines[2].contains("22.4"));
        assert!(lines[2].contains("1.75x"));
        assert!(lines[2].contains("2850.5"));
        assert_eq!(lines[3], "1 of 1 records (unsorted)");
    }

    #[test]
    fn empty_view_message() {
        let source = vec![rec("7203", "Toyota", 22.4)];
        let view = derive_view(&source, &ScreenParams::new().query("zzz"));
        let out = render(&view, SortState::asc(Field::Price));

        assert_eq!(
            out,
            "No records match the current conditions\n0 of 1 records (sorted by price asc)\n"
        );
    }

    #[test]
    fn wide_names_align() {
        let source = vec![rec("1", "トヨタ", 1.0), rec("2", "abc", 2.0)];
        let view = derive_view(&source, &ScreenParams::new());
        let out = render(&view, SortState::Unsorted);

        let lines: Vec<&str> = out.lines().collect();
        let col = |line: &str| {
            let idx = line.find("2850.5").unwrap();
            line[..idx].width()
        };
        assert_eq!(col(lines[2]), col(lines[3]));
    }

    #[test]
    fn truncation() {
        assert_eq!(truncate_to_width("Hello", 10), "Hello");
        assert_eq!(truncate_to_width("Hello World", 6), "Hello…");
        assert_eq!(truncate_to_width("トヨタ自動車", 5), "トヨ…");
    }
}
