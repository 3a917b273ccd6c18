//! Plain-text rendering of views

use chrono::{DateTime, Utc};
use colored::Colorize;
use guardpost_core::{Identifiable, Published, Timestamped, Titled};
use guardpost_model::{FieldErrors, Record};
use guardpost_views::{
    Dashboard, FieldSpec, FormSchema, FormState, ListView, Notification, SettingsView, StatusLevel,
};

const TITLE_WIDTH: usize = 40;

fn date(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One-line notification with a level marker
pub fn notification(n: &Notification) -> String {
    match n.level {
        StatusLevel::Info => format!("{} {}", "ℹ".blue(), n.text),
        StatusLevel::Success => format!("{} {}", "✓".green(), n.text),
        StatusLevel::Warning => format!("{} {}", "⚠".yellow(), n.text),
        StatusLevel::Error => format!("{} {}", "✗".red(), n.text),
    }
}

/// The current page of a list view as a table plus its summary line
pub fn list<R: Record>(view: &ListView<R>) -> String {
    let page = view.page();
    let mut out = format!("{}\n", R::KEY.display_name().bold());

    if page.is_empty() {
        out.push_str(&format!("{}\n", page.empty_message().dimmed()));
        out.push_str(&format!("{}\n", view.summary()));
        return out;
    }

    let extra: Vec<&str> = R::FILTER_FIELDS
        .iter()
        .copied()
        .filter(|f| *f != "status")
        .collect();

    let mut header = vec!["ID".to_string(), "Title".to_string(), "Status".to_string()];
    header.extend(extra.iter().map(|f| capitalize(f)));
    header.push("Created".to_string());

    let rows: Vec<Vec<String>> = page
        .rows
        .iter()
        .map(|r| {
            let mut row = vec![
                r.id().to_string(),
                truncate(r.title(), TITLE_WIDTH),
                r.status().to_string(),
            ];
            row.extend(extra.iter().map(|f| r.filter_value(f).unwrap_or_default()));
            row.push(date(r.created_at()));
            row
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|i| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(header[i].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| pad(c, *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    out.push_str(&format!("{}\n", line(&header).bold()));
    for (row, record) in rows.iter().zip(&page.rows) {
        let text = line(row);
        if record.is_active() {
            out.push_str(&format!("{}\n", text));
        } else {
            out.push_str(&format!("{}\n", text.dimmed()));
        }
    }

    let window = page.window;
    out.push_str(&format!(
        "{}  (page {} of {})\n",
        view.summary(),
        window.page,
        window.total_pages
    ));
    out
}

fn field_lines<'a>(fields: impl Iterator<Item = (&'a FieldSpec, &'a str)>) -> Vec<(String, String)> {
    fields
        .map(|(spec, value)| (spec.label.to_string(), value.to_string()))
        .collect()
}

fn aligned(lines: &[(String, String)]) -> String {
    let width = lines.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    lines
        .iter()
        .map(|(label, value)| {
            let value = if value.is_empty() {
                "-".dimmed().to_string()
            } else {
                value.clone()
            };
            format!("{}  {}\n", pad(label, width).bold(), value)
        })
        .collect()
}

/// Every form field of one record
pub fn record<F>(record: &F::Target) -> String
where
    F: FormSchema,
    F::Target: Record,
{
    let state = FormState::<F>::loaded(record);
    let mut lines = vec![("ID".to_string(), record.id().to_string())];
    lines.extend(field_lines(state.draft().iter()));
    lines.push(("Created".to_string(), record.created_at().to_rfc3339()));
    lines.push((
        "Updated".to_string(),
        record
            .updated_at()
            .map(|u| u.to_rfc3339())
            .unwrap_or_default(),
    ));
    aligned(&lines)
}

/// The settings form's current values
pub fn settings(view: &SettingsView) -> String {
    let mut lines: Vec<(String, String)> = view
        .fields()
        .iter()
        .map(|spec| (spec.label.to_string(), view.value(spec.name).to_string()))
        .collect();
    lines.push((
        "Updated".to_string(),
        view.current()
            .updated_at
            .map(|u| u.to_rfc3339())
            .unwrap_or_default(),
    ));
    aligned(&lines)
}

/// Field errors, one per line
pub fn field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("  {} {}: {}\n", "✗".red(), field.bold(), message))
        .collect()
}

/// Per-collection counts
pub fn dashboard(dashboard: &Dashboard) -> String {
    let mut out = format!("{}\n", guardpost_views::NAME.bold());
    let width = dashboard
        .collections
        .iter()
        .map(|c| c.key.display_name().len())
        .max()
        .unwrap_or(0);

    for summary in &dashboard.collections {
        out.push_str(&format!(
            "  {}  {:>4} total  {:>4} active  {:>4} inactive\n",
            pad(summary.key.display_name(), width),
            summary.total,
            summary.active.to_string().green(),
            summary.inactive(),
        ));
    }
    out.push_str(&format!("  Live banners: {}\n", dashboard.live_banners));
    let configured = if dashboard.settings_configured {
        "configured".green()
    } else {
        "not configured".yellow()
    };
    out.push_str(&format!("  Support settings: {}\n", configured));
    out
}
