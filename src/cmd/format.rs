/*!
format.rs

Human-output helpers for `drivecmd` (boxed headers, tables, colors, icons).

  - StyleOptions::detect()  NO_COLOR / NO_EMOJI / COLUMNS (clamped 40..=220, default 100)
  - color(role, text, &style)
  - icon(tag, &style), category_icon(FileCategory, &style)
  - box_header(title, subtitle, &style)
  - table(headers, rows, &style)
  - wrap_paragraphs(text, width)   keeps blank lines and list markers
  - truncate_ellipsis(s, max_chars)

Functions return strings; printing is left to the command modules. JSON
output paths never go through here.
*/

use crate::listing::FileCategory;

/* ---- Style ---- */

#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub use_color: bool,
    pub use_emoji: bool,
    pub term_width: usize,
}

impl StyleOptions {
    pub fn detect() -> Self {
        let term_width = std::env::var("COLUMNS")
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .map(|w| w.clamp(40, 220))
            .unwrap_or(100);
        StyleOptions {
            use_color: std::env::var_os("NO_COLOR").is_none(),
            use_emoji: std::env::var_os("NO_EMOJI").is_none(),
            term_width,
        }
    }

    /// No color, no emoji, fixed width. Used by tests.
    pub fn plain(term_width: usize) -> Self {
        StyleOptions {
            use_color: false,
            use_emoji: false,
            term_width,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Role {
    Title,
    Muted,
    Accent,
    Success,
    Error,
    Dim,
}

pub fn color(role: Role, text: impl AsRef<str>, style: &StyleOptions) -> String {
    if !style.use_color {
        return text.as_ref().to_string();
    }
    let code = match role {
        Role::Title => "1;38;5;45",
        Role::Muted => "38;5;250",
        Role::Accent => "38;5;213",
        Role::Success => "38;5;82",
        Role::Error => "38;5;196",
        Role::Dim => "2",
    };
    format!("\x1b[{code}m{}\x1b[0m", text.as_ref())
}

pub fn icon(tag: &str, style: &StyleOptions) -> &'static str {
    if !style.use_emoji {
        return "";
    }
    match tag {
        "ok" => "✔",
        "error" => "✖",
        "info" => "ℹ",
        "drive" => "🗂",
        "summary" => "📝",
        "link" => "🔗",
        _ => "",
    }
}

pub fn category_icon(category: FileCategory, style: &StyleOptions) -> &'static str {
    if !style.use_emoji {
        return "";
    }
    match category {
        FileCategory::Folder => "📁",
        FileCategory::Document => "📄",
        FileCategory::Image => "🖼",
        FileCategory::Video => "🎞",
        FileCategory::Audio => "🎵",
        FileCategory::Archive => "📦",
        FileCategory::Other => "·",
    }
}

/* ---- Box Header ---- */

/// Single-line title (plus optional muted subtitle) inside a light box.
/// Content wider than the terminal is truncated, never wrapped.
pub fn box_header(title: &str, subtitle: Option<&str>, style: &StyleOptions) -> String {
    let plain = match subtitle {
        Some(s) => format!("{title}  {s}"),
        None => title.to_string(),
    };
    let max_inner = style.term_width.saturating_sub(4).max(10);
    let shown = truncate_ellipsis(&plain, max_inner);
    let inner = shown.chars().count();

    // Recolor after truncation so escape codes never get cut.
    let styled = match subtitle {
        Some(_) if shown == plain => format!(
            "{}  {}",
            color(Role::Title, title, style),
            color(Role::Muted, subtitle.unwrap_or_default(), style)
        ),
        _ => color(Role::Title, &shown, style),
    };

    let bar = "─".repeat(inner + 2);
    format!("┌{bar}┐\n│ {styled} │\n└{bar}┘")
}

/* ---- Table ---- */

/// Left-aligned columns separated by two spaces, header underlined with `-`.
/// When the table is wider than the terminal the widest column shrinks first.
pub fn table(headers: &[&str], rows: &[Vec<String>], style: &StyleOptions) -> String {
    if headers.is_empty() {
        return String::new();
    }
    let cols = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().take(cols).enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let gaps = (cols - 1) * 2;
    let mut total: usize = widths.iter().sum::<usize>() + gaps;
    while total > style.term_width {
        let (idx, w) = widths
            .iter()
            .copied()
            .enumerate()
            .max_by_key(|(_, w)| *w)
            .unwrap_or((0, 0));
        if w <= 4 {
            break;
        }
        widths[idx] -= 1;
        total -= 1;
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(color(
        Role::Accent,
        render_row(headers.iter().copied(), &widths),
        style,
    ));
    let sep: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    lines.push(color(Role::Dim, sep.join("  "), style));
    for row in rows {
        let cells = (0..cols).map(|i| row.get(i).map(String::as_str).unwrap_or(""));
        lines.push(render_row(cells, &widths));
    }
    lines.join("\n")
}

fn render_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(c, w)| pad(&truncate_ellipsis(c, *w), *w))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - len))
    }
}

/* ---- Text ---- */

/// Wrap prose to `width`, preserving blank lines and each line's leading
/// indentation / list marker on continuation lines.
pub fn wrap_paragraphs(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            out.push(String::new());
            continue;
        }
        let indent_len = line.len() - line.trim_start().len();
        let indent = &line[..indent_len];
        let hang = " ".repeat(indent.chars().count() + marker_width(line.trim_start()));

        let mut current = indent.to_string();
        let mut has_word = false;
        for word in line.split_whitespace() {
            let extra = if has_word { 1 } else { 0 };
            if has_word && current.chars().count() + extra + word.chars().count() > width {
                out.push(current);
                current = hang.clone();
                has_word = false;
            }
            if has_word {
                current.push(' ');
            }
            current.push_str(word);
            has_word = true;
        }
        out.push(current);
    }
    out
}

/// Width of a leading `- `, `* ` or `12. ` marker, 0 if none.
fn marker_width(s: &str) -> usize {
    if s.starts_with("- ") || s.starts_with("* ") || s.starts_with("• ") {
        return 2;
    }
    let digits = s.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 && s[digits..].starts_with(". ") {
        return digits + 2;
    }
    0
}

pub fn truncate_ellipsis(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}
