/*!
format.rs

Human-output primitives for the non-JSON paths (`registry` listing, dry-run
display). Returns formatted strings only; callers decide where to print.

Style decisions are centralized in `StyleOptions::detect()`:
  - color ON unless NO_COLOR is set
  - emoji ON unless NO_EMOJI is set
  - width from COLUMNS (clamped 40..=220), default 100

JSON output paths must not use these helpers, to keep machine output clean.
*/

use std::borrow::Cow;

#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub use_color: bool,
    pub use_emoji: bool,
    pub term_width: usize,
    pub padding: usize,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self::detect()
    }
}

impl StyleOptions {
    pub fn detect() -> Self {
        let width = std::env::var("COLUMNS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .map(|w| w.clamp(40, 220))
            .unwrap_or(100);

        StyleOptions {
            use_color: std::env::var_os("NO_COLOR").is_none(),
            use_emoji: std::env::var_os("NO_EMOJI").is_none(),
            term_width: width,
            padding: 1,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Role {
    Primary,
    Secondary,
    Accent,
    Success,
    Warning,
    Error,
    Dim,
}

pub fn color(role: Role, text: impl AsRef<str>, style: &StyleOptions) -> String {
    if !style.use_color {
        return text.as_ref().to_string();
    }
    let code = match role {
        Role::Primary => "38;5;45",
        Role::Secondary => "38;5;250",
        Role::Accent => "38;5;213",
        Role::Success => "38;5;82",
        Role::Warning => "38;5;214",
        Role::Error => "38;5;196",
        Role::Dim => "2",
    };
    format!("\x1b[{code}m{}\x1b[0m", text.as_ref())
}

pub fn emoji(tag: &str, style: &StyleOptions) -> &'static str {
    if !style.use_emoji {
        return "";
    }
    match tag {
        "success" => "✔",
        "error" => "✖",
        "warn" => "⚠",
        "info" => "ℹ",
        "prove" => "🔍",
        "rocket" => "🚀",
        _ => "",
    }
}

/// Single-line boxed header: `┌─...─┐ / │ title  subtitle │ / └─...─┘`.
pub fn box_header(
    title: impl AsRef<str>,
    subtitle: Option<impl AsRef<str>>,
    style: &StyleOptions,
) -> String {
    let title_styled = color(Role::Primary, title.as_ref(), style);
    let inner = match subtitle {
        Some(sub) => format!(
            "{title_styled}  {}",
            color(Role::Secondary, sub.as_ref(), style)
        ),
        None => title_styled,
    };

    let pad = style.padding;
    let inner_len = display_width(&inner);
    let total = (inner_len + pad * 2 + 2).min(style.term_width.max(20));
    let hline = "─".repeat(total - 2);
    let space = " ".repeat(pad);

    format!("┌{hline}┐\n│{space}{inner}{space}│\n└{hline}┘")
}

#[derive(Debug, Clone)]
pub struct TableOpts {
    pub max_width: usize,
    pub truncate: bool,
    pub header_sep: bool,
    pub min_col_width: usize,
}

impl Default for TableOpts {
    fn default() -> Self {
        Self {
            max_width: 0, // 0 -> style.term_width
            truncate: true,
            header_sep: true,
            min_col_width: 2,
        }
    }
}

/// Render a simple left-aligned table with two-space column gaps.
/// Columns are sized to content, then greedily shrunk from the widest side
/// when the total exceeds the width limit.
pub fn table(
    headers: &[&str],
    rows: &[Vec<String>],
    opts: TableOpts,
    style: &StyleOptions,
) -> String {
    if headers.is_empty() {
        return String::new();
    }
    let col_count = headers.len();
    let width_limit = if opts.max_width == 0 {
        style.term_width
    } else {
        opts.max_width.min(style.term_width)
    };

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(col_count) {
            widths[i] = widths[i].max(display_width(cell));
        }
    }

    let total_raw: usize = widths.iter().sum::<usize>() + (col_count - 1) * 2;
    if total_raw > width_limit {
        let mut overflow = total_raw - width_limit;
        let mut ordered: Vec<(usize, usize)> = widths.iter().copied().enumerate().collect();
        ordered.sort_by(|a, b| b.1.cmp(&a.1));
        for (idx, _) in ordered {
            if overflow == 0 {
                break;
            }
            if widths[idx] > opts.min_col_width {
                let shrink = (widths[idx] - opts.min_col_width).min(overflow);
                widths[idx] -= shrink;
                overflow -= shrink;
            }
        }
    }

    let mut out = String::new();
    for (i, h) in headers.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        out.push_str(&color(
            Role::Accent,
            pad_or_truncate(h, widths[i], opts.truncate),
            style,
        ));
    }
    out.push('\n');

    if opts.header_sep {
        let sep = widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(&color(Role::Dim, sep, style));
        out.push('\n');
    }

    for (r_idx, row) in rows.iter().enumerate() {
        for c in 0..col_count {
            if c > 0 {
                out.push_str("  ");
            }
            let raw = row.get(c).map(|s| s.as_str()).unwrap_or("");
            out.push_str(&pad_or_truncate(raw, widths[c], opts.truncate));
        }
        if r_idx + 1 < rows.len() {
            out.push('\n');
        }
    }

    out
}

fn pad_or_truncate(s: &str, width: usize, truncate: bool) -> String {
    let len = display_width(s);
    if len == width {
        return s.to_string();
    }
    if len < width {
        return format!("{s}{}", " ".repeat(width - len));
    }
    if !truncate {
        return s.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = s.chars().take(width - 1).collect();
    out.push('…');
    let final_len = display_width(&out);
    if final_len < width {
        out.push_str(&" ".repeat(width - final_len));
    }
    out
}

/// Minimal ANSI CSI stripper (scans ESC '[' ... final byte, no regex).
fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !s.contains('\x1b') {
        return Cow::Borrowed(s);
    }
    let mut buf = String::with_capacity(s.len());
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == 0x1B && i + 1 < bytes.len() && bytes[i + 1] == b'[' {
            i += 2;
            while i < bytes.len() && !bytes[i].is_ascii_alphabetic() {
                i += 1;
            }
            if i < bytes.len() {
                i += 1;
            }
            continue;
        }
        buf.push(bytes[i] as char);
        i += 1;
    }
    Cow::Owned(buf)
}

fn display_width(s: &str) -> usize {
    strip_ansi(s).chars().count()
}

/* --------------------------------- Tests ---------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> StyleOptions {
        StyleOptions {
            use_color: false,
            use_emoji: false,
            term_width: 100,
            padding: 1,
        }
    }

    #[test]
    fn box_header_contains_title() {
        let b = box_header("Templates (6)", Some("gnatprove"), &plain());
        assert!(b.contains("Templates (6)"));
        assert!(b.starts_with('┌'));
    }

    #[test]
    fn table_basic() {
        let t = table(
            &["NAME", "ARGS"],
            &[
                vec!["prove_all".into(), "-P%PP --mode=prove".into()],
                vec!["prove_line".into(), "--limit-line=%f:%l".into()],
            ],
            TableOpts::default(),
            &plain(),
        );
        assert!(t.contains("prove_all"));
        assert!(t.contains("--limit-line=%f:%l"));
    }

    #[test]
    fn truncation_appends_ellipsis() {
        let cell = pad_or_truncate("abcdefgh", 5, true);
        assert_eq!(display_width(&cell), 5);
        assert!(cell.contains('…'));
    }

    #[test]
    fn strip_ansi_removes_codes() {
        assert_eq!(strip_ansi("\x1b[31mRED\x1b[0m"), "RED");
    }
}
