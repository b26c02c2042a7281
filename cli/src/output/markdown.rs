//! Markdown-to-ANSI rendering
//!
//! Minimal line-oriented renderer for workflow output: headings, bold and
//! inline-code spans, fenced code blocks, list bullets, and horizontal
//! rules. Tables and anything else pass through untouched.

use super::terminal::{BOLD, CYAN, DIM, GRAY, RESET};

/// Render markdown text with ANSI styling.
pub fn render_ansi(text: &str) -> String {
    let mut out = Vec::new();
    let mut in_fence = false;

    for line in text.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            out.push(format!("{DIM}{line}{RESET}"));
            continue;
        }
        if in_fence {
            out.push(format!("{DIM}{line}{RESET}"));
            continue;
        }

        out.push(render_line(line));
    }

    out.join("\n")
}

fn render_line(line: &str) -> String {
    if let Some(rest) = line.strip_prefix("### ") {
        return format!("{BOLD}{}{RESET}", style_spans(rest));
    }
    if let Some(rest) = line.strip_prefix("## ") {
        return format!("{BOLD}{CYAN}{}{RESET}", style_spans(rest));
    }
    if let Some(rest) = line.strip_prefix("# ") {
        return format!("{BOLD}{CYAN}{}{RESET}", style_spans(rest));
    }

    if is_rule(line) {
        return format!("{GRAY}{}{RESET}", "─".repeat(40));
    }

    if let Some(rest) = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
    {
        return format!("  • {}", style_spans(rest));
    }

    style_spans(line)
}

/// A rule line is three or more of the same marker character and nothing else.
fn is_rule(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 3
        && (trimmed.chars().all(|c| c == '-')
            || trimmed.chars().all(|c| c == '*')
            || trimmed.chars().all(|c| c == '_'))
}

/// Style `**bold**` and `` `code` `` spans by toggling on their markers.
/// Unbalanced markers leave the remainder styled to end of line.
fn style_spans(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut bold = false;
    let mut code = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '*' if !code && chars.peek() == Some(&'*') => {
                chars.next();
                bold = !bold;
                out.push_str(if bold { BOLD } else { RESET });
            }
            '`' if !bold => {
                code = !code;
                out.push_str(if code { CYAN } else { RESET });
            }
            c => out.push(c),
        }
    }

    if bold || code {
        out.push_str(RESET);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_is_bold() {
        let rendered = render_ansi("# Title");
        assert!(rendered.contains(BOLD));
        assert!(rendered.contains("Title"));
        assert!(rendered.ends_with(RESET));
    }

    #[test]
    fn test_bold_span_toggles() {
        let rendered = render_ansi("some **bold** text");
        assert!(rendered.contains(BOLD));
        assert!(rendered.contains("bold"));
        assert!(!rendered.contains("**"));
    }

    #[test]
    fn test_inline_code_span() {
        let rendered = render_ansi("run `flowctl list` now");
        assert!(rendered.contains(CYAN));
        assert!(!rendered.contains('`'));
    }

    #[test]
    fn test_fence_is_dimmed_verbatim() {
        let rendered = render_ansi("```\nlet x = **not bold**;\n```");
        assert!(rendered.contains("**not bold**"));
        assert!(rendered.contains(DIM));
    }

    #[test]
    fn test_list_bullets_and_rules() {
        let rendered = render_ansi("- item\n---");
        assert!(rendered.contains("• item"));
        assert!(rendered.contains('─'));
    }

    #[test]
    fn test_table_passes_through() {
        let table = "| Col | Val |\n|-----|-----|\n| A   | 1   |";
        let rendered = render_ansi(table);
        assert!(rendered.contains("| Col | Val |"));
        assert!(rendered.contains("| A   | 1   |"));
    }

    #[test]
    fn test_unbalanced_marker_still_terminates_styling() {
        let rendered = render_ansi("broken **bold");
        assert!(rendered.ends_with(RESET));
    }
}
