#![forbid(unsafe_code)]

//! Inline style markup.
//!
//! Leaf widgets may interpret `[fg:bg]` markers embedded in their text:
//! the marker switches the active style for subsequent characters until the
//! next marker. Each half is a color name, a `#rrggbb` hex triplet, `-` to
//! fall back to the widget's base style for that channel, or empty to leave
//! the channel unchanged; the background half may be omitted entirely
//! (`[red]`). `[-:-]` restores the base style. `[[` produces a literal
//! opening bracket, and any tag that fails to parse is rendered literally.

use trellis_core::style::{Color, Style};

/// A run of text with one resolved style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Style for this run.
    pub style: Style,
    /// The text of the run (never empty).
    pub text: String,
}

/// Split `input` into styled runs, starting from `base`.
#[must_use]
pub fn parse_spans(input: &str, base: Style) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut current = base;
    let mut run = String::new();
    let mut rest = input;

    while let Some(open) = rest.find('[') {
        run.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        // Escaped bracket.
        if let Some(tail) = after.strip_prefix('[') {
            run.push('[');
            rest = tail;
            continue;
        }

        let Some(close) = after.find(']') else {
            // Unterminated tag: everything left is literal.
            run.push_str(&rest[open..]);
            rest = "";
            break;
        };
        let body = &after[..close];
        match apply_tag(body, current, base) {
            Some(next) => {
                if !run.is_empty() {
                    spans.push(Span {
                        style: current,
                        text: std::mem::take(&mut run),
                    });
                }
                current = next;
            }
            None => {
                // Not a style tag: keep it as literal text.
                run.push('[');
                run.push_str(body);
                run.push(']');
            }
        }
        rest = &after[close + 1..];
    }
    run.push_str(rest);
    if !run.is_empty() {
        spans.push(Span {
            style: current,
            text: run,
        });
    }
    spans
}

/// `input` with all style tags removed (escapes unfolded).
#[must_use]
pub fn strip(input: &str) -> String {
    parse_spans(input, Style::new())
        .into_iter()
        .map(|span| span.text)
        .collect()
}

/// Interpret one tag body against the current and base styles. Returns
/// `None` if the body is not a valid style tag.
fn apply_tag(body: &str, current: Style, base: Style) -> Option<Style> {
    if body.is_empty() {
        return None;
    }
    let mut parts = body.split(':');
    let fg_spec = parts.next().unwrap_or("");
    let bg_spec = parts.next();
    if parts.next().is_some() {
        return None;
    }

    let mut next = current;
    if let Some(color) = channel(fg_spec, base.fg)? {
        next.fg = color;
    }
    if let Some(spec) = bg_spec
        && let Some(color) = channel(spec, base.bg)?
    {
        next.bg = color;
    }
    Some(next)
}

/// Resolve one channel spec: `Ok(None)`-style "leave unchanged" for empty,
/// the base color for `-`, otherwise a parsed color. Outer `None` means the
/// spec is invalid.
fn channel(spec: &str, base: Color) -> Option<Option<Color>> {
    if spec.is_empty() {
        return Some(None);
    }
    if spec == "-" {
        return Some(Some(base));
    }
    Color::parse(spec).map(Some)
}
