//! Head/tail windows for long tool output and long string values.

pub const HEAD_LINES: usize = 20;
pub const TAIL_LINES: usize = 20;

pub const ELIDE_HEAD_CHARS: usize = 200;
pub const ELIDE_TAIL_CHARS: usize = 100;

pub const PREVIEW_CHARS: usize = 100;
pub const INPUT_PREVIEW_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowLine<'a> {
    Line(&'a str),
    Omitted(usize),
}

/// Split on `\n` and keep the first `head` and last `tail` lines, replacing
/// the middle with a single omitted-count marker.
pub fn line_window(content: &str, head: usize, tail: usize) -> Vec<WindowLine<'_>> {
    let lines: Vec<&str> = content.split('\n').collect();
    if lines.len() <= head + tail {
        return lines.into_iter().map(WindowLine::Line).collect();
    }

    let omitted = lines.len() - head - tail;
    let mut out = Vec::with_capacity(head + tail + 1);
    out.extend(lines[..head].iter().copied().map(WindowLine::Line));
    out.push(WindowLine::Omitted(omitted));
    out.extend(lines[lines.len() - tail..].iter().copied().map(WindowLine::Line));
    out
}

pub fn default_line_window(content: &str) -> Vec<WindowLine<'_>> {
    line_window(content, HEAD_LINES, TAIL_LINES)
}

pub fn omitted_lines_label(count: usize) -> String {
    if count == 1 {
        "... (1 more line) ...".to_string()
    } else {
        format!("... ({count} more lines) ...")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elided<'a> {
    Full(&'a str),
    Split {
        head: &'a str,
        omitted: usize,
        tail: &'a str,
    },
}

impl std::fmt::Display for Elided<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Elided::Full(text) => f.write_str(text),
            Elided::Split {
                head,
                omitted: 1,
                tail,
            } => write!(f, "{head} ... (1 char omitted) ... {tail}"),
            Elided::Split {
                head,
                omitted,
                tail,
            } => write!(f, "{head} ... ({omitted} chars omitted) ... {tail}"),
        }
    }
}

/// Keep the first `head` and last `tail` characters of a string longer than
/// `head + tail` characters. Counts chars, not bytes.
pub fn elide_middle(text: &str, head: usize, tail: usize) -> Elided<'_> {
    let total = text.chars().count();
    if total <= head + tail {
        return Elided::Full(text);
    }

    let head_end = byte_offset(text, head);
    let tail_start = byte_offset(text, total - tail);
    Elided::Split {
        head: &text[..head_end],
        omitted: total - head - tail,
        tail: &text[tail_start..],
    }
}

pub fn elide_value(text: &str) -> Elided<'_> {
    elide_middle(text, ELIDE_HEAD_CHARS, ELIDE_TAIL_CHARS)
}

/// First `max_chars` characters followed by `...`, or the text unchanged when
/// it already fits.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    format!("{}...", &text[..byte_offset(text, max_chars)])
}

/// Collapse a multi-line string onto one line.
pub fn single_line(text: &str) -> String {
    text.replace('\n', " ")
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}
