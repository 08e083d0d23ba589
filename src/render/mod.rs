mod compact;
mod detailed;
pub mod fields;
pub mod paint;

use crate::sanitize::strip_system_reminders;
use crate::types::{ContentBlock, Event, MessageEvent, ResultEvent, SystemEvent, Usage};
use clap::ValueEnum;
use fields::{classify_input, tool_result_text, InputValue};
use paint::Painter;
use serde_json::{Map, Value};

pub use compact::CompactStyle;
pub use detailed::{DetailedStyle, Layout};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Style {
    /// Boxed output with colored borders.
    #[default]
    Default,
    /// One line per event.
    Compact,
    /// Indented output without box-drawing characters.
    Minimal,
    /// Minimal layout, never colored.
    Plain,
}

impl Style {
    pub fn parse(value: &str) -> Option<Self> {
        Style::from_str(value.trim(), true).ok()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub verbose: bool,
    pub show_line_numbers: bool,
}

pub struct ToolCall<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub inputs: Vec<(&'a str, InputValue<'a>)>,
}

pub struct ToolOutput<'a> {
    pub tool_use_id: &'a str,
    pub is_error: bool,
    /// Coerced and, outside verbose mode, sanitized. Empty means no output.
    pub text: String,
}

/// Formatting primitives of one output style. The traversal in
/// [`EventRenderer::render`] decides what to show; a style decides how.
pub trait StyleRenderer {
    fn system(&self, out: &mut String, event: &SystemEvent, line: usize);
    fn assistant_text(&self, out: &mut String, texts: &[&str], usage: Option<&Usage>, line: usize);
    fn tool_use(&self, out: &mut String, call: &ToolCall<'_>, line: usize);
    fn tool_result(&self, out: &mut String, output: &ToolOutput<'_>, line: usize);
    /// `body` is `None` when the result text is empty or repeats the last
    /// assistant text.
    fn result(&self, out: &mut String, event: &ResultEvent, body: Option<&str>, line: usize);
    fn unknown(&self, _out: &mut String, _kind: &str, _line: usize) {}

    /// When true, assistant text and tool calls are rendered in content
    /// order: each text block alone, then the usage footer with no texts.
    fn interleaves_blocks(&self) -> bool {
        false
    }
}

pub struct EventRenderer {
    style: Style,
    options: RenderOptions,
    painter: Painter,
}

impl EventRenderer {
    pub fn new(style: Style, options: RenderOptions, color: bool) -> Self {
        let painter = match style {
            Style::Plain => Painter::disabled(),
            _ => Painter::new(color),
        };
        Self {
            style,
            options,
            painter,
        }
    }

    /// Render one event to styled text. `hide_result_body` drops the free-text
    /// body of a `result` event.
    pub fn render(&self, event: &Event, line: usize, hide_result_body: bool) -> String {
        let mut out = String::new();
        match self.style {
            Style::Compact => {
                let style = CompactStyle::new(self.painter, self.options);
                self.traverse(&style, &mut out, event, line, hide_result_body);
            }
            Style::Default => {
                let style = DetailedStyle::new(Layout::Boxed, self.painter, self.options);
                self.traverse(&style, &mut out, event, line, hide_result_body);
            }
            Style::Minimal | Style::Plain => {
                let style = DetailedStyle::new(Layout::Indented, self.painter, self.options)
                    .with_bracketed_glyphs(self.style == Style::Plain);
                self.traverse(&style, &mut out, event, line, hide_result_body);
            }
        }
        out
    }

    fn traverse(
        &self,
        style: &dyn StyleRenderer,
        out: &mut String,
        event: &Event,
        line: usize,
        hide_result_body: bool,
    ) {
        match event {
            Event::System(system) => style.system(out, system, line),
            Event::Assistant(message) => self.assistant(style, out, message, line),
            Event::User(message) => self.user(style, out, message, line),
            Event::Result(result) => {
                let body = Some(result.result.as_str())
                    .filter(|body| !body.is_empty() && !hide_result_body);
                style.result(out, result, body, line);
            }
            Event::Unknown { kind } => style.unknown(out, kind, line),
        }
    }

    fn assistant(
        &self,
        style: &dyn StyleRenderer,
        out: &mut String,
        message: &MessageEvent,
        line: usize,
    ) {
        let usage = message.usage().filter(|_| self.options.verbose);
        if style.interleaves_blocks() {
            let mut shown_text = false;
            for block in message.content() {
                match block {
                    ContentBlock::Text { text } if !text.is_empty() => {
                        style.assistant_text(out, &[text.as_str()], None, line);
                        shown_text = true;
                    }
                    ContentBlock::ToolUse { id, name, input } => {
                        style.tool_use(out, &tool_call(id, name, input), line);
                    }
                    _ => {}
                }
            }
            if let Some(usage) = usage.filter(|_| shown_text) {
                style.assistant_text(out, &[], Some(usage), line);
            }
            return;
        }

        let texts: Vec<&str> = message.texts().collect();
        if !texts.is_empty() {
            style.assistant_text(out, &texts, usage, line);
        }
        for block in message.content() {
            if let ContentBlock::ToolUse { id, name, input } = block {
                style.tool_use(out, &tool_call(id, name, input), line);
            }
        }
    }

    fn user(&self, style: &dyn StyleRenderer, out: &mut String, message: &MessageEvent, line: usize) {
        for block in message.content() {
            if let ContentBlock::ToolResult {
                tool_use_id,
                content,
                is_error,
            } = block
            {
                let raw = tool_result_text(content);
                let text = if self.options.verbose {
                    raw
                } else {
                    strip_system_reminders(&raw)
                };
                let output = ToolOutput {
                    tool_use_id,
                    is_error: *is_error,
                    text,
                };
                style.tool_result(out, &output, line);
            }
        }
    }
}

fn tool_call<'a>(id: &'a str, name: &'a str, input: &'a Map<String, Value>) -> ToolCall<'a> {
    ToolCall {
        id,
        name,
        inputs: input
            .iter()
            .map(|(key, value)| (key.as_str(), classify_input(name, key, value)))
            .collect(),
    }
}

pub fn line_marker(line: usize, options: RenderOptions) -> String {
    if options.show_line_numbers {
        format!(" (line {line})")
    } else {
        String::new()
    }
}

pub fn compact_line_marker(line: usize, options: RenderOptions) -> String {
    if options.show_line_numbers {
        format!(" L{line}")
    } else {
        String::new()
    }
}
