use super::fields::{format_cost, format_seconds, token_line, InputValue, TodoItem, TodoStatus};
use super::paint::{Hue, Painter};
use super::{line_marker, RenderOptions, StyleRenderer, ToolCall, ToolOutput};
use crate::truncate::{default_line_window, elide_value, omitted_lines_label, WindowLine};
use crate::types::{ResultEvent, SystemEvent, Usage};

/// Block framing shared by the multi-line styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `┌─` header, `│` gutter, `└─` footer.
    Boxed,
    /// Two-space indentation, blank line after each block.
    Indented,
}

impl Layout {
    fn opener(self) -> &'static str {
        match self {
            Layout::Boxed => "┌─ ",
            Layout::Indented => "",
        }
    }

    fn gutter(self) -> &'static str {
        match self {
            Layout::Boxed => "│ ",
            Layout::Indented => "  ",
        }
    }

    fn spacer(self) -> &'static str {
        match self {
            Layout::Boxed => "│",
            Layout::Indented => "",
        }
    }

    fn closer(self) -> &'static str {
        match self {
            Layout::Boxed => "└─",
            Layout::Indented => "",
        }
    }
}

/// Renders `default`, `minimal` and `plain` output.
pub struct DetailedStyle {
    layout: Layout,
    painter: Painter,
    options: RenderOptions,
    bracketed_glyphs: bool,
}

impl DetailedStyle {
    pub fn new(layout: Layout, painter: Painter, options: RenderOptions) -> Self {
        Self {
            layout,
            painter,
            options,
            bracketed_glyphs: false,
        }
    }

    /// Write todo glyphs as `[✓]` so they survive without color.
    pub fn with_bracketed_glyphs(mut self, bracketed: bool) -> Self {
        self.bracketed_glyphs = bracketed;
        self
    }

    fn prefix(&self, hue: Hue, depth: usize) -> String {
        let indent = "  ".repeat(depth);
        self.painter
            .paint(hue, format!("{}{indent}", self.layout.gutter()))
    }

    fn header(&self, out: &mut String, hue: Hue, label: &str, tag: Option<String>, line: usize) {
        out.push_str(&self.painter.bold(hue, self.layout.opener()));
        out.push_str(&self.painter.bold(hue, label));
        if let Some(tag) = tag {
            out.push_str(&self.painter.paint(hue, format!(" [{tag}]")));
        }
        out.push_str(&self.painter.paint(Hue::Gray, line_marker(line, self.options)));
        out.push('\n');
    }

    /// A line written entirely in the frame color.
    fn field(&self, out: &mut String, hue: Hue, depth: usize, text: &str) {
        out.push_str(&self.prefix(hue, depth));
        out.push_str(&self.painter.paint(hue, text));
        out.push('\n');
    }

    /// Content lines: frame-colored gutter, body-colored text.
    fn body(&self, out: &mut String, hue: Hue, depth: usize, text: &str) {
        for line in text.split('\n') {
            out.push_str(&self.prefix(hue, depth));
            out.push_str(&self.painter.paint(Hue::White, line));
            out.push('\n');
        }
    }

    fn spacer(&self, out: &mut String, hue: Hue) {
        out.push_str(&self.painter.paint(hue, self.layout.spacer()));
        out.push('\n');
    }

    fn close(&self, out: &mut String, hue: Hue) {
        out.push_str(&self.painter.paint(hue, self.layout.closer()));
        out.push('\n');
    }

    fn usage_footer(&self, out: &mut String, usage: &Usage) {
        self.field(out, Hue::Gray, 0, &token_line(usage, self.options.verbose));
    }

    fn glyph(&self, status: TodoStatus) -> String {
        if self.bracketed_glyphs {
            return format!("[{}]", status.glyph());
        }
        let hue = match status {
            TodoStatus::Completed => Hue::Green,
            TodoStatus::InProgress => Hue::Yellow,
            TodoStatus::Pending | TodoStatus::Other => Hue::Gray,
        };
        self.painter.paint(hue, status.glyph())
    }

    fn todos(&self, out: &mut String, items: &[TodoItem<'_>]) {
        for item in items {
            out.push_str(&self.prefix(Hue::Yellow, 2));
            out.push_str(&self.glyph(item.status));
            out.push_str(&self.painter.paint(Hue::Yellow, format!(" {}", item.content)));
            out.push('\n');
        }
    }

    fn input(&self, out: &mut String, key: &str, value: &InputValue<'_>) {
        out.push_str(&self.prefix(Hue::Yellow, 1));
        out.push_str(&self.painter.paint(Hue::Yellow, format!("{key}:")));
        let rendered = match value {
            InputValue::Todos(items) => {
                out.push('\n');
                self.todos(out, items);
                return;
            }
            InputValue::Text(text) => elide_value(text).to_string(),
            InputValue::List(count) => format!("[{count} items]"),
            InputValue::Object => "{...}".to_string(),
            InputValue::Scalar(text) => text.clone(),
        };

        let mut lines = rendered.split('\n');
        if let Some(first) = lines.next() {
            out.push_str(&self.painter.paint(Hue::White, format!(" {first}")));
        }
        out.push('\n');
        for line in lines {
            out.push_str(&self.prefix(Hue::Yellow, 2));
            out.push_str(&self.painter.paint(Hue::White, line));
            out.push('\n');
        }
    }
}

impl StyleRenderer for DetailedStyle {
    fn system(&self, out: &mut String, event: &SystemEvent, line: usize) {
        let hue = Hue::Cyan;
        self.header(out, hue, "SYSTEM", event.subtype.clone(), line);
        if let Some(cwd) = &event.cwd {
            self.field(out, hue, 0, &format!("Working Directory: {cwd}"));
        }
        if let Some(model) = &event.model {
            self.field(out, hue, 0, &format!("Model: {model}"));
        }
        if let Some(version) = &event.claude_code_version {
            self.field(out, hue, 0, &format!("Claude Code: v{version}"));
        }
        if !event.tools.is_empty() {
            self.field(out, hue, 0, &format!("Tools: {} available", event.tools.len()));
        }
        if self.options.verbose {
            if let Some(session) = &event.session_id {
                self.field(out, hue, 0, &format!("Session: {session}"));
            }
        }
        self.close(out, hue);
    }

    fn assistant_text(&self, out: &mut String, texts: &[&str], usage: Option<&Usage>, line: usize) {
        let hue = Hue::Green;
        self.header(out, hue, "ASSISTANT", None, line);
        for text in texts {
            self.body(out, hue, 0, text);
        }
        if let Some(usage) = usage {
            self.usage_footer(out, usage);
        }
        self.close(out, hue);
    }

    fn tool_use(&self, out: &mut String, call: &ToolCall<'_>, line: usize) {
        let hue = Hue::Yellow;
        self.header(out, hue, &format!("TOOL: {}", call.name), None, line);
        if self.options.verbose {
            self.field(out, hue, 0, &format!("ID: {}", call.id));
        }
        if !call.inputs.is_empty() {
            self.field(out, hue, 0, "Input:");
            for (key, value) in &call.inputs {
                self.input(out, key, value);
            }
        }
        self.close(out, hue);
    }

    fn tool_result(&self, out: &mut String, output: &ToolOutput<'_>, line: usize) {
        let (label, label_hue, frame) = if output.is_error {
            ("TOOL RESULT ERROR", Hue::Red, Hue::Red)
        } else {
            ("TOOL RESULT", Hue::Magenta, Hue::Gray)
        };
        self.header(out, label_hue, label, None, line);
        if self.options.verbose {
            self.field(out, frame, 0, &format!("Tool ID: {}", output.tool_use_id));
        }

        if output.text.is_empty() {
            self.field(out, Hue::Gray, 0, "(no output)");
        } else {
            for entry in default_line_window(&output.text) {
                match entry {
                    WindowLine::Line(text) => self.body(out, frame, 0, text),
                    WindowLine::Omitted(count) => {
                        self.field(out, Hue::Gray, 0, &omitted_lines_label(count))
                    }
                }
            }
        }
        self.close(out, frame);
    }

    fn result(&self, out: &mut String, event: &ResultEvent, body: Option<&str>, line: usize) {
        let (label, label_hue) = if event.is_error {
            ("RESULT: ERROR", Hue::Red)
        } else {
            ("RESULT: SUCCESS", Hue::Blue)
        };
        let hue = Hue::Blue;
        let tag = event.subtype.clone().filter(|_| self.options.verbose);
        self.header(out, label_hue, label, tag, line);

        if event.num_turns > 0 {
            self.field(out, hue, 0, &format!("Turns: {}", event.num_turns));
        }
        if event.duration_ms > 0 {
            let mut duration = format!("Duration: {}", format_seconds(event.duration_ms));
            if event.duration_api_ms > 0 {
                duration.push_str(&format!(" (API: {})", format_seconds(event.duration_api_ms)));
            }
            self.field(out, hue, 0, &duration);
        }
        if event.total_cost_usd > 0.0 {
            self.field(out, hue, 0, &format!("Cost: {}", format_cost(event.total_cost_usd)));
        }

        if let Some(usage) = &event.usage {
            self.spacer(out, hue);
            self.field(out, hue, 0, &token_line(usage, self.options.verbose));
        }

        if self.options.verbose && !event.model_usage.is_empty() {
            self.spacer(out, hue);
            self.field(out, hue, 0, "Model Usage:");
            for (model, usage) in &event.model_usage {
                self.field(out, hue, 1, &format!("{model}:"));
                if let Some(tokens) = usage.input_tokens {
                    self.field(out, hue, 2, &format!("Input: {tokens:.0} tokens"));
                }
                if let Some(tokens) = usage.output_tokens {
                    self.field(out, hue, 2, &format!("Output: {tokens:.0} tokens"));
                }
                if let Some(tokens) = usage.cache_read_input_tokens.filter(|n| *n > 0.0) {
                    self.field(out, hue, 2, &format!("Cache read: {tokens:.0} tokens"));
                }
                if let Some(tokens) = usage.cache_creation_input_tokens.filter(|n| *n > 0.0) {
                    self.field(out, hue, 2, &format!("Cache create: {tokens:.0} tokens"));
                }
                if let Some(cost) = usage.cost_usd {
                    self.field(out, hue, 2, &format!("Cost: {}", format_cost(cost)));
                }
            }
        }

        if !event.permission_denials.is_empty() {
            self.spacer(out, hue);
            self.field(
                out,
                Hue::Red,
                0,
                &format!("Permission Denials: {}", event.permission_denials.len()),
            );
            if self.options.verbose {
                for (index, denial) in event.permission_denials.iter().enumerate() {
                    self.field(out, Hue::Red, 1, &format!("[{}] {denial}", index + 1));
                }
            }
        }

        if let Some(body) = body {
            self.spacer(out, hue);
            self.body(out, hue, 0, body);
        }

        self.close(out, hue);
    }

    fn unknown(&self, out: &mut String, kind: &str, line: usize) {
        if self.layout != Layout::Boxed {
            return;
        }
        self.field(out, Hue::Gray, 0, &format!("[Line {line}] Unknown message type: {kind}"));
    }
}
