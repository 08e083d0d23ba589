use super::fields::{format_cost, format_seconds, format_usage, InputValue, TodoStatus};
use super::paint::{Hue, Painter};
use super::{compact_line_marker, RenderOptions, StyleRenderer, ToolCall, ToolOutput};
use crate::truncate::{single_line, truncate_with_ellipsis, INPUT_PREVIEW_CHARS, PREVIEW_CHARS};
use crate::types::{ResultEvent, SystemEvent, Usage};

/// Single-line-per-event output.
pub struct CompactStyle {
    painter: Painter,
    options: RenderOptions,
}

impl CompactStyle {
    pub fn new(painter: Painter, options: RenderOptions) -> Self {
        Self { painter, options }
    }

    fn tag(&self, out: &mut String, hue: Hue, label: &str, line: usize) {
        out.push_str(&self.painter.bold(hue, label));
        out.push_str(&self.painter.paint(Hue::Gray, compact_line_marker(line, self.options)));
    }

    fn preview(&self, text: &str) -> String {
        truncate_with_ellipsis(&single_line(text), PREVIEW_CHARS)
    }

    fn id(&self, out: &mut String, id: &str) {
        if self.options.verbose && !id.is_empty() {
            out.push_str(&self.painter.paint(Hue::Gray, format!(" #{id}")));
        }
    }

    fn input(&self, key: &str, value: &InputValue<'_>) -> String {
        match value {
            InputValue::Text(text) => {
                let text = truncate_with_ellipsis(&single_line(text), INPUT_PREVIEW_CHARS);
                format!("{key}: \"{text}\"")
            }
            InputValue::List(count) => format!("{key}: [{count} items]"),
            InputValue::Todos(items) => {
                let done = items
                    .iter()
                    .filter(|item| item.status == TodoStatus::Completed)
                    .count();
                format!("{key}: [{done}/{} completed]", items.len())
            }
            InputValue::Object => format!("{key}: {{...}}"),
            InputValue::Scalar(text) => format!("{key}: {text}"),
        }
    }
}

impl StyleRenderer for CompactStyle {
    fn interleaves_blocks(&self) -> bool {
        true
    }

    fn system(&self, out: &mut String, event: &SystemEvent, line: usize) {
        out.push_str(&self.painter.bold(Hue::Cyan, "SYS"));
        if let Some(subtype) = &event.subtype {
            out.push_str(&self.painter.paint(Hue::Cyan, format!("[{subtype}]")));
        }
        out.push_str(&self.painter.paint(Hue::Gray, compact_line_marker(line, self.options)));
        if let Some(model) = &event.model {
            out.push_str(&self.painter.paint(Hue::Cyan, format!(" {model}")));
        }
        if let Some(cwd) = &event.cwd {
            out.push_str(&self.painter.paint(Hue::Cyan, format!(" @{cwd}")));
        }
        out.push('\n');
    }

    fn assistant_text(&self, out: &mut String, texts: &[&str], usage: Option<&Usage>, line: usize) {
        for text in texts {
            self.tag(out, Hue::Green, "AST", line);
            out.push(' ');
            out.push_str(&self.painter.paint(Hue::White, self.preview(text)));
            out.push('\n');
        }
        if let Some(usage) = usage {
            out.push_str(&self.painter.paint(
                Hue::Gray,
                format!("  {}", format_usage(usage, self.options.verbose)),
            ));
            out.push('\n');
        }
    }

    fn tool_use(&self, out: &mut String, call: &ToolCall<'_>, line: usize) {
        self.tag(out, Hue::Yellow, "TOOL", line);
        out.push(' ');
        out.push_str(&self.painter.paint(Hue::Yellow, call.name));
        self.id(out, call.id);
        if !call.inputs.is_empty() {
            let inputs: Vec<String> = call
                .inputs
                .iter()
                .map(|(key, value)| self.input(key, value))
                .collect();
            out.push_str(&self.painter.paint(Hue::Yellow, format!(" {{{}}}", inputs.join(", "))));
        }
        out.push('\n');
    }

    fn tool_result(&self, out: &mut String, output: &ToolOutput<'_>, line: usize) {
        if output.is_error {
            self.tag(out, Hue::Red, "ERR", line);
        } else {
            self.tag(out, Hue::Magenta, "RES", line);
        }
        self.id(out, output.tool_use_id);
        out.push(' ');
        if output.text.is_empty() {
            out.push_str(&self.painter.paint(Hue::Gray, "(no output)"));
        } else {
            out.push_str(&self.painter.paint(Hue::White, self.preview(&output.text)));
        }
        out.push('\n');
    }

    fn result(&self, out: &mut String, event: &ResultEvent, body: Option<&str>, line: usize) {
        if event.is_error {
            self.tag(out, Hue::Red, "FAIL", line);
        } else {
            self.tag(out, Hue::Blue, "OK", line);
        }

        let mut stats = String::new();
        if event.num_turns > 0 {
            stats.push_str(&format!(" turns={}", event.num_turns));
        }
        if event.duration_ms > 0 {
            stats.push_str(&format!(" {}", format_seconds(event.duration_ms)));
        }
        if event.total_cost_usd > 0.0 {
            stats.push_str(&format!(" {}", format_cost(event.total_cost_usd)));
        }
        if let Some(usage) = &event.usage {
            stats.push_str(&format!(" {}", format_usage(usage, self.options.verbose)));
        }
        if !event.permission_denials.is_empty() {
            stats.push_str(&format!(" denied={}", event.permission_denials.len()));
        }
        out.push_str(&self.painter.paint(Hue::Blue, stats));
        out.push('\n');

        if self.options.verbose {
            for (model, usage) in &event.model_usage {
                let mut entry = format!("  {model}:");
                if let Some(tokens) = usage.input_tokens {
                    entry.push_str(&format!(" in={tokens:.0}"));
                }
                if let Some(tokens) = usage.output_tokens {
                    entry.push_str(&format!(" out={tokens:.0}"));
                }
                if let Some(cost) = usage.cost_usd {
                    entry.push_str(&format!(" {}", format_cost(cost)));
                }
                out.push_str(&self.painter.paint(Hue::Blue, entry));
                out.push('\n');
            }
            for (index, denial) in event.permission_denials.iter().enumerate() {
                out.push_str(&self.painter.paint(Hue::Red, format!("  [{}] {denial}", index + 1)));
                out.push('\n');
            }
        }

        if let Some(body) = body {
            out.push_str(&self.painter.paint(Hue::White, format!("  {}", self.preview(body))));
            out.push('\n');
        }
    }
}
