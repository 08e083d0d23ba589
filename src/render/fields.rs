use crate::types::Usage;
use serde_json::Value;

pub const TODO_TOOL: &str = "TodoWrite";
pub const TODO_KEY: &str = "todos";

/// A `tool_use` input value, classified for display.
#[derive(Debug, Clone, PartialEq)]
pub enum InputValue<'a> {
    Text(&'a str),
    List(usize),
    Todos(Vec<TodoItem<'a>>),
    Object,
    Scalar(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoStatus {
    Completed,
    InProgress,
    Pending,
    Other,
}

impl TodoStatus {
    pub fn parse(status: Option<&str>) -> Self {
        match status {
            Some("completed") => TodoStatus::Completed,
            Some("in_progress") => TodoStatus::InProgress,
            Some("pending") => TodoStatus::Pending,
            _ => TodoStatus::Other,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            TodoStatus::Completed => "✓",
            TodoStatus::InProgress => "→",
            TodoStatus::Pending => "○",
            TodoStatus::Other => "-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoItem<'a> {
    pub status: TodoStatus,
    pub content: &'a str,
}

pub fn classify_input<'a>(tool_name: &str, key: &str, value: &'a Value) -> InputValue<'a> {
    match value {
        Value::String(text) => InputValue::Text(text),
        Value::Array(items) if tool_name == TODO_TOOL && key == TODO_KEY => {
            InputValue::Todos(items.iter().filter_map(todo_item).collect())
        }
        Value::Array(items) => InputValue::List(items.len()),
        Value::Object(_) => InputValue::Object,
        Value::Number(_) | Value::Bool(_) | Value::Null => InputValue::Scalar(value.to_string()),
    }
}

fn todo_item(value: &Value) -> Option<TodoItem<'_>> {
    let entry = value.as_object()?;
    Some(TodoItem {
        status: TodoStatus::parse(entry.get("status").and_then(Value::as_str)),
        content: entry.get("content").and_then(Value::as_str).unwrap_or(""),
    })
}

/// Flatten `tool_result.content` to display text.
pub fn tool_result_text(content: &Value) -> String {
    match content {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Array(parts) if !parts.is_empty() => {
            let texts: Option<Vec<&str>> = parts
                .iter()
                .map(|part| part.get("text").and_then(Value::as_str))
                .collect();
            match texts {
                Some(texts) => texts.join("\n"),
                None => content.to_string(),
            }
        }
        other => other.to_string(),
    }
}

pub fn format_usage(usage: &Usage, verbose: bool) -> String {
    let mut out = format!("in={} out={}", usage.input_tokens, usage.output_tokens);
    if let Some(read) = usage.cache_read_input_tokens.filter(|n| *n > 0) {
        out.push_str(&format!(" cache_read={read}"));
    }
    if let Some(create) = usage.cache_creation_input_tokens.filter(|n| *n > 0) {
        out.push_str(&format!(" cache_create={create}"));
    }
    if verbose {
        if let Some(tier) = usage.service_tier.as_deref().filter(|t| !t.is_empty()) {
            out.push_str(&format!(" tier={tier}"));
        }
    }
    out
}

pub fn token_line(usage: &Usage, verbose: bool) -> String {
    format!("Tokens: {}", format_usage(usage, verbose))
}

pub fn format_seconds(ms: u64) -> String {
    format!("{:.2}s", ms as f64 / 1000.0)
}

pub fn format_cost(usd: f64) -> String {
    format!("${usd:.4}")
}
