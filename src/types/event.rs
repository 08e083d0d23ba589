use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One decoded line of a stream-json transcript.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    System(SystemEvent),
    Assistant(MessageEvent),
    User(MessageEvent),
    Result(ResultEvent),
    /// Any other `type` tag, including a missing one (empty string).
    Unknown { kind: String },
}

impl Event {
    /// Decode one transcript line. The `type` tag is read first so that an
    /// unrecognised tag still yields an event instead of a decode error.
    pub fn from_line(line: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(line)?;
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Ok(match kind.as_str() {
            "system" => Event::System(serde_json::from_value(value)?),
            "assistant" => Event::Assistant(serde_json::from_value(value)?),
            "user" => Event::User(serde_json::from_value(value)?),
            "result" => Event::Result(serde_json::from_value(value)?),
            _ => Event::Unknown { kind },
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SystemEvent {
    pub subtype: Option<String>,
    pub session_id: Option<String>,
    pub cwd: Option<String>,
    pub model: Option<String>,
    pub claude_code_version: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tools: Vec<String>,
}

/// Shared shape of `assistant` and `user` events.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MessageEvent {
    pub message: Option<Message>,
    pub session_id: Option<String>,
    pub parent_tool_use_id: Option<String>,
}

impl MessageEvent {
    pub fn content(&self) -> &[ContentBlock] {
        self.message
            .as_ref()
            .map(|message| message.content.as_slice())
            .unwrap_or_default()
    }

    pub fn usage(&self) -> Option<&Usage> {
        self.message.as_ref().and_then(|message| message.usage.as_ref())
    }

    /// Non-empty text blocks, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.content().iter().filter_map(|block| match block {
            ContentBlock::Text { text } if !text.is_empty() => Some(text.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Message {
    pub id: Option<String>,
    pub role: Option<String>,
    pub model: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Vec<ContentBlock>,
    pub stop_reason: Option<String>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        #[serde(default, deserialize_with = "null_as_default")]
        text: String,
    },
    ToolUse {
        #[serde(default, deserialize_with = "null_as_default")]
        id: String,
        #[serde(default, deserialize_with = "null_as_default")]
        name: String,
        #[serde(default, deserialize_with = "null_as_default")]
        input: Map<String, Value>,
    },
    ToolResult {
        #[serde(default, deserialize_with = "null_as_default")]
        tool_use_id: String,
        #[serde(default)]
        content: Value,
        #[serde(default, deserialize_with = "null_as_default")]
        is_error: bool,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResultEvent {
    pub subtype: Option<String>,
    pub session_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_error: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub num_turns: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration_ms: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration_api_ms: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub result: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_cost_usd: f64,
    pub usage: Option<Usage>,
    #[serde(rename = "modelUsage", deserialize_with = "lenient_model_usage")]
    pub model_usage: BTreeMap<String, ModelUsage>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub permission_denials: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Usage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub input_tokens: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub output_tokens: u64,
    pub cache_read_input_tokens: Option<u64>,
    pub cache_creation_input_tokens: Option<u64>,
    pub cache_creation: Option<CacheCreation>,
    pub service_tier: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CacheCreation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub ephemeral_5m_input_tokens: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ephemeral_1h_input_tokens: u64,
}

/// Per-model entry of `result.modelUsage`. Fields that are missing or not
/// numbers stay `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelUsage {
    pub input_tokens: Option<f64>,
    pub output_tokens: Option<f64>,
    pub cache_read_input_tokens: Option<f64>,
    pub cache_creation_input_tokens: Option<f64>,
    pub cost_usd: Option<f64>,
}

impl ModelUsage {
    pub fn from_value(value: &Value) -> Self {
        let number = |key: &str| value.get(key).and_then(Value::as_f64);
        Self {
            input_tokens: number("inputTokens"),
            output_tokens: number("outputTokens"),
            cache_read_input_tokens: number("cacheReadInputTokens"),
            cache_creation_input_tokens: number("cacheCreationInputTokens"),
            cost_usd: number("costUSD"),
        }
    }
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// `modelUsage` shapes vary by upstream version; any entry is accepted and
/// read field by field.
fn lenient_model_usage<'de, D>(deserializer: D) -> Result<BTreeMap<String, ModelUsage>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_object()
        .map(|entries| {
            entries
                .iter()
                .map(|(model, usage)| (model.clone(), ModelUsage::from_value(usage)))
                .collect()
        })
        .unwrap_or_default())
}
