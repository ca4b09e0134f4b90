//! Message domain types and the wire-boundary parser.
//!
//! These are the core value objects that flow through the pipeline:
//! a client posts a chat request → the boundary parser turns each raw JSON
//! entry into a [`Message`] → the assembler flattens them into one prompt.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The role of a message sender in a conversation.
///
/// Parsed from the wire `role` string. Any string is accepted; strings
/// outside the three well-known roles land in [`Role::Other`] so they still
/// get a deterministic prefix in the flattened prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instructions (pinned first when the history is trimmed)
    System,
    /// The end user
    User,
    /// The AI assistant
    Assistant,
    /// Any other role string, kept verbatim
    #[serde(untagged)]
    Other(String),
}

impl Role {
    /// Parse a wire role string. Total: unknown strings map to `Other`.
    pub fn parse(role: &str) -> Self {
        match role {
            "system" => Role::System,
            "user" => Role::User,
            "assistant" => Role::Assistant,
            other => Role::Other(other.to_string()),
        }
    }

    /// The speaker label prepended to this role's text in the flattened
    /// prompt. Fixed for the three well-known roles (the downstream model
    /// depends on these exact labels); other roles get their capitalized
    /// role string.
    pub fn prefix(&self) -> String {
        match self {
            Role::System => "System: ".to_string(),
            Role::User => "Human: ".to_string(),
            Role::Assistant => "Assistant: ".to_string(),
            Role::Other(name) => {
                let mut chars = name.chars();
                match chars.next() {
                    Some(first) => format!("{}{}: ", first.to_uppercase(), chars.as_str()),
                    None => "Unknown: ".to_string(),
                }
            }
        }
    }

    /// Whether this is the `user` role (the one tracked for "last user text").
    pub fn is_user(&self) -> bool {
        matches!(self, Role::User)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
            Role::Other(name) => write!(f, "{name}"),
        }
    }
}

/// The `url` payload of an `image_url` content part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSource {
    pub url: String,
}

/// One entry of a multi-part message body.
///
/// Serializes to the wire shape (`{"type": "text", "text": ...}` /
/// `{"type": "image_url", "image_url": {"url": ...}}`). Unknown part types
/// never reach this enum — the boundary parser drops them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageSource },
}

impl ContentPart {
    /// Create a text part.
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    /// Create an image reference part.
    pub fn image(url: impl Into<String>) -> Self {
        ContentPart::ImageUrl {
            image_url: ImageSource { url: url.into() },
        }
    }

    /// Parse one raw part. Returns `None` for unknown part types and for
    /// parts missing their payload field (`text`, `image_url.url`).
    fn from_value(value: &Value) -> Option<Self> {
        let part = value.as_object()?;
        match part.get("type")?.as_str()? {
            "text" => Some(ContentPart::text(part.get("text")?.as_str()?)),
            "image_url" => Some(ContentPart::image(
                part.get("image_url")?.get("url")?.as_str()?,
            )),
            _ => None,
        }
    }
}

/// The body of a message.
///
/// Fixed at parse time and never reinterpreted. `Unsupported` covers content
/// that is present but neither a string nor an array — such a message still
/// contributes its role prefix to the prompt, just no body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain text body
    Text(String),
    /// Ordered mixed text/image parts
    Parts(Vec<ContentPart>),
    /// Content of an unrecognized shape
    Unsupported,
}

impl MessageContent {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::String(text) => MessageContent::Text(text.clone()),
            Value::Array(parts) => MessageContent::Parts(
                parts.iter().filter_map(ContentPart::from_value).collect(),
            ),
            _ => MessageContent::Unsupported,
        }
    }
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    /// Who sent this message
    pub role: Role,
    /// The message body
    pub content: MessageContent,
}

impl Message {
    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: MessageContent::Text(content.into()),
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(content.into()),
        }
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: MessageContent::Text(content.into()),
        }
    }

    /// Create a user message with mixed text/image parts.
    pub fn user_parts(parts: Vec<ContentPart>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Parts(parts),
        }
    }

    /// Parse one raw message map from the wire.
    ///
    /// Returns `None` when the entry has no string `role` or no `content`
    /// key at all — those messages are skipped, never rejected.
    pub fn from_value(value: &Value) -> Option<Self> {
        let entry = value.as_object()?;
        let role = Role::parse(entry.get("role")?.as_str()?);
        let content = MessageContent::from_value(entry.get("content")?);
        Some(Self { role, content })
    }
}

/// Parse a raw message list, dropping entries that fail the boundary checks.
///
/// This is the single place where loose JSON becomes typed messages; every
/// downstream operation (trimming, flattening) works on the result.
pub fn parse_conversation(values: &[Value]) -> Vec<Message> {
    let parsed: Vec<Message> = values.iter().filter_map(Message::from_value).collect();
    if parsed.len() < values.len() {
        tracing::debug!(
            total = values.len(),
            skipped = values.len() - parsed.len(),
            "skipped malformed message entries"
        );
    }
    parsed
}
