//! Message-to-prompt flattening.

use clawbridge_config::PromptConfig;
use clawbridge_core::{ContentPart, Message, MessageContent};
use serde::Serialize;
use tracing::{debug, trace};

use crate::trim::trim_conversation;

/// Instruction line prepended when `disable_artifacts` is set. The exact
/// wording (including the trailing blank line) is what the downstream model
/// was tuned against; do not reformat.
pub const ARTIFACT_DIRECTIVE: &str = "System: Forbidden to use <antArtifac> </antArtifac> to wrap code blocks, use markdown syntax instead, which means wrapping code blocks with ``` ```\n\n";

/// Everything one assembly run produces.
#[derive(Debug, Clone, Serialize)]
pub struct AssemblyResult {
    /// The flattened role-prefixed prompt
    pub prompt: String,
    /// Image URLs in encounter order, duplicates kept
    pub images: Vec<String>,
    /// Role-prefixed text of the most recent user message (empty if none)
    pub last_user_text: String,
    /// The count-capped copy of the conversation that was flattened
    pub messages: Vec<Message>,
}

/// Flattens a conversation into a single prompt string.
///
/// Short-lived: one value per request, configured from an immutable
/// [`PromptConfig`] snapshot. Holds no state between calls, so independent
/// requests can assemble concurrently without coordination.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    config: PromptConfig,
}

impl PromptAssembler {
    /// Create an assembler for one request.
    pub fn new(config: PromptConfig) -> Self {
        Self { config }
    }

    /// Flatten `conversation` into a prompt, extracting image references.
    ///
    /// The history is first capped at `max_context_messages` (see
    /// [`trim_conversation`]). Each surviving message contributes its role
    /// prefix once, then its text body (or bodies, for multi-part content)
    /// each terminated by a blank line. Image parts contribute nothing to
    /// the prompt text; their URLs are collected in encounter order. Every
    /// user text overwrites `last_user_text`, so the final value is the
    /// last text part of the last user message.
    pub fn assemble(&self, conversation: Vec<Message>) -> AssemblyResult {
        let messages = trim_conversation(conversation, self.config.max_context_messages);

        let mut prompt = String::new();
        if self.config.disable_artifacts {
            prompt.push_str(ARTIFACT_DIRECTIVE);
        }

        let mut images: Vec<String> = Vec::new();
        let mut last_user_text = String::new();

        for msg in &messages {
            let prefix = msg.role.prefix();
            prompt.push_str(&prefix);

            match &msg.content {
                MessageContent::Text(text) => {
                    prompt.push_str(text);
                    prompt.push_str("\n\n");
                    if msg.role.is_user() {
                        last_user_text = format!("{prefix}{text}\n\n");
                    }
                }
                MessageContent::Parts(parts) => {
                    for part in parts {
                        match part {
                            ContentPart::Text { text } => {
                                prompt.push_str(text);
                                prompt.push_str("\n\n");
                                if msg.role.is_user() {
                                    last_user_text = format!("{prefix}{text}\n\n");
                                }
                            }
                            ContentPart::ImageUrl { image_url } => {
                                images.push(image_url.url.clone());
                            }
                        }
                    }
                }
                // Prefix only: the shape was present but unrecognized.
                MessageContent::Unsupported => {}
            }

            trace!(role = %msg.role, prompt_len = prompt.len(), "message flattened");
        }

        debug!(
            messages = messages.len(),
            prompt_len = prompt.len(),
            images = images.len(),
            "prompt assembled"
        );

        AssemblyResult {
            prompt,
            images,
            last_user_text,
            messages,
        }
    }

    /// Build the replacement prompt for big-context mode.
    ///
    /// Used when the assembled prompt would overflow the downstream model's
    /// context window and the conversation is shipped out-of-band instead.
    /// A full replacement: nothing from a previous [`assemble`] run is
    /// referenced.
    ///
    /// [`assemble`]: PromptAssembler::assemble
    pub fn reset_for_big_context(&self) -> String {
        let mut prompt = String::new();
        if self.config.disable_artifacts {
            prompt.push_str(ARTIFACT_DIRECTIVE);
        }
        prompt.push_str(&self.config.big_context_prompt);
        prompt.push_str("\n\n");

        debug!(prompt_len = prompt.len(), "prompt replaced with big-context directive");
        prompt
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
