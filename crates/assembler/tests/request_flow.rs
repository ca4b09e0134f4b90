//! End-to-end flow: raw chat-request JSON → parsed conversation → prompt.

use clawbridge_assembler::{ARTIFACT_DIRECTIVE, PromptAssembler};
use clawbridge_config::PromptConfig;
use clawbridge_core::parse_conversation;
use serde_json::json;

#[test]
fn full_request_flattens_to_prompt_and_images() {
    let request = json!({
        "model": "claude-3-7-sonnet",
        "messages": [
            {"role": "system", "content": "Answer in haiku."},
            {"role": "user", "content": [
                {"type": "text", "text": "What is in this picture?"},
                {"type": "image_url", "image_url": {"url": "https://cdn.example/cat.png"}},
            ]},
            {"role": "assistant", "content": "A cat, sleeping."},
            {"bad": "entry"},
            {"role": "user", "content": "And this one?"},
        ],
    });

    let raw = request["messages"].as_array().unwrap();
    let conversation = parse_conversation(raw);
    assert_eq!(conversation.len(), 4, "malformed entry must be skipped");

    let assembler = PromptAssembler::new(PromptConfig::default());
    let result = assembler.assemble(conversation);

    assert_eq!(
        result.prompt,
        "System: Answer in haiku.\n\n\
         Human: What is in this picture?\n\n\
         Assistant: A cat, sleeping.\n\n\
         Human: And this one?\n\n"
    );
    assert_eq!(result.images, vec!["https://cdn.example/cat.png"]);
    assert_eq!(result.last_user_text, "Human: And this one?\n\n");
    assert_eq!(result.messages.len(), 4);
}

#[test]
fn oversized_request_keeps_system_and_recent_turns() {
    let raw: Vec<serde_json::Value> = std::iter::once(json!({
        "role": "system", "content": "Stay on topic."
    }))
    .chain((0..8).map(|i| json!({"role": "user", "content": format!("turn {i}")})))
    .collect();

    let config = PromptConfig {
        disable_artifacts: true,
        max_context_messages: 3,
        ..PromptConfig::default()
    };
    let assembler = PromptAssembler::new(config);
    let result = assembler.assemble(parse_conversation(&raw));

    assert_eq!(
        result.prompt,
        format!(
            "{ARTIFACT_DIRECTIVE}System: Stay on topic.\n\nHuman: turn 6\n\nHuman: turn 7\n\n"
        )
    );
    assert_eq!(result.messages.len(), 3);
}
