//! `clawbridge assemble` — flatten a chat request into a prompt.

use std::io::Read;
use std::path::PathBuf;

use clawbridge_assembler::PromptAssembler;
use clawbridge_config::AppConfig;
use clawbridge_core::{Error, parse_conversation};
use serde_json::Value;

pub fn run(
    file: Option<PathBuf>,
    max_messages: Option<usize>,
    disable_artifacts: bool,
    show_images: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load()?;
    if let Some(max) = max_messages {
        config.prompt.max_context_messages = max;
    }
    if disable_artifacts {
        config.prompt.disable_artifacts = true;
    }
    config.validate()?;

    let raw = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let request: Value = serde_json::from_str(&raw).map_err(Error::from)?;
    let raw_messages = extract_messages(&request)?;

    let conversation = parse_conversation(raw_messages);
    if conversation.is_empty() {
        return Err(Error::InvalidRequest("request contained no valid messages".into()).into());
    }

    let assembler = PromptAssembler::new(config.prompt);
    let result = assembler.assemble(conversation);

    print!("{}", result.prompt);

    if show_images && !result.images.is_empty() {
        println!();
        println!("--- images ({}) ---", result.images.len());
        for url in &result.images {
            println!("{url}");
        }
    }

    Ok(())
}

/// Accept either a full request object with a `messages` array or a bare
/// message array.
fn extract_messages(request: &Value) -> Result<&[Value], Error> {
    match request {
        Value::Array(messages) => Ok(messages),
        Value::Object(obj) => match obj.get("messages").and_then(Value::as_array) {
            Some(messages) => Ok(messages),
            None => Err(Error::InvalidRequest(
                "request has no \"messages\" array".into(),
            )),
        },
        _ => Err(Error::InvalidRequest(
            "request must be a JSON object or array".into(),
        )),
    }
}
