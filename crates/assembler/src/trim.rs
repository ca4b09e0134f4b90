//! History trimming policy.
//!
//! Bounds the forwarded conversation to a fixed message count while keeping
//! the pieces the downstream model needs most: the latest system message
//! (pinned to the front) and the most recent non-system turns.

use clawbridge_core::{Message, Role};
use tracing::info;

/// Cap a conversation at `max_messages` entries.
///
/// - At or under the cap: returned unchanged.
/// - Over the cap: the last-seen system message (if any) is moved to the
///   front and the most recent `max_messages - 1` other messages follow it,
///   in their original relative order. Without a system message the most
///   recent `max_messages` survive.
///
/// Total over well-formed input; a cap of zero degenerates to "system
/// message only" rather than panicking (config validation keeps real
/// callers at `>= 1`).
pub fn trim_conversation(messages: Vec<Message>, max_messages: usize) -> Vec<Message> {
    if messages.len() <= max_messages {
        return messages;
    }

    info!(
        count = messages.len(),
        max = max_messages,
        "conversation exceeds history cap, trimming oldest messages"
    );

    // Last system message wins; everything else keeps its relative order.
    let mut system_msg: Option<Message> = None;
    let mut others: Vec<Message> = Vec::with_capacity(messages.len());
    for msg in messages {
        if msg.role == Role::System {
            system_msg = Some(msg);
        } else {
            others.push(msg);
        }
    }

    let keep = if system_msg.is_some() {
        // Reserve one slot for the system message.
        max_messages.saturating_sub(1)
    } else {
        max_messages
    };
    if others.len() > keep {
        others.drain(..others.len() - keep);
    }

    match system_msg {
        Some(system) => {
            let mut trimmed = Vec::with_capacity(others.len() + 1);
            trimmed.push(system);
            trimmed.extend(others);
            trimmed
        }
        None => others,
    }
}
