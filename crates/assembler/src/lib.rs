//! Prompt assembly pipeline — the core of clawbridge.
//!
//! Turns a parsed conversation into the single flattened prompt string a
//! downstream conversational API expects, in three steps:
//!
//! 1. **Trim** — bound the history to `max_context_messages`, pinning the
//!    most recent system message first and keeping the newest turns.
//! 2. **Flatten** — write each message as `<RolePrefix><text>\n\n`, lifting
//!    image parts out into a separate URL list.
//! 3. **Track** — remember the role-prefixed text of the most recent user
//!    message, for callers that resend it out-of-band.
//!
//! Assembly is a pure, synchronous transformation: no I/O, no shared state,
//! and no failure paths. Malformed input was already dropped at the wire
//! boundary (`clawbridge_core::parse_conversation`).

pub mod assembler;
pub mod trim;

pub use assembler::{ARTIFACT_DIRECTIVE, AssemblyResult, PromptAssembler};
pub use trim::trim_conversation;
