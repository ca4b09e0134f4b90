//! # Clawbridge Core
//!
//! Domain types and error definitions for the clawbridge prompt pipeline.
//! This crate has **zero framework dependencies** — it defines the message
//! model that the assembler and CLI crates build on.
//!
//! Incoming chat requests carry loosely-shaped JSON messages. This crate
//! parses them once, at the boundary, into a closed set of types
//! ([`Message`], [`MessageContent`], [`ContentPart`]); anything that does
//! not fit is skipped rather than rejected, so a single malformed entry
//! never fails the whole request.

pub mod error;
pub mod message;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result};
pub use message::{ContentPart, Message, MessageContent, Role, parse_conversation};
