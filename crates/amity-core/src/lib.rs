//! amity-core: Shared types for the Amity social graph.
//!
//! This crate provides the foundations used across all Amity components:
//! - Plain records projected out of graph query rows (Person, Message, Post)
//! - Discovery result types (hop and messaging suggestions)
//! - Timestamp formatting for the lexically-sortable wire format
//! - Validated identifiers for anything interpolated into Cypher text

pub mod tag;
pub mod types;

pub use tag::{InvalidTag, Tag};
pub use types::{
    format_timestamp, parse_timestamp, HopSuggestion, MessageRecord, MessageSuggestion,
    PersonRecord, PostRecord,
};
