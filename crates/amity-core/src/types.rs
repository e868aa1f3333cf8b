//! Plain records projected from graph query rows.
//!
//! Nothing here is cached or kept in-process between calls: every record is a
//! snapshot of database state at query time. Identity is the caller-supplied
//! `user_id` string, never an internal graph id.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamps are stored on Message and Post nodes as strings in this format,
/// so lexical comparison inside Cypher matches chronological order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Render a timestamp in the stored wire format.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored timestamp string back into a `NaiveDateTime`.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
}

/// A person in the social graph. Companies and universities are persons
/// carrying extra labels, surfaced here as `tags`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonRecord {
    pub user_id: String,
    pub name: String,
    /// Extra node labels beyond `User` (e.g. `Company`, interest tags).
    pub tags: Vec<String>,
}

/// A directed message between two persons.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageRecord {
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub timestamp: NaiveDateTime,
}

/// A post authored by a person.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostRecord {
    pub title: String,
    pub content: String,
    pub timestamp: NaiveDateTime,
}

/// A connection candidate discovered by hop distance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HopSuggestion {
    pub person: PersonRecord,
    /// Path length from the origin to the intermediate person.
    pub hops: i64,
}

/// A connection candidate discovered by inbound message volume.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageSuggestion {
    pub person: PersonRecord,
    /// Distinct persons in the origin's network who messaged the candidate.
    pub messenger_count: i64,
}
