//! amity-graph — Neo4j access layer for the social graph.
//!
//! This crate is the single point of contact with Neo4j. Every public method
//! builds one parameterized Cypher query, runs it in its own transaction, and
//! maps the resulting rows into the plain records from `amity-core`. There is
//! no in-process state beyond the pooled connection: traversal, pattern
//! matching, and atomicity are entirely the database's job.

pub mod client;
pub mod mutations;
pub mod queries;

pub use client::{GraphClient, GraphConfig, GraphError};
