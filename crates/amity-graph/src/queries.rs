//! Read operations for the social graph.
//!
//! Every query projects rows into the plain records from `amity-core`.
//! Zero rows is an empty Vec, never an error.

use chrono::NaiveDateTime;
use neo4rs::query;

use amity_core::{
    format_timestamp, parse_timestamp, HopSuggestion, MessageRecord, MessageSuggestion,
    PersonRecord, PostRecord, Tag,
};

use crate::client::{GraphClient, GraphError};

/// Upper bound for the variable-length hop pattern. The hop count is spliced
/// into the query text (variable-length bounds cannot be parameters), so it
/// is range-checked first.
pub const MAX_HOP_BOUND: u32 = 15;

impl GraphClient {
    // ── Neighborhood Reads ───────────────────────────────────────

    /// Everyone directly connected to `user_id`, one undirected hop, any
    /// relationship type.
    pub async fn friends_and_family(&self, user_id: &str) -> Result<Vec<PersonRecord>, GraphError> {
        let q = query(
            "MATCH (:User {userId: $user_id})-[:CONNECTED_TO]-(person)
             RETURN person, labels(person) AS labels",
        )
        .param("user_id", user_id);

        self.collect_persons(q).await
    }

    /// Persons reachable by exactly two consecutive `family` connections.
    ///
    /// There is no self-exclusion: when family edges run both ways along a
    /// path, the origin itself can come back as a result. Duplicate rows for
    /// multi-path reachability are not suppressed either.
    pub async fn family_of_family(&self, user_id: &str) -> Result<Vec<PersonRecord>, GraphError> {
        let q = query(
            "MATCH (:User {userId: $user_id})-[:CONNECTED_TO {type: 'family'}]-(:User)-[:CONNECTED_TO {type: 'family'}]-(person)
             RETURN person, labels(person) AS labels",
        )
        .param("user_id", user_id);

        self.collect_persons(q).await
    }

    /// All persons carrying a tag label.
    pub async fn users_by_tag(&self, tag: &Tag) -> Result<Vec<PersonRecord>, GraphError> {
        let cypher = format!(
            "MATCH (person:User:{tag})
             RETURN person, labels(person) AS labels"
        );
        self.collect_persons(query(&cypher)).await
    }

    // ── Messaging Reads ──────────────────────────────────────────

    /// Messages from `sender_id` to `receiver_id` strictly newer than
    /// `start`, ascending by timestamp. One direction only.
    pub async fn messages_after_date(
        &self,
        sender_id: &str,
        receiver_id: &str,
        start: &NaiveDateTime,
    ) -> Result<Vec<MessageRecord>, GraphError> {
        let q = query(
            "MATCH (:User {userId: $sender_id})-[:SENT]->(m:Message)-[:RECEIVED]->(:User {userId: $receiver_id})
             WHERE m.timestamp > $start
             RETURN m.content AS content, m.timestamp AS timestamp
             ORDER BY m.timestamp",
        )
        .param("sender_id", sender_id)
        .param("receiver_id", receiver_id)
        .param("start", format_timestamp(start));

        let rows = self.query_rows(q).await?;
        let mut messages = Vec::with_capacity(rows.len());
        for row in rows {
            messages.push(MessageRecord {
                sender_id: sender_id.to_string(),
                receiver_id: receiver_id.to_string(),
                content: get_column(&row, "content")?,
                timestamp: timestamp_from_row(&row)?,
            });
        }
        Ok(messages)
    }

    /// The full conversation between a pair: messages in both directions,
    /// interleaved ascending by timestamp.
    pub async fn full_conversation(
        &self,
        user_id1: &str,
        user_id2: &str,
    ) -> Result<Vec<MessageRecord>, GraphError> {
        let q = query(
            "MATCH (a:User {userId: $user_id1}), (b:User {userId: $user_id2})
             MATCH (sender:User)-[:SENT]->(m:Message)-[:RECEIVED]->(receiver:User)
             WHERE (sender = a AND receiver = b) OR (sender = b AND receiver = a)
             RETURN sender.userId AS sender_id, receiver.userId AS receiver_id,
                    m.content AS content, m.timestamp AS timestamp
             ORDER BY m.timestamp",
        )
        .param("user_id1", user_id1)
        .param("user_id2", user_id2);

        let rows = self.query_rows(q).await?;
        let mut messages = Vec::with_capacity(rows.len());
        for row in rows {
            messages.push(MessageRecord {
                sender_id: get_column(&row, "sender_id")?,
                receiver_id: get_column(&row, "receiver_id")?,
                content: get_column(&row, "content")?,
                timestamp: timestamp_from_row(&row)?,
            });
        }
        Ok(messages)
    }

    // ── Post Reads ───────────────────────────────────────────────

    /// Posts authored by `user_id`, ascending by timestamp.
    pub async fn posts_by(&self, user_id: &str) -> Result<Vec<PostRecord>, GraphError> {
        let q = query(
            "MATCH (:User {userId: $user_id})-[:POSTED]->(p:Post)
             RETURN p.title AS title, p.content AS content, p.timestamp AS timestamp
             ORDER BY p.timestamp",
        )
        .param("user_id", user_id);

        let rows = self.query_rows(q).await?;
        let mut posts = Vec::with_capacity(rows.len());
        for row in rows {
            posts.push(PostRecord {
                title: get_column(&row, "title")?,
                content: get_column(&row, "content")?,
                timestamp: timestamp_from_row(&row)?,
            });
        }
        Ok(posts)
    }

    /// Persons mentioned by `user_id` whose `@userId` text still appears in
    /// one of the author's posts.
    ///
    /// Despite the name there is no work-relationship filter; this is a
    /// cross-check of MENTIONED edges against the post text, kept for
    /// contract compatibility with the callers that depend on it.
    pub async fn users_mentioned_with_work_relation(
        &self,
        user_id: &str,
    ) -> Result<Vec<PersonRecord>, GraphError> {
        let q = query(
            "MATCH (author:User {userId: $user_id})-[:MENTIONED]->(person:User)
             MATCH (author)-[:POSTED]->(post:Post)
             WHERE toLower(post.content) CONTAINS '@' + person.userId
             RETURN DISTINCT person, labels(person) AS labels",
        )
        .param("user_id", user_id);

        self.collect_persons(q).await
    }

    // ── Discovery ────────────────────────────────────────────────

    /// Connection candidates reachable through an intermediate: any path of
    /// 1..`max_hops` hops to an intermediate person plus one more hop, where
    /// the candidate is not already directly connected to the origin.
    ///
    /// Results are `(person, path length)` pairs ascending by path length.
    /// A candidate reachable at several distances appears once per distance.
    pub async fn find_connections_by_hops(
        &self,
        user_id: &str,
        max_hops: u32,
    ) -> Result<Vec<HopSuggestion>, GraphError> {
        validate_hop_bound(max_hops)?;

        let cypher = format!(
            "MATCH path = (origin:User {{userId: $user_id}})-[:CONNECTED_TO*1..{max_hops}]-(:User)-[:CONNECTED_TO]-(person:User)
             WHERE NOT (origin)-[:CONNECTED_TO]-(person)
             AND length(path) <= $max_hops
             RETURN DISTINCT person, labels(person) AS labels, length(path) AS hops
             ORDER BY hops"
        );
        let q = query(&cypher)
            .param("user_id", user_id)
            .param("max_hops", max_hops as i64);

        let rows = self.query_rows(q).await?;
        let mut suggestions = Vec::with_capacity(rows.len());
        for row in rows {
            let hops: i64 = row
                .get("hops")
                .map_err(|e| GraphError::Deserialization(format!("Failed to get hops: {e}")))?;
            suggestions.push(HopSuggestion {
                person: person_from_row(&row)?,
                hops,
            });
        }
        Ok(suggestions)
    }

    /// Connection candidates by inbound message volume: persons who received
    /// messages from anyone in the origin's connection network, are not
    /// directly connected to the origin, and were messaged by at least
    /// `min_messages` distinct members of that network.
    ///
    /// Results are `(person, messenger count)` pairs descending by count.
    pub async fn find_connections_by_messages(
        &self,
        user_id: &str,
        min_messages: u32,
    ) -> Result<Vec<MessageSuggestion>, GraphError> {
        let q = query(
            "MATCH (origin:User {userId: $user_id})-[:CONNECTED_TO*1..]-(messenger:User)-[:SENT]->(:Message)-[:RECEIVED]->(person:User)
             WHERE NOT (origin)-[:CONNECTED_TO]-(person)
             WITH person, count(DISTINCT messenger) AS messenger_count
             WHERE messenger_count >= $min_messages
             RETURN person, labels(person) AS labels, messenger_count
             ORDER BY messenger_count DESC",
        )
        .param("user_id", user_id)
        .param("min_messages", min_messages as i64);

        let rows = self.query_rows(q).await?;
        let mut suggestions = Vec::with_capacity(rows.len());
        for row in rows {
            let messenger_count: i64 = row.get("messenger_count").map_err(|e| {
                GraphError::Deserialization(format!("Failed to get messenger_count: {e}"))
            })?;
            suggestions.push(MessageSuggestion {
                person: person_from_row(&row)?,
                messenger_count,
            });
        }
        Ok(suggestions)
    }

    // ── Row Collection ───────────────────────────────────────────

    async fn collect_persons(&self, q: neo4rs::Query) -> Result<Vec<PersonRecord>, GraphError> {
        let rows = self.query_rows(q).await?;
        let mut persons = Vec::with_capacity(rows.len());
        for row in rows {
            persons.push(person_from_row(&row)?);
        }
        Ok(persons)
    }
}

/// Range-check a caller-supplied hop bound before it is spliced into the
/// variable-length pattern.
fn validate_hop_bound(max_hops: u32) -> Result<(), GraphError> {
    if (1..=MAX_HOP_BOUND).contains(&max_hops) {
        Ok(())
    } else {
        Err(GraphError::HopBound {
            given: max_hops,
            max: MAX_HOP_BOUND,
        })
    }
}

/// Project the `person` node and `labels` column of a row into a record.
/// The `User` base label is dropped; whatever remains are the tags.
fn person_from_row(row: &neo4rs::Row) -> Result<PersonRecord, GraphError> {
    let node: neo4rs::Node = row
        .get("person")
        .map_err(|e| GraphError::Deserialization(format!("Failed to get person node: {e}")))?;
    let labels: Vec<String> = row.get("labels").unwrap_or_default();

    Ok(PersonRecord {
        user_id: node.get("userId").unwrap_or_default(),
        name: node.get("name").unwrap_or_default(),
        tags: labels.into_iter().filter(|l| l != "User").collect(),
    })
}

fn get_column(row: &neo4rs::Row, key: &str) -> Result<String, GraphError> {
    row.get(key)
        .map_err(|e| GraphError::Deserialization(format!("Failed to get {key}: {e}")))
}

fn timestamp_from_row(row: &neo4rs::Row) -> Result<NaiveDateTime, GraphError> {
    let raw = get_column(row, "timestamp")?;
    parse_timestamp(&raw)
        .map_err(|e| GraphError::Deserialization(format!("Bad timestamp {raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hop_bound_accepts_valid_range() {
        assert!(validate_hop_bound(1).is_ok());
        assert!(validate_hop_bound(3).is_ok());
        assert!(validate_hop_bound(MAX_HOP_BOUND).is_ok());
    }

    #[test]
    fn hop_bound_rejects_zero_and_excessive() {
        assert!(matches!(
            validate_hop_bound(0),
            Err(GraphError::HopBound { given: 0, .. })
        ));
        assert!(validate_hop_bound(MAX_HOP_BOUND + 1).is_err());
    }
}
