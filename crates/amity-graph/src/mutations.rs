//! Write operations for the social graph.
//!
//! Person creation uses MERGE (upsert) semantics keyed on `userId`, so
//! repeating a create updates the name instead of duplicating the node.
//! Deletes are detach-deletes; deleting something that does not exist
//! matches zero rows and succeeds.

use chrono::NaiveDateTime;
use neo4rs::query;

use amity_core::{format_timestamp, Tag};

use crate::client::{GraphClient, GraphError};

impl GraphClient {
    // ── Person Upserts ───────────────────────────────────────────

    /// Upsert a person. The `userId` is the identity; the name is overwritten
    /// on every call, so the latest supplied name wins.
    pub async fn create_user(&self, user_id: &str, name: &str) -> Result<(), GraphError> {
        let q = query("MERGE (u:User {userId: $user_id}) SET u.name = $name")
            .param("user_id", user_id)
            .param("name", name);
        self.run(q).await
    }

    /// Upsert a person and attach extra labels in the same write.
    pub async fn create_user_with_tags(
        &self,
        user_id: &str,
        name: &str,
        tags: &[Tag],
    ) -> Result<(), GraphError> {
        let mut cypher = String::from("MERGE (u:User {userId: $user_id}) SET u.name = $name");
        for tag in tags {
            cypher.push_str(&format!(" SET u:{tag}"));
        }
        let q = query(&cypher).param("user_id", user_id).param("name", name);
        self.run(q).await
    }

    /// Upsert a company: a person carrying the `Company` label.
    pub async fn create_company(&self, user_id: &str, name: &str) -> Result<(), GraphError> {
        let q = query("MERGE (u:User:Company {userId: $user_id}) SET u.name = $name")
            .param("user_id", user_id)
            .param("name", name);
        self.run(q).await
    }

    /// Upsert a university: a person carrying the `University` label.
    pub async fn create_university(&self, user_id: &str, name: &str) -> Result<(), GraphError> {
        let q = query("MERGE (u:User:University {userId: $user_id}) SET u.name = $name")
            .param("user_id", user_id)
            .param("name", name);
        self.run(q).await
    }

    // ── Tags ─────────────────────────────────────────────────────

    /// Attach labels to an existing person. No-op if the person is missing.
    pub async fn add_tags(&self, user_id: &str, tags: &[Tag]) -> Result<(), GraphError> {
        if tags.is_empty() {
            return Ok(());
        }
        let mut cypher = String::from("MATCH (u:User {userId: $user_id})");
        for tag in tags {
            cypher.push_str(&format!(" SET u:{tag}"));
        }
        let q = query(&cypher).param("user_id", user_id);
        self.run(q).await
    }

    /// Remove labels from an existing person.
    pub async fn remove_tags(&self, user_id: &str, tags: &[Tag]) -> Result<(), GraphError> {
        if tags.is_empty() {
            return Ok(());
        }
        let mut cypher = String::from("MATCH (u:User {userId: $user_id})");
        for tag in tags {
            cypher.push_str(&format!(" REMOVE u:{tag}"));
        }
        let q = query(&cypher).param("user_id", user_id);
        self.run(q).await
    }

    // ── Connections ──────────────────────────────────────────────

    /// Merge an undirected typed connection between two existing persons.
    ///
    /// If either endpoint is missing the MATCH yields zero rows and nothing
    /// is created; the call still returns `Ok`.
    pub async fn create_connection(
        &self,
        user_id1: &str,
        user_id2: &str,
        kind: &str,
    ) -> Result<(), GraphError> {
        let q = query(
            "MATCH (u1:User {userId: $user_id1})
             MATCH (u2:User {userId: $user_id2})
             MERGE (u1)-[:CONNECTED_TO {type: $kind}]->(u2)",
        )
        .param("user_id1", user_id1)
        .param("user_id2", user_id2)
        .param("kind", kind);
        self.run(q).await
    }

    /// Delete every connection between the pair, regardless of the direction
    /// it was created in.
    pub async fn delete_connection(
        &self,
        user_id1: &str,
        user_id2: &str,
    ) -> Result<(), GraphError> {
        let q = query(
            "MATCH (:User {userId: $user_id1})-[c:CONNECTED_TO]-(:User {userId: $user_id2})
             DELETE c",
        )
        .param("user_id1", user_id1)
        .param("user_id2", user_id2);
        self.run(q).await
    }

    // ── Messaging ────────────────────────────────────────────────

    /// Create a message node bracketed by SENT/RECEIVED edges. Both persons
    /// must exist; otherwise nothing is created.
    pub async fn create_message(
        &self,
        sender_id: &str,
        receiver_id: &str,
        content: &str,
        timestamp: &NaiveDateTime,
    ) -> Result<(), GraphError> {
        let q = query(
            "MATCH (sender:User {userId: $sender_id})
             MATCH (receiver:User {userId: $receiver_id})
             CREATE (sender)-[:SENT]->(:Message {content: $content, timestamp: $timestamp})-[:RECEIVED]->(receiver)",
        )
        .param("sender_id", sender_id)
        .param("receiver_id", receiver_id)
        .param("content", content)
        .param("timestamp", format_timestamp(timestamp));
        self.run(q).await
    }

    // ── Posts ────────────────────────────────────────────────────

    /// Create a post owned by `user_id` and derive MENTIONED edges.
    ///
    /// The content is split on spaces inside the query; every `@`-prefixed
    /// token whose remainder resolves to an existing person gets a merged
    /// MENTIONED edge from the author. Unresolvable mentions are dropped
    /// without error, and the post is created either way.
    pub async fn create_post(
        &self,
        user_id: &str,
        title: &str,
        content: &str,
        timestamp: &NaiveDateTime,
    ) -> Result<(), GraphError> {
        let q = query(
            "MATCH (author:User {userId: $user_id})
             CREATE (author)-[:POSTED]->(:Post {title: $title, content: $content, timestamp: $timestamp})
             WITH author, split($content, ' ') AS words
             UNWIND words AS word
             WITH author, word
             WHERE word STARTS WITH '@'
             MATCH (mentioned:User {userId: substring(word, 1)})
             MERGE (author)-[:MENTIONED]->(mentioned)",
        )
        .param("user_id", user_id)
        .param("title", title)
        .param("content", content)
        .param("timestamp", format_timestamp(timestamp));
        self.run(q).await
    }

    // ── Deletion ─────────────────────────────────────────────────

    /// Wipe the whole graph.
    pub async fn delete_all(&self) -> Result<(), GraphError> {
        tracing::debug!("Deleting all graph content");
        self.run(query("MATCH (n) DETACH DELETE n")).await
    }

    /// Detach-delete a person and everything incident to them.
    pub async fn delete_user(&self, user_id: &str) -> Result<(), GraphError> {
        let q = query("MATCH (u:User {userId: $user_id}) DETACH DELETE u")
            .param("user_id", user_id);
        self.run(q).await
    }

    /// Detach-delete a company. Only matches nodes carrying both labels, so a
    /// plain person with the same id is untouched.
    pub async fn delete_company(&self, user_id: &str) -> Result<(), GraphError> {
        let q = query("MATCH (u:User:Company {userId: $user_id}) DETACH DELETE u")
            .param("user_id", user_id);
        self.run(q).await
    }

    /// Detach-delete a university.
    pub async fn delete_university(&self, user_id: &str) -> Result<(), GraphError> {
        let q = query("MATCH (u:User:University {userId: $user_id}) DETACH DELETE u")
            .param("user_id", user_id);
        self.run(q).await
    }

    /// Detach-delete a message by its internal graph id, taking the SENT and
    /// RECEIVED edges with it.
    pub async fn delete_message(&self, message_id: i64) -> Result<(), GraphError> {
        let q = query("MATCH (m:Message) WHERE id(m) = $message_id DETACH DELETE m")
            .param("message_id", message_id);
        self.run(q).await
    }

    // ── Bulk Operations ──────────────────────────────────────────

    /// Upsert multiple persons in a single transaction.
    pub async fn create_users(&self, users: &[(String, String)]) -> Result<(), GraphError> {
        let mut txn = self.start_txn().await?;
        for (user_id, name) in users {
            let q = query("MERGE (u:User {userId: $user_id}) SET u.name = $name")
                .param("user_id", user_id.as_str())
                .param("name", name.as_str());
            txn.run(q).await?;
        }
        txn.commit().await?;
        Ok(())
    }

    /// Upsert multiple companies in a single transaction.
    pub async fn create_companies(&self, companies: &[(String, String)]) -> Result<(), GraphError> {
        let mut txn = self.start_txn().await?;
        for (user_id, name) in companies {
            let q = query("MERGE (u:User:Company {userId: $user_id}) SET u.name = $name")
                .param("user_id", user_id.as_str())
                .param("name", name.as_str());
            txn.run(q).await?;
        }
        txn.commit().await?;
        Ok(())
    }

    /// Upsert multiple universities in a single transaction.
    pub async fn create_universities(
        &self,
        universities: &[(String, String)],
    ) -> Result<(), GraphError> {
        let mut txn = self.start_txn().await?;
        for (user_id, name) in universities {
            let q = query("MERGE (u:User:University {userId: $user_id}) SET u.name = $name")
                .param("user_id", user_id.as_str())
                .param("name", name.as_str());
            txn.run(q).await?;
        }
        txn.commit().await?;
        Ok(())
    }

    /// Merge multiple connections in a single transaction.
    /// Each element is `(user_id1, user_id2, kind)`.
    pub async fn create_connections(
        &self,
        connections: &[(String, String, String)],
    ) -> Result<(), GraphError> {
        let mut txn = self.start_txn().await?;
        for (user_id1, user_id2, kind) in connections {
            let q = query(
                "MATCH (u1:User {userId: $user_id1})
                 MATCH (u2:User {userId: $user_id2})
                 MERGE (u1)-[:CONNECTED_TO {type: $kind}]->(u2)",
            )
            .param("user_id1", user_id1.as_str())
            .param("user_id2", user_id2.as_str())
            .param("kind", kind.as_str());
            txn.run(q).await?;
        }
        txn.commit().await?;
        Ok(())
    }

    /// Create multiple messages in a single transaction.
    /// Each element is `(sender_id, receiver_id, content, timestamp)`.
    pub async fn create_messages(
        &self,
        messages: &[(String, String, String, NaiveDateTime)],
    ) -> Result<(), GraphError> {
        let mut txn = self.start_txn().await?;
        for (sender_id, receiver_id, content, timestamp) in messages {
            let q = query(
                "MATCH (sender:User {userId: $sender_id})
                 MATCH (receiver:User {userId: $receiver_id})
                 CREATE (sender)-[:SENT]->(:Message {content: $content, timestamp: $timestamp})-[:RECEIVED]->(receiver)",
            )
            .param("sender_id", sender_id.as_str())
            .param("receiver_id", receiver_id.as_str())
            .param("content", content.as_str())
            .param("timestamp", format_timestamp(timestamp));
            txn.run(q).await?;
        }
        txn.commit().await?;
        Ok(())
    }
}
