//! Integration tests for amity-graph against a live Neo4j instance.
//!
//! These tests require a local Neo4j (e.g. `docker compose up`).
//! Run with: cargo test --package amity-graph --test integration -- --ignored
//!
//! Skipped automatically if Neo4j is not available. Each test works inside
//! its own uuid-prefixed id namespace so runs do not interfere.

use chrono::{NaiveDate, NaiveDateTime};

use amity_core::Tag;
use amity_graph::{GraphClient, GraphConfig};

async fn connect_or_skip() -> Option<GraphClient> {
    let config = GraphConfig::default();
    match GraphClient::connect(&config).await {
        Ok(client) => Some(client),
        Err(e) => {
            eprintln!("Skipping integration test (Neo4j not available): {e}");
            None
        }
    }
}

/// Unique lowercase id namespace for one test run.
fn namespace() -> String {
    format!("t{}", uuid::Uuid::new_v4().simple())
}

fn uid(ns: &str, name: &str) -> String {
    format!("{ns}_{name}")
}

fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, s)
        .unwrap()
}

/// Remove everything created under a namespace: first the messages and posts
/// hanging off namespaced users, then the users themselves.
async fn cleanup(client: &GraphClient, ns: &str) {
    let q = neo4rs::query(
        "MATCH (u:User)-[:SENT|POSTED]->(x)
         WHERE u.userId STARTS WITH $ns
         DETACH DELETE x",
    )
    .param("ns", ns);
    let _ = client.inner().run(q).await;

    let q = neo4rs::query(
        "MATCH (u:User)
         WHERE u.userId STARTS WITH $ns
         DETACH DELETE u",
    )
    .param("ns", ns);
    let _ = client.inner().run(q).await;
}

async fn count_users(client: &GraphClient, ns: &str) -> i64 {
    let q = neo4rs::query(
        "MATCH (u:User) WHERE u.userId STARTS WITH $ns RETURN count(u) AS cnt",
    )
    .param("ns", ns);
    let mut stream = client.inner().execute(q).await.unwrap();
    let row = stream.next().await.unwrap().unwrap();
    row.get::<i64>("cnt").unwrap()
}

async fn count_mentions_from(client: &GraphClient, user_id: &str) -> i64 {
    let q = neo4rs::query(
        "MATCH (:User {userId: $id})-[m:MENTIONED]->() RETURN count(m) AS cnt",
    )
    .param("id", user_id);
    let mut stream = client.inner().execute(q).await.unwrap();
    let row = stream.next().await.unwrap().unwrap();
    row.get::<i64>("cnt").unwrap()
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn create_user_is_idempotent_and_latest_name_wins() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let ns = namespace();
    let alice = uid(&ns, "alice");

    client.create_user(&alice, "Alice").await.unwrap();
    client.create_user(&alice, "Alice Smith").await.unwrap();

    assert_eq!(count_users(&client, &ns).await, 1);

    // Read the name back through a neighborhood query.
    let bob = uid(&ns, "bob");
    client.create_user(&bob, "Bob").await.unwrap();
    client.create_connection(&alice, &bob, "friend").await.unwrap();
    let friends = client.friends_and_family(&bob).await.unwrap();
    assert_eq!(friends.len(), 1);
    assert_eq!(friends[0].name, "Alice Smith");

    cleanup(&client, &ns).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn deleting_nonexistent_identities_is_a_noop() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let ns = namespace();
    let alice = uid(&ns, "alice");
    client.create_user(&alice, "Alice").await.unwrap();

    client.delete_user(&uid(&ns, "ghost")).await.unwrap();
    client.delete_company(&uid(&ns, "ghost")).await.unwrap();
    client.delete_university(&uid(&ns, "ghost")).await.unwrap();
    client
        .delete_connection(&alice, &uid(&ns, "ghost"))
        .await
        .unwrap();

    assert_eq!(count_users(&client, &ns).await, 1);

    cleanup(&client, &ns).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn delete_company_leaves_plain_users_alone() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let ns = namespace();
    let alice = uid(&ns, "alice");
    let acme = uid(&ns, "acme");

    client.create_user(&alice, "Alice").await.unwrap();
    client.create_company(&acme, "Acme").await.unwrap();

    // Same id exists only as a plain user; the Company-labeled delete
    // must not match it.
    client.delete_company(&alice).await.unwrap();
    assert_eq!(count_users(&client, &ns).await, 2);

    client.delete_company(&acme).await.unwrap();
    assert_eq!(count_users(&client, &ns).await, 1);

    cleanup(&client, &ns).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn friends_and_family_is_symmetric() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let ns = namespace();
    let alice = uid(&ns, "alice");
    let bob = uid(&ns, "bob");

    client.create_user(&alice, "Alice").await.unwrap();
    client.create_user(&bob, "Bob").await.unwrap();
    client.create_connection(&alice, &bob, "work").await.unwrap();

    let of_alice = client.friends_and_family(&alice).await.unwrap();
    let of_bob = client.friends_and_family(&bob).await.unwrap();
    assert!(of_alice.iter().any(|p| p.user_id == bob));
    assert!(of_bob.iter().any(|p| p.user_id == alice));

    cleanup(&client, &ns).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn connection_with_missing_endpoint_creates_nothing() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let ns = namespace();
    let alice = uid(&ns, "alice");
    client.create_user(&alice, "Alice").await.unwrap();

    // Zero rows matched, no edge, still Ok.
    client
        .create_connection(&alice, &uid(&ns, "ghost"), "friend")
        .await
        .unwrap();

    assert!(client.friends_and_family(&alice).await.unwrap().is_empty());

    cleanup(&client, &ns).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn delete_connection_ignores_direction() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let ns = namespace();
    let alice = uid(&ns, "alice");
    let bob = uid(&ns, "bob");

    client.create_user(&alice, "Alice").await.unwrap();
    client.create_user(&bob, "Bob").await.unwrap();
    client.create_connection(&alice, &bob, "friend").await.unwrap();

    // Created alice->bob, deleted as (bob, alice).
    client.delete_connection(&bob, &alice).await.unwrap();
    assert!(client.friends_and_family(&alice).await.unwrap().is_empty());

    cleanup(&client, &ns).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn family_of_family_follows_two_family_hops() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let ns = namespace();
    let a = uid(&ns, "a");
    let b = uid(&ns, "b");
    let c = uid(&ns, "c");
    let d = uid(&ns, "d");

    for (id, name) in [(&a, "A"), (&b, "B"), (&c, "C"), (&d, "D")] {
        client.create_user(id, name).await.unwrap();
    }
    client.create_connection(&a, &b, "family").await.unwrap();
    client.create_connection(&b, &c, "family").await.unwrap();
    // A friend edge must not count as a family hop.
    client.create_connection(&b, &d, "friend").await.unwrap();

    let result = client.family_of_family(&a).await.unwrap();
    assert!(result.iter().any(|p| p.user_id == c));
    assert!(result.iter().all(|p| p.user_id != d));

    cleanup(&client, &ns).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn messages_after_date_is_strict_and_ascending() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let ns = namespace();
    let alice = uid(&ns, "alice");
    let bob = uid(&ns, "bob");

    client.create_user(&alice, "Alice").await.unwrap();
    client.create_user(&bob, "Bob").await.unwrap();

    client
        .create_message(&alice, &bob, "old", &ts(2022, 12, 31, 23, 59, 59))
        .await
        .unwrap();
    client
        .create_message(&alice, &bob, "second", &ts(2023, 1, 2, 9, 0, 0))
        .await
        .unwrap();
    client
        .create_message(&alice, &bob, "first", &ts(2023, 1, 1, 10, 0, 0))
        .await
        .unwrap();
    // Wrong direction, must not appear.
    client
        .create_message(&bob, &alice, "reply", &ts(2023, 1, 3, 8, 0, 0))
        .await
        .unwrap();

    let messages = client
        .messages_after_date(&alice, &bob, &ts(2023, 1, 1, 0, 0, 0))
        .await
        .unwrap();

    let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["first", "second"]);

    cleanup(&client, &ns).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn full_conversation_unions_both_directions_in_order() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let ns = namespace();
    let alice = uid(&ns, "alice");
    let bob = uid(&ns, "bob");

    client.create_user(&alice, "Alice").await.unwrap();
    client.create_user(&bob, "Bob").await.unwrap();

    client
        .create_message(&alice, &bob, "hey", &ts(2023, 1, 1, 10, 0, 0))
        .await
        .unwrap();
    client
        .create_message(&bob, &alice, "hi back", &ts(2023, 1, 1, 10, 5, 0))
        .await
        .unwrap();
    client
        .create_message(&alice, &bob, "lunch?", &ts(2023, 1, 1, 10, 10, 0))
        .await
        .unwrap();

    let convo = client.full_conversation(&alice, &bob).await.unwrap();
    assert_eq!(convo.len(), 3);
    assert_eq!(convo[0].content, "hey");
    assert_eq!(convo[0].sender_id, alice);
    assert_eq!(convo[1].content, "hi back");
    assert_eq!(convo[1].sender_id, bob);
    assert_eq!(convo[2].content, "lunch?");

    cleanup(&client, &ns).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn post_mentions_resolve_known_users_only() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let ns = namespace();
    let alice = uid(&ns, "alice");
    let bob = uid(&ns, "bob");

    client.create_user(&alice, "Alice").await.unwrap();
    client.create_user(&bob, "Bob").await.unwrap();

    let content = format!("Hi @{bob} @nobody");
    client
        .create_post(&alice, "hello", &content, &ts(2023, 1, 2, 15, 30, 0))
        .await
        .unwrap();

    // Exactly one MENTIONED edge; @nobody resolves to no one.
    assert_eq!(count_mentions_from(&client, &alice).await, 1);

    let mentioned = client
        .users_mentioned_with_work_relation(&alice)
        .await
        .unwrap();
    assert_eq!(mentioned.len(), 1);
    assert_eq!(mentioned[0].user_id, bob);

    let posts = client.posts_by(&alice).await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "hello");
    assert_eq!(posts[0].timestamp, ts(2023, 1, 2, 15, 30, 0));

    cleanup(&client, &ns).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn hop_discovery_skips_direct_connections_and_bounds_hops() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let ns = namespace();
    let u1 = uid(&ns, "u1");
    let u2 = uid(&ns, "u2");
    let u3 = uid(&ns, "u3");
    let u4 = uid(&ns, "u4");

    for (id, name) in [(&u1, "U1"), (&u2, "U2"), (&u3, "U3"), (&u4, "U4")] {
        client.create_user(id, name).await.unwrap();
    }
    client.create_connection(&u1, &u2, "friend").await.unwrap();
    client.create_connection(&u2, &u3, "friend").await.unwrap();
    client.create_connection(&u3, &u4, "friend").await.unwrap();

    let suggestions = client.find_connections_by_hops(&u1, 3).await.unwrap();

    assert!(suggestions.iter().all(|s| s.hops <= 3));
    assert!(suggestions.iter().all(|s| s.person.user_id != u2));
    assert!(suggestions.iter().any(|s| s.person.user_id == u3));
    assert!(suggestions.iter().any(|s| s.person.user_id == u4));
    // Ascending by hop count.
    assert!(suggestions.windows(2).all(|w| w[0].hops <= w[1].hops));

    cleanup(&client, &ns).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn message_discovery_respects_threshold() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let ns = namespace();
    let origin = uid(&ns, "origin");
    let m1 = uid(&ns, "m1");
    let m2 = uid(&ns, "m2");
    let candidate = uid(&ns, "candidate");

    for (id, name) in [
        (&origin, "Origin"),
        (&m1, "M1"),
        (&m2, "M2"),
        (&candidate, "Candidate"),
    ] {
        client.create_user(id, name).await.unwrap();
    }
    client.create_connection(&origin, &m1, "friend").await.unwrap();
    client.create_connection(&origin, &m2, "friend").await.unwrap();

    client
        .create_message(&m1, &candidate, "hello", &ts(2023, 3, 1, 9, 0, 0))
        .await
        .unwrap();
    client
        .create_message(&m2, &candidate, "hello too", &ts(2023, 3, 1, 9, 5, 0))
        .await
        .unwrap();

    let found = client.find_connections_by_messages(&origin, 2).await.unwrap();
    assert!(found
        .iter()
        .any(|s| s.person.user_id == candidate && s.messenger_count == 2));
    assert!(found.iter().all(|s| s.messenger_count >= 2));

    let none = client.find_connections_by_messages(&origin, 3).await.unwrap();
    assert!(none.iter().all(|s| s.person.user_id != candidate));

    cleanup(&client, &ns).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn tags_round_trip_through_labels() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let ns = namespace();
    let alice = uid(&ns, "alice");
    // Unique label so parallel runs cannot collide.
    let tag = Tag::new(format!("Tag{}", uuid::Uuid::new_v4().simple())).unwrap();

    client
        .create_user_with_tags(&alice, "Alice", std::slice::from_ref(&tag))
        .await
        .unwrap();

    let tagged = client.users_by_tag(&tag).await.unwrap();
    assert_eq!(tagged.len(), 1);
    assert_eq!(tagged[0].user_id, alice);
    assert!(tagged[0].tags.iter().any(|t| t == tag.as_str()));

    client
        .remove_tags(&alice, std::slice::from_ref(&tag))
        .await
        .unwrap();
    assert!(client.users_by_tag(&tag).await.unwrap().is_empty());

    cleanup(&client, &ns).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn end_to_end_three_user_scenario() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let ns = namespace();
    let u1 = uid(&ns, "user1");
    let u2 = uid(&ns, "user2");
    let u3 = uid(&ns, "user3");

    client
        .create_users(&[
            (u1.clone(), "John Smith".to_string()),
            (u2.clone(), "Emily Davis".to_string()),
            (u3.clone(), "Michael Johnson".to_string()),
        ])
        .await
        .unwrap();
    client
        .create_connections(&[
            (u1.clone(), u2.clone(), "friend".to_string()),
            (u2.clone(), u3.clone(), "family".to_string()),
        ])
        .await
        .unwrap();

    let friends = client.friends_and_family(&u1).await.unwrap();
    assert_eq!(friends.len(), 1);
    assert_eq!(friends[0].user_id, u2);

    // user1 has no family edge at all, so two family hops reach nothing.
    assert!(client.family_of_family(&u1).await.unwrap().is_empty());

    cleanup(&client, &ns).await;
}
