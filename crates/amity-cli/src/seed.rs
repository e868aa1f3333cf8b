//! Demo dataset: a small social network with organizations, connections,
//! messages, and a post with mentions.

use chrono::NaiveDateTime;

use amity_core::parse_timestamp;
use amity_graph::{GraphClient, GraphError};

fn pairs(data: &[(&str, &str)]) -> Vec<(String, String)> {
    data.iter()
        .map(|(id, name)| (id.to_string(), name.to_string()))
        .collect()
}

fn ts(raw: &str) -> NaiveDateTime {
    // Seed timestamps are literals; a parse failure is a bug in this file.
    parse_timestamp(raw).expect("seed timestamp literal")
}

pub async fn seed_demo_network(graph: &GraphClient) -> Result<(), GraphError> {
    graph
        .create_users(&pairs(&[
            ("user1", "John Smith"),
            ("user2", "Emily Davis"),
            ("user3", "Michael Johnson"),
            ("user4", "Sarah Brown"),
            ("user5", "Jessica Taylor"),
            ("user6", "David Wilson"),
            ("user7", "Robert Miller"),
            ("user8", "Laura Martinez"),
            ("user9", "Olivia Anderson"),
            ("user10", "James White"),
        ]))
        .await?;

    graph
        .create_universities(&pairs(&[
            ("uni1", "Harvard University"),
            ("uni2", "Stanford University"),
            ("uni3", "University of Oxford"),
            ("uni4", "University of Cambridge"),
            ("uni5", "MIT"),
            ("uni6", "University of California, Berkeley"),
        ]))
        .await?;

    graph
        .create_companies(&pairs(&[
            ("comp1", "Google"),
            ("comp2", "Apple"),
            ("comp3", "Microsoft"),
            ("comp4", "Amazon"),
            ("comp5", "Facebook"),
        ]))
        .await?;

    let connections: Vec<(String, String, String)> = [
        ("user1", "user2", "friend"),
        ("user2", "user3", "family"),
        ("user3", "user4", "friend"),
        ("user4", "user5", "family"),
        ("user5", "user6", "friend"),
        ("user6", "user7", "family"),
        ("user7", "user8", "friend"),
        ("user8", "user9", "family"),
        ("user9", "user10", "friend"),
        ("user1", "comp1", "work"),
        ("user2", "comp2", "work"),
        ("user3", "comp3", "work"),
        ("user4", "comp4", "work"),
        ("user5", "comp5", "work"),
        ("user1", "uni1", "academic"),
        ("user2", "uni2", "academic"),
        ("user3", "uni3", "academic"),
        ("user4", "uni4", "academic"),
        ("user5", "uni5", "academic"),
        ("user6", "uni6", "academic"),
    ]
    .iter()
    .map(|(a, b, kind)| (a.to_string(), b.to_string(), kind.to_string()))
    .collect();
    graph.create_connections(&connections).await?;

    let messages: Vec<(String, String, String, NaiveDateTime)> = [
        ("user1", "user2", "Hey, have you seen the latest news?", "2023-01-01T10:00:00"),
        ("user2", "user1", "No, what happened?", "2023-01-01T10:05:00"),
        ("user2", "user3", "We should catch up soon.", "2023-01-15T12:30:00"),
        ("user3", "user2", "Absolutely, let's plan something.", "2023-01-15T12:45:00"),
        ("user4", "user5", "How's your project going?", "2023-02-10T14:00:00"),
        ("user5", "user4", "Making good progress, thanks for asking!", "2023-02-10T14:10:00"),
    ]
    .iter()
    .map(|(s, r, c, t)| (s.to_string(), r.to_string(), c.to_string(), ts(t)))
    .collect();
    graph.create_messages(&messages).await?;

    graph
        .create_post(
            "user1",
            "Hello World",
            "Excited to connect with everyone! @user2 @user3",
            &ts("2023-01-02T15:30:00"),
        )
        .await?;

    Ok(())
}
