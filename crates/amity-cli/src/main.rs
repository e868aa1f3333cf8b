//! CLI entry point for the Amity social graph.
//!
//! Thin wrapper over amity-graph: seeds a demo network and exposes the
//! discovery queries for ad-hoc inspection. Results are printed as JSON.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use amity_graph::{GraphClient, GraphConfig};

mod seed;

#[derive(Parser)]
#[command(name = "amity")]
#[command(about = "Neo4j-backed social graph access layer")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file prefix (default: amity).
    #[arg(short, long, default_value = "amity", global = true)]
    config: String,
}

#[derive(Subcommand)]
enum Command {
    /// Populate the database with the demo social network.
    Seed,
    /// Delete all graph content.
    Wipe,
    /// List everyone directly connected to a person.
    Friends {
        user_id: String,
    },
    /// List persons two family hops away from a person.
    FamilyOfFamily {
        user_id: String,
    },
    /// Print the full conversation between two persons, oldest first.
    Conversation {
        user_id1: String,
        user_id2: String,
    },
    /// Suggest connections reachable through intermediates.
    SuggestHops {
        user_id: String,
        /// Maximum path length to the intermediate person.
        #[arg(long, default_value_t = 3)]
        max_hops: u32,
    },
    /// Suggest connections by inbound message volume.
    SuggestMessages {
        user_id: String,
        /// Minimum number of distinct messengers from the origin's network.
        #[arg(long, default_value_t = 2)]
        min_messages: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let graph_config = load_graph_config(&cli.config);
    let graph = GraphClient::connect(&graph_config).await?;

    match cli.command {
        Command::Seed => {
            seed::seed_demo_network(&graph).await?;
            tracing::info!("Demo network seeded");
        }
        Command::Wipe => {
            graph.delete_all().await?;
            tracing::info!("Graph wiped");
        }
        Command::Friends { ref user_id } => {
            let result = graph.friends_and_family(user_id).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::FamilyOfFamily { ref user_id } => {
            let result = graph.family_of_family(user_id).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Conversation {
            ref user_id1,
            ref user_id2,
        } => {
            let result = graph.full_conversation(user_id1, user_id2).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::SuggestHops {
            ref user_id,
            max_hops,
        } => {
            let result = graph.find_connections_by_hops(user_id, max_hops).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::SuggestMessages {
            ref user_id,
            min_messages,
        } => {
            let result = graph
                .find_connections_by_messages(user_id, min_messages)
                .await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}

fn load_graph_config(file_prefix: &str) -> GraphConfig {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix("AMITY")
                .separator("__")
                .try_parsing(true),
        )
        .build();

    match cfg {
        Ok(c) => GraphConfig {
            uri: c
                .get_string("neo4j.uri")
                .unwrap_or_else(|_| "bolt://localhost:7687".to_string()),
            user: c
                .get_string("neo4j.user")
                .unwrap_or_else(|_| "neo4j".to_string()),
            password: c
                .get_string("neo4j.password")
                .unwrap_or_else(|_| "amity-dev".to_string()),
            ..Default::default()
        },
        Err(_) => GraphConfig::default(),
    }
}
