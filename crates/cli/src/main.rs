//! `support-triage` CLI entry-point.
//!
//! Available sub-commands:
//! - `run`     — route one query through the triage pipeline.
//! - `check`   — assemble the pipeline and print its wiring.
//! - `migrate` — run pending database migrations.
//! - `recent`  — list recently recorded interactions.

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use engine::{triage_graph, Executor};
use llm::{ChatConfig, ChatModel, LlmClassifier, LlmGenerator};
use nodes::heuristics::{RuleClassifier, TemplateGenerator};
use nodes::{Classifier, Generator, Store, TicketState};
use store::MemoryStore;

#[derive(Parser)]
#[command(
    name = "support-triage",
    about = "Query triage over a step graph: classify, branch, answer, record",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Route a single query through the pipeline and print the outcome.
    Run {
        /// The customer query to triage.
        query: String,
        /// Answer with the configured chat model instead of the offline rules.
        #[arg(long)]
        live: bool,
        /// Record the interaction in Postgres instead of memory.
        #[arg(long, env = "DATABASE_URL")]
        database_url: Option<String>,
    },
    /// Assemble the pipeline and print its wiring.
    Check,
    /// Run pending database migrations.
    Migrate {
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,
    },
    /// List the most recently recorded interactions.
    Recent {
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,
        #[arg(long, default_value_t = 10)]
        limit: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            query,
            live,
            database_url,
        } => {
            let (classifier, generator): (Arc<dyn Classifier>, Arc<dyn Generator>) = if live {
                let model = Arc::new(ChatModel::new(ChatConfig::from_env()));
                (
                    Arc::new(LlmClassifier::new(model.clone())),
                    Arc::new(LlmGenerator::new(model)),
                )
            } else {
                (Arc::new(RuleClassifier), Arc::new(TemplateGenerator))
            };

            let store: Arc<dyn Store> = match database_url {
                Some(url) => {
                    let pool = store::create_pool(&url, 5)
                        .await
                        .context("failed to connect to database")?;
                    Arc::new(store::PgStore::new(pool))
                }
                None => Arc::new(MemoryStore::new()),
            };

            let graph = triage_graph(classifier, generator, store)?;
            let result = Executor::default()
                .run(&graph, TicketState::new(query))
                .await?;

            println!("run        {}", result.run_id);
            println!("category   {}", result.state.category);
            println!("sentiment  {}", result.state.sentiment);
            println!("response   {}", result.state.response.unwrap_or_default());
            for warning in &result.warnings {
                eprintln!("warning: {warning}");
            }
        }

        Command::Check => {
            let graph = triage_graph(
                Arc::new(RuleClassifier),
                Arc::new(TemplateGenerator),
                Arc::new(MemoryStore::new()),
            )?;
            println!("entry: {}", graph.entry());
            for line in graph.describe() {
                println!("{line}");
            }
        }

        Command::Migrate { database_url } => {
            let pool = store::create_pool(&database_url, 2)
                .await
                .context("failed to connect to database")?;
            store::run_migrations(&pool)
                .await
                .context("migration failed")?;
            info!("Migrations applied successfully");
        }

        Command::Recent {
            database_url,
            limit,
        } => {
            let pool = store::create_pool(&database_url, 2)
                .await
                .context("failed to connect to database")?;
            for row in store::list_recent(&pool, limit).await? {
                println!(
                    "{}  [{}/{}]  {}",
                    row.created_at.format("%Y-%m-%d %H:%M:%S"),
                    row.category,
                    row.sentiment,
                    row.query
                );
            }
        }
    }

    Ok(())
}
