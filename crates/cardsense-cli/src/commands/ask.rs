//! Ask command - question answering over one statement.

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use cardsense_core::generation::GenerationBackend;
use cardsense_core::session::{InMemorySessionStore, SessionStore};
use cardsense_core::statement::Reconciler;

use super::{display_name, load_config, load_document};

/// Arguments for the ask command.
#[derive(Args)]
pub struct AskArgs {
    /// Statement file (PDF or plain text)
    input: PathBuf,

    /// Question about the statement
    question: String,

    /// Answer from pattern extraction alone instead of calling the service
    #[arg(long)]
    offline: bool,
}

pub async fn run(args: AskArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let document = load_document(&args.input, &config)?;

    let store = InMemorySessionStore::new();
    let id = store.insert(&display_name(&args.input), document);

    let backend = GenerationBackend::from_config(&config.generation, args.offline);
    let online = backend.is_enabled();
    let reconciler = Reconciler::with_config(backend, &config.extraction);
    let record = reconciler.reconcile_session(&store, id).await?;

    if !online {
        println!(
            "{} Generation service unavailable; showing the extracted record instead.",
            style("ℹ").blue()
        );
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    info!("Asking: {}", args.question);
    let answer = reconciler.ask(&store, id, &args.question).await?;
    println!("{}", answer);

    Ok(())
}
