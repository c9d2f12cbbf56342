//! Process command - extract data from a single statement file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use cardsense_core::generation::GenerationBackend;
use cardsense_core::models::statement::CanonicalRecord;
use cardsense_core::session::{InMemorySessionStore, SessionStore};
use cardsense_core::statement::Reconciler;

use super::{display_name, load_config, load_document};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Skip the generation service and use pattern extraction only
    #[arg(long)]
    offline: bool,

    /// Print the extracted source text to stderr
    #[arg(long)]
    show_text: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);

    pb.set_message("Extracting text...");
    let document = load_document(&args.input, &config)?;
    if args.show_text {
        pb.suspend(|| eprintln!("{}", document.text));
    }

    let store = InMemorySessionStore::new();
    let id = store.insert(&display_name(&args.input), document);

    pb.set_message("Reconciling fields...");
    let backend = GenerationBackend::from_config(&config.generation, args.offline);
    let reconciler = Reconciler::with_config(backend, &config.extraction);
    let record = reconciler.reconcile_session(&store, id).await?;

    pb.finish_and_clear();

    let output = format_record(&record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_record(record: &CanonicalRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn opt<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

/// Header of the one-row record CSV; also used by the batch summary.
pub const CSV_HEADER: [&str; 13] = [
    "customer_name",
    "statement_date",
    "payment_due_date",
    "total_amount_due",
    "minimum_amount_due",
    "credit_limit",
    "available_credit_limit",
    "card_number",
    "bank_name",
    "transactions",
    "reward_opening_balance",
    "reward_earned",
    "reward_closing_balance",
];

/// One CSV row for a record, matching [`CSV_HEADER`].
pub fn csv_row(record: &CanonicalRecord) -> [String; 13] {
    let rewards = &record.reward_points_summary;
    [
        opt(&record.customer_name),
        opt(&record.statement_date),
        opt(&record.payment_due_date),
        opt(&record.total_amount_due),
        opt(&record.minimum_amount_due),
        opt(&record.credit_limit),
        opt(&record.available_credit_limit),
        opt(&record.card_number),
        opt(&record.bank_name),
        record.transactions.len().to_string(),
        opt(&rewards.opening_balance),
        opt(&rewards.earned),
        opt(&rewards.closing_balance),
    ]
}

fn format_csv(record: &CanonicalRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(CSV_HEADER)?;
    wtr.write_record(csv_row(record))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &CanonicalRecord) -> String {
    let field = |value: String| if value.is_empty() { "-".to_string() } else { value };
    let mut output = String::new();

    output.push_str(&format!("Customer: {}\n", field(opt(&record.customer_name))));
    output.push_str(&format!("Bank:     {}\n", field(opt(&record.bank_name))));
    output.push_str(&format!("Card:     {}\n", field(opt(&record.card_number))));
    output.push('\n');

    output.push_str(&format!("Statement date: {}\n", field(opt(&record.statement_date))));
    output.push_str(&format!("Payment due:    {}\n", field(opt(&record.payment_due_date))));
    output.push('\n');

    output.push_str("Amounts:\n");
    output.push_str(&format!("  Total due:        {}\n", field(opt(&record.total_amount_due))));
    output.push_str(&format!("  Minimum due:      {}\n", field(opt(&record.minimum_amount_due))));
    output.push_str(&format!("  Credit limit:     {}\n", field(opt(&record.credit_limit))));
    output.push_str(&format!("  Available credit: {}\n", field(opt(&record.available_credit_limit))));
    output.push('\n');

    let rewards = &record.reward_points_summary;
    output.push_str("Reward points:\n");
    output.push_str(&format!("  Opening: {}\n", field(opt(&rewards.opening_balance))));
    output.push_str(&format!("  Earned:  {}\n", field(opt(&rewards.earned))));
    output.push_str(&format!("  Closing: {}\n", field(opt(&rewards.closing_balance))));

    if !record.transactions.is_empty() {
        output.push_str(&format!("\nTransactions ({}):\n", record.transactions.len()));
        for tx in &record.transactions {
            output.push_str(&format!("  {}  {:<40} {:>12}\n", tx.date, tx.description, tx.amount));
        }
    }

    let (filled, total) = record.coverage();
    output.push_str(&format!("\nFields found: {}/{}\n", filled, total));

    output
}
