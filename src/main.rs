use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Args, Parser, Subcommand};

use thawscan::address::{derive, source};
use thawscan::{CancelToken, CheckEvent, CheckRun, Config, ResultState, ScheduleClient};

#[derive(Parser)]
#[command(name = "thawscan", about = "Bulk thaw-schedule checker", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check thaw schedules for a set of addresses
    Check(CheckArgs),
    /// Derive addresses from a seed phrase and print them as import JSON
    Derive(DeriveArgs),
}

#[derive(Args)]
#[command(group(ArgGroup::new("input").required(true)))]
struct CheckArgs {
    /// Single address to check
    #[arg(long, group = "input")]
    address: Option<String>,

    /// File with one `label,address` or bare address per line
    #[arg(long, group = "input")]
    file: Option<PathBuf>,

    /// JSON file in the derived-address import format
    #[arg(long, group = "input")]
    json: Option<PathBuf>,

    /// Seed phrase to derive addresses from
    #[arg(long, group = "input")]
    mnemonic: Option<String>,

    /// How many addresses to derive (with --mnemonic)
    #[arg(long, default_value_t = 20)]
    count: u32,

    /// Write a CSV export (one row per thaw) to this path
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write a JSON export (one object per address) to this path
    #[arg(long)]
    json_out: Option<PathBuf>,
}

#[derive(Args)]
struct DeriveArgs {
    /// Seed phrase
    #[arg(long)]
    mnemonic: String,

    /// How many addresses to derive
    #[arg(long, default_value_t = 20)]
    count: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    let cli = Cli::parse();

    match cli.command {
        Command::Check(args) => check(args, &config).await,
        Command::Derive(args) => {
            let derived = derive::derive_addresses(&args.mnemonic, args.count, &config)?;
            println!("{}", serde_json::to_string_pretty(&derived)?);
            Ok(())
        }
    }
}

async fn check(args: CheckArgs, config: &Config) -> anyhow::Result<()> {
    let entries = if let Some(address) = &args.address {
        source::single(address, config)?
    } else if let Some(path) = &args.file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        source::parse_bulk_text(&text, config)?
    } else if let Some(path) = &args.json {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        source::parse_json_import(&text, config)?
    } else if let Some(mnemonic) = &args.mnemonic {
        let derived = derive::derive_addresses(mnemonic, args.count, config)?;
        source::entries_from_derived(&derived)
    } else {
        unreachable!("clap enforces exactly one input source");
    };

    let cancel = CancelToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("Stop requested; finishing the in-flight request");
            signal_cancel.cancel();
        }
    });

    let client = ScheduleClient::new(config.api_url.clone());
    let mut run = CheckRun::new(entries);
    run.run(&client, &cancel, |event| {
        if let CheckEvent::AddressCompleted { result, .. } = event {
            match &result.state {
                ResultState::Fetched { schedule } => println!(
                    "{:<16} {}  {} thaws ({} claimed)",
                    result.label,
                    result.address,
                    schedule.thaws.len(),
                    schedule.claimed_count
                ),
                ResultState::Failed { error } => {
                    println!("{:<16} {}  error: {}", result.label, result.address, error)
                }
                _ => {}
            }
        }
    })
    .await;

    if let Some(info) = run.stopped_early() {
        println!(
            "Stopped early after {} of {} addresses ({} consecutive without thaws)",
            info.checked_count, info.total_count, info.consecutive_empty_threshold
        );
    }

    let skipped = run
        .results()
        .iter()
        .filter(|r| matches!(r.state, ResultState::Skipped))
        .count();
    if skipped > 0 {
        println!("{} addresses skipped", skipped);
    }

    if let Some(path) = &args.csv {
        thawscan::export::export_csv(run.results(), path)?;
    }
    if let Some(path) = &args.json_out {
        thawscan::export::export_json(run.results(), path)?;
    }

    Ok(())
}
