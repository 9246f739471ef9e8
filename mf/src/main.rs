//! mf - mindful journaling backend CLI
//!
//! Runs the HTTP API or drives the store and synthesis pipeline directly.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use mindful::GenerationClient;
use mindful::Synthesizer;
use mindful::cli::{Cli, Command, EmotionCommand, JournalCommand, TranscriptCommand};
use mindful::config::Config;
use mindful::llm::create_client;
use mindful::serve::{AppState, start_server};
use mindstore::{
    CorpusStore, EmotionRecord, EmotionStore, GamePlanRecord, GamePlanStore, JournalRecord, SqliteStore, Store,
    TranscriptRecord,
};

fn setup_logging(verbose: bool, to_stderr: bool) -> Result<()> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    // The server logs to the terminal; everything else keeps stdout clean
    if to_stderr {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .init();
    } else {
        let log_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mindful")
            .join("logs");
        fs::create_dir_all(&log_dir).context("Failed to create log directory")?;
        let log_file = fs::File::create(log_dir.join("mindful.log")).context("Failed to create log file")?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_ansi(false)
            .with_env_filter(filter)
            .init();
    }

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

fn synthesizer(config: &Config, store: &Arc<SqliteStore>) -> Result<Synthesizer> {
    let llm = create_client(&config.llm).context("Failed to create LLM client")?;
    let generator = GenerationClient::from_config(&config.llm, llm);
    Ok(Synthesizer::new(store.clone(), store.clone(), generator))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).context("Failed to serialize output")?);
    Ok(())
}

fn format_time(ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ms)
        .map(|t| t.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ms.to_string())
}

fn print_plan(record: &GamePlanRecord) {
    println!(
        "{} {} {}",
        format!("#{}", record.id).yellow(),
        format_time(record.created_at).dimmed(),
        record.plan.emotional_state.to_string().magenta()
    );
    println!("  {}", record.plan.summary);
    for (i, task) in record.plan.tasks.iter().enumerate() {
        println!("  {}. {}", i + 1, task);
    }
}

fn print_transcripts(records: &[TranscriptRecord]) {
    for t in records {
        println!(
            "{} {} {}",
            format!("#{}", t.id).yellow(),
            t.session_id.cyan(),
            format_time(t.created_at).dimmed()
        );
        println!("  {}", t.text);
    }
}

fn print_journals(records: &[JournalRecord]) {
    for j in records {
        println!("{} {}", format!("#{}", j.id).yellow(), format_time(j.created_at).dimmed());
        println!("  {}", j.text);
    }
}

fn print_emotions(records: &[EmotionRecord]) {
    for e in records {
        println!("{} {}", e.date.cyan(), e.emotion);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.command.is_serve()).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(db) = cli.db {
        debug!(db = %db.display(), "main: overriding db path");
        config.storage.db_path = db;
    }

    let store = Arc::new(
        SqliteStore::open(&config.storage.db_path)
            .context(format!("Failed to open database {}", config.storage.db_path.display()))?,
    );

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Command::Serve { bind } => {
            config.validate()?;
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            let state = AppState::new(store.clone(), synthesizer(&config, &store)?);
            start_server(&bind, state).await?;
        }
        Command::Analyze { json } => {
            let record = synthesizer(&config, &store)?
                .synthesize()
                .await
                .context("Game plan synthesis failed")?;
            if json {
                print_json(&record)?;
            } else {
                println!("{} Game plan created", "✓".green());
                print_plan(&record);
            }
        }
        Command::Gameplans { json } => {
            let plans = store.list_all()?;
            if json {
                print_json(&plans)?;
            } else if plans.is_empty() {
                println!("{}", "No game plans yet".dimmed());
            } else {
                for plan in &plans {
                    print_plan(plan);
                }
            }
        }
        Command::Transcript { command } => match command {
            TranscriptCommand::Add { session_id, text } => {
                let record = store.add_transcript(&session_id, &text)?;
                println!("{} Stored transcript {}", "✓".green(), format!("#{}", record.id).yellow());
            }
            TranscriptCommand::List { json } => {
                let records = store.fetch_transcripts()?;
                if json {
                    print_json(&records)?;
                } else {
                    print_transcripts(&records);
                }
            }
            TranscriptCommand::Show { session_id, json } => {
                let records = store.transcripts_by_session(&session_id)?;
                if records.is_empty() {
                    return Err(eyre::eyre!("No transcripts for session '{}'", session_id));
                }
                if json {
                    print_json(&records)?;
                } else {
                    print_transcripts(&records);
                }
            }
        },
        Command::Journal { command } => match command {
            JournalCommand::Add { text } => {
                let record = store.add_journal(&text)?;
                println!("{} Stored journal entry {}", "✓".green(), format!("#{}", record.id).yellow());
            }
            JournalCommand::List { json } => {
                let records = store.fetch_journals()?;
                if json {
                    print_json(&records)?;
                } else {
                    print_journals(&records);
                }
            }
        },
        Command::Emotion { command } => match command {
            EmotionCommand::Add { date, emotion } => {
                let date = date.unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());
                let record = store.add_emotion(&date, &emotion)?;
                println!("{} Logged {} for {}", "✓".green(), record.emotion, record.date.cyan());
            }
            EmotionCommand::List { json } => {
                let records = store.list_emotions()?;
                if json {
                    print_json(&records)?;
                } else {
                    print_emotions(&records);
                }
            }
        },
        Command::Clear { yes } => {
            if !yes {
                return Err(eyre::eyre!("Refusing to clear the database without --yes"));
            }
            store.clear()?;
            println!("{} Database cleared", "✓".green());
        }
    }

    Ok(())
}
