//! CLI argument parsing for mindful

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mf")]
#[command(author, version, about = "Wellness journaling backend with AI game plans", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the database path from config
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Log at DEBUG instead of INFO
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API
    Serve {
        /// Address to listen on (default from config)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Synthesize a game plan from everything stored so far
    Analyze {
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// List prior game plans, newest first
    Gameplans {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Voice-session transcripts
    Transcript {
        #[command(subcommand)]
        command: TranscriptCommand,
    },

    /// Journal entries
    Journal {
        #[command(subcommand)]
        command: JournalCommand,
    },

    /// Mood log
    Emotion {
        #[command(subcommand)]
        command: EmotionCommand,
    },

    /// Delete every transcript, journal entry, game plan and mood entry
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum TranscriptCommand {
    /// Store a transcript
    Add {
        /// Voice session id
        #[arg(required = true)]
        session_id: String,

        /// Transcript text
        #[arg(required = true)]
        text: String,
    },

    /// List all transcripts
    List {
        #[arg(long)]
        json: bool,
    },

    /// Show transcripts for one session
    Show {
        #[arg(required = true)]
        session_id: String,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum JournalCommand {
    /// Store a journal entry
    Add {
        /// Entry text
        #[arg(required = true)]
        text: String,
    },

    /// List all journal entries
    List {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum EmotionCommand {
    /// Log a mood entry
    Add {
        /// Calendar date (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Emotion label
        #[arg(required = true)]
        emotion: String,
    },

    /// List the mood log
    List {
        #[arg(long)]
        json: bool,
    },
}

impl Command {
    /// Whether this command runs the long-lived server
    pub fn is_serve(&self) -> bool {
        matches!(self, Command::Serve { .. })
    }
}
