//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use calgen_core::request::{
    DEFAULT_CALENDAR_ID, DEFAULT_END_TIME, DEFAULT_START_TIME, DEFAULT_TIMEZONE,
};

/// calgen - batch event creation for Google Calendar
#[derive(Debug, Parser)]
#[command(name = "calgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the OAuth client secrets JSON from the Google Cloud Console
    #[arg(
        long,
        default_value = "credentials.json",
        env = "CALGEN_CREDENTIALS_FILE",
        global = true
    )]
    pub credentials_file: PathBuf,

    /// Path where acquired tokens are cached between runs
    #[arg(
        long,
        default_value = "token.json",
        env = "CALGEN_TOKEN_FILE",
        global = true
    )]
    pub token_file: PathBuf,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a single calendar event
    Create(CreateArgs),

    /// Create events from a CSV file
    ///
    /// The CSV must contain Title, Date and Timezone columns; an optional
    /// Country column is accepted and ignored.
    FromSheet(FromSheetArgs),
}

/// Calendar selection flags shared by both commands.
#[derive(Debug, Args)]
pub struct CalendarOpts {
    /// Identifier of the calendar to create events in
    #[arg(long, default_value = DEFAULT_CALENDAR_ID)]
    pub calendar_id: String,

    /// List the calendars visible to the authenticated account instead of
    /// creating anything
    #[arg(long)]
    pub list_calendars: bool,
}

/// Flags for the `create` command.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Event title
    #[arg(long)]
    pub title: String,

    /// Event date in YYYY-MM-DD format
    #[arg(long)]
    pub date: String,

    /// Timezone (e.g. "America/New_York", "Europe/London")
    #[arg(long, default_value = DEFAULT_TIMEZONE)]
    pub timezone: String,

    /// Start time in HH:MM format (24-hour)
    #[arg(long, default_value = DEFAULT_START_TIME)]
    pub start_time: String,

    /// End time in HH:MM format (24-hour)
    #[arg(long, default_value = DEFAULT_END_TIME)]
    pub end_time: String,

    /// Comma-separated list of attendee email addresses
    #[arg(long)]
    pub attendees: Option<String>,

    #[command(flatten)]
    pub calendar: CalendarOpts,
}

/// Flags for the `from-sheet` command.
#[derive(Debug, Args)]
pub struct FromSheetArgs {
    /// Path to the CSV file containing event details
    pub file: PathBuf,

    /// Default timezone for rows whose Timezone cell is blank
    #[arg(long, default_value = DEFAULT_TIMEZONE)]
    pub timezone: String,

    #[command(flatten)]
    pub calendar: CalendarOpts,
}
