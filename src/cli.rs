//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::i18n::Language;
use crate::models::{Category, Reaction, ResponseId};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// YoSurvey - local survey form with a stats dashboard
///
/// Collect feedback responses, react to them with emoji, export them as
/// JSON and look at the aggregate dashboard. Everything stays in a local
/// JSON store.
///
/// Examples:
///   yosurvey submit --name Ada --age 36 --satisfaction 4 --favorite performance
///   yosurvey submit --other "Dark mode" --notes "Love it"
///   yosurvey react 1748000000000 love
///   yosurvey stats --format json
///   yosurvey --lang es list
///   yosurvey --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path of the JSON store file
    ///
    /// Defaults to the platform data directory, or the path in .yosurvey.toml.
    #[arg(short, long, value_name = "FILE", env = "YOSURVEY_STORE", global = true)]
    pub store: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .yosurvey.toml in the current directory
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Interface language for this run (does not change the saved preference)
    #[arg(short, long, value_name = "LANG", global = true)]
    pub lang: Option<Language>,

    /// Answer "yes" to confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Generate a default .yosurvey.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Survey operations.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Submit a survey response
    Submit {
        /// Name or alias (blank submits as anonymous)
        #[arg(short, long, default_value = "")]
        name: String,

        /// Age, 0-120 (optional)
        #[arg(short, long, default_value = "")]
        age: String,

        /// Satisfaction from 1 (very bad) to 5 (excellent)
        #[arg(long, value_name = "1-5")]
        satisfaction: Option<u8>,

        /// What you liked most
        #[arg(short, long, value_name = "CATEGORY", conflicts_with = "other")]
        favorite: Option<Category>,

        /// Something else you liked most, in your own words
        #[arg(short, long, value_name = "TEXT")]
        other: Option<String>,

        /// Free-text comment (max 500 characters)
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// List stored responses, newest first
    List {
        /// Show at most this many responses
        #[arg(long, value_name = "COUNT")]
        limit: Option<usize>,
    },

    /// Toggle an emoji reaction on a response
    React {
        /// Response id
        id: ResponseId,

        /// 👍 ❤️ 👏 🎉, or like, love, clap, party
        reaction: Reaction,
    },

    /// Delete one response
    Delete {
        /// Response id
        id: ResponseId,
    },

    /// Delete every response
    Clear,

    /// Export all responses as pretty JSON
    Export {
        /// Output file (default: survey-responses.json)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Replace all responses with a previously exported file
    Import {
        /// Exported JSON file
        path: PathBuf,
    },

    /// Show the statistics dashboard
    Stats {
        /// Output format
        #[arg(long, default_value = "text", value_name = "FORMAT")]
        format: StatsFormat,
    },

    /// Write the dashboard as a Markdown report
    Report {
        /// Output file for the report
        #[arg(short, long, default_value = "survey-dashboard.md", value_name = "FILE")]
        output: PathBuf,
    },

    /// Show or change the color theme
    Theme {
        /// New theme; omit to show the current one
        mode: Option<ThemeChoice>,
    },

    /// Show or change the saved interface language
    Lang {
        /// New language; omit to show the current one
        language: Option<Language>,
    },
}

/// Output format for `stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum StatsFormat {
    /// Stat cards and charts (default)
    #[default]
    Text,
    /// Statistics as JSON
    Json,
}

/// Theme change requested by `theme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ThemeChoice {
    Light,
    Dark,
    Toggle,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.command.is_none() {
            return Err("A command is required (try --help)".to_string());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(Command::List { limit: Some(0) }) = self.command {
            return Err("List limit must be at least 1".to_string());
        }

        if let Some(Command::Import { ref path }) = self.command {
            if !path.is_file() {
                return Err(format!("Import file does not exist: {}", path.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self, verbose_by_default: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || verbose_by_default {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
