//! CLI command definitions

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Parser, ValueEnum};
use lattice_domain::{ChatKind, ChatMetadata, ConversationContext, Query};
use std::path::PathBuf;

/// Output format for answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The composite answer exactly as a chat would show it
    Text,
    /// Colored per-capability sections with tier and status
    Sections,
    /// JSON with the routing decision and every section
    Json,
}

/// CLI arguments for lattice
#[derive(Parser, Debug)]
#[command(name = "lattice")]
#[command(author, version, about = "Financial assistant for personal and group chats")]
#[command(long_about = r#"
Lattice answers a chat message about money. The message is routed to one or
more capabilities (personal finance, credit advisory, group coordination,
conversation) which run concurrently; their answers are merged into one reply
in a fixed order. Every capability degrades to a deterministic answer when the
generative backend is slow or unavailable.

Configuration files are loaded from (in priority order):
1. LATTICE_* environment variables
2. --config <path>     Explicit config file
3. ./lattice.toml      Project-level config
4. ~/.config/lattice/config.toml   Global config

Example:
  lattice "Should I buy a new laptop this week?" --user u1
  lattice "Split $120 for dinner evenly" --group g1 --participants 3
  lattice --offline -o sections "Which card for groceries?"
"#)]
pub struct Cli {
    /// The message to answer (not required with --show-config)
    pub query: Option<String>,

    /// Id of the user sending the message (selects transaction history)
    #[arg(long, value_name = "ID")]
    pub user: Option<String>,

    /// Id of the chat (selects conversation history)
    #[arg(long, value_name = "ID")]
    pub chat: Option<String>,

    /// Id of the group the chat belongs to (selects the roster)
    #[arg(long, value_name = "ID")]
    pub group: Option<String>,

    /// Participant count declared by the chat
    #[arg(long, value_name = "N")]
    pub participants: Option<usize>,

    /// Display name of the sender
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Evaluate spending windows as of this date instead of now
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub today: Option<NaiveDate>,

    /// Root directory of the JSON record store (overrides [data] dir)
    #[arg(long, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Never call the generative backend
    #[arg(long)]
    pub offline: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Chat metadata described by the flags
    pub fn chat_metadata(&self) -> ChatMetadata {
        ChatMetadata {
            chat_id: self.chat.clone(),
            chat_type: if self.group.is_some() {
                ChatKind::Group
            } else {
                ChatKind::Direct
            },
            user_id: self.user.clone(),
            user_name: self.name.clone(),
            group_id: self.group.clone(),
            participant_count: self.participants,
            ..Default::default()
        }
    }

    /// Moment the query is evaluated at.
    ///
    /// `--today` pins the end of that day so the whole day's records count.
    pub fn issued_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self.today {
            Some(date) => {
                let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
                date.and_time(end_of_day).and_utc()
            }
            None => now,
        }
    }

    /// Build the query to answer; an absent message is the blank query
    pub fn to_query(&self, now: DateTime<Utc>) -> Query {
        Query::new(
            self.query.clone().unwrap_or_default(),
            ConversationContext::new(self.chat_metadata()),
            self.issued_at(now),
        )
    }
}
