//! Command-line definition for `tresso`

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Tresso - kanban boards in a SQLite file
#[derive(Parser, Debug)]
#[command(name = "tresso")]
#[command(version)]
#[command(about = "Kanban boards in a SQLite file")]
#[command(long_about = "
Manage boards, columns, cards and labels stored in a local SQLite database.

Configuration is read from ~/.tresso/tresso.toml, ./.tresso/tresso.toml and
TRESSO_ environment variables (TRESSO_DATABASE__PATH=/tmp/board.db).

Examples:
  tresso board create Launch
  tresso column add 1 \"To Do\"
  tresso card add 1 1 \"Write the announcement\"
  tresso card move 3 --after 1
  tresso board show 1
")]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum, global = true, default_value_t)]
    pub format: OutputFormat,

    /// Database file, overriding the configured path
    #[arg(long, global = true, value_name = "PATH")]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create, list, show, rename and delete boards
    Board {
        #[command(subcommand)]
        action: BoardAction,
    },
    /// Manage the columns of a board
    Column {
        #[command(subcommand)]
        action: ColumnAction,
    },
    /// Manage cards
    Card {
        #[command(subcommand)]
        action: CardAction,
    },
    /// Manage labels and their attachment to cards
    Label {
        #[command(subcommand)]
        action: LabelAction,
    },
    /// Show recent operations, newest first
    Activity {
        /// Number of entries to show
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
}

#[derive(Subcommand, Debug)]
pub enum BoardAction {
    /// Create a board
    Create {
        name: String,
        /// Hex color, picked from the name when omitted
        #[arg(long)]
        color: Option<String>,
    },
    /// List your boards, newest first
    List,
    /// Show a board with its columns, cards and labels
    Show { board: i64 },
    /// Rename a board
    Rename { board: i64, name: String },
    /// Delete a board and everything on it
    Delete { board: i64 },
}

#[derive(Subcommand, Debug)]
pub enum ColumnAction {
    /// Add a column at the right end of a board
    Add { board: i64, name: String },
    /// Rename a column
    Rename {
        board: i64,
        column: i64,
        name: String,
    },
    /// Move a column relative to another one
    Move {
        board: i64,
        column: i64,
        #[command(flatten)]
        position: ColumnPosition,
    },
    /// Delete a column and its cards
    Delete { board: i64, column: i64 },
}

/// Where a moved column goes
#[derive(Args, Debug, Clone, Copy)]
#[group(required = true, multiple = false)]
pub struct ColumnPosition {
    /// Place left of this column
    #[arg(long, value_name = "COLUMN")]
    pub before: Option<i64>,
    /// Place right of this column
    #[arg(long, value_name = "COLUMN")]
    pub after: Option<i64>,
    /// Place at the right end
    #[arg(long)]
    pub end: bool,
}

#[derive(Subcommand, Debug)]
pub enum CardAction {
    /// Add a card at the bottom of a column
    Add {
        board: i64,
        column: i64,
        title: String,
        /// Card body text
        #[arg(long)]
        content: Option<String>,
    },
    /// Move a card next to another card or to the end of a column
    Move {
        card: i64,
        #[command(flatten)]
        position: CardPosition,
    },
    /// Change a card's title
    Title { card: i64, title: String },
    /// Replace a card's content; omit the text to clear it
    Content { card: i64, content: Option<String> },
    /// Delete a card
    Delete { card: i64 },
}

/// Where a moved card goes
#[derive(Args, Debug, Clone, Copy)]
#[group(required = true, multiple = false)]
pub struct CardPosition {
    /// Place above this card, in its column
    #[arg(long, value_name = "CARD")]
    pub before: Option<i64>,
    /// Place below this card, in its column
    #[arg(long, value_name = "CARD")]
    pub after: Option<i64>,
    /// Place at the bottom of this column
    #[arg(long, value_name = "COLUMN")]
    pub end: Option<i64>,
}

#[derive(Subcommand, Debug)]
pub enum LabelAction {
    /// Create a label on a board
    Add {
        board: i64,
        name: String,
        /// Hex color, picked from the name when omitted
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a label, detaching it from every card
    Delete { board: i64, label: i64 },
    /// Attach a label to a card
    Attach { card: i64, label: i64 },
    /// Detach a label from a card
    Detach { card: i64, label: i64 },
}
