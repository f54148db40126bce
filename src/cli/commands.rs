use clap::{Args, Parser, Subcommand};

use crate::model::{Category, Priority, Status};

#[derive(Parser)]
#[command(name = "td", about = concat!("ticket-desk v", env!("CARGO_PKG_VERSION"), " - support tickets from the terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Backend base URL (overrides desk.toml and TICKET_DESK_API_URL)
    #[arg(long = "api-url", global = true)]
    pub api_url: Option<String>,

    /// Path to a desk.toml config file
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tickets, optionally filtered
    List(ListArgs),
    /// Create a ticket
    Create(CreateArgs),
    /// Update fields of an existing ticket
    Update(UpdateArgs),
    /// Show ticket statistics
    Stats,
    /// Ask the classifier for a category and priority
    Classify(ClassifyArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Only tickets in this category
    #[arg(long)]
    pub category: Option<Category>,
    /// Only tickets with this priority
    #[arg(long)]
    pub priority: Option<Priority>,
    /// Only tickets with this status
    #[arg(long)]
    pub status: Option<Status>,
    /// Search title and description
    #[arg(long, short = 's')]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct CreateArgs {
    /// Ticket title (at most 200 characters)
    pub title: String,
    /// Ticket description
    #[arg(long, short = 'd')]
    pub description: String,
    /// Category (skips the suggested one)
    #[arg(long)]
    pub category: Option<Category>,
    /// Priority (skips the suggested one)
    #[arg(long)]
    pub priority: Option<Priority>,
    /// Don't ask the classifier to fill unset fields
    #[arg(long)]
    pub no_classify: bool,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Ticket ID
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, short = 'd')]
    pub description: Option<String>,
    #[arg(long)]
    pub category: Option<Category>,
    #[arg(long)]
    pub priority: Option<Priority>,
    #[arg(long)]
    pub status: Option<Status>,
}

#[derive(Args)]
pub struct ClassifyArgs {
    /// Issue description to classify
    pub description: String,
}
