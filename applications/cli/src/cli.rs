/// Command-line arguments
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use userdir_core::UserId;

#[derive(Debug, Parser)]
#[command(name = "userdir")]
#[command(about = "Browse and manage the user directory", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "USERDIR_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List users, optionally filtered
    List(ListArgs),
    /// Show one user
    Show {
        /// User ID
        id: UserId,
    },
    /// List the countries and provinces in the directory
    Facets,
    /// Create a new user
    Create(CreateArgs),
    /// Change an existing user
    Update(UpdateArgs),
    /// Delete a user
    Delete {
        /// User ID
        id: UserId,
    },
}

#[derive(Debug, Default, Args)]
pub struct ListArgs {
    /// Case-insensitive text matched against every field
    #[arg(short, long)]
    pub search: Option<String>,

    /// Exact country
    #[arg(long)]
    pub country: Option<String>,

    /// Exact province
    #[arg(long)]
    pub province: Option<String>,

    /// Minimum age (inclusive)
    #[arg(long)]
    pub min_age: Option<i32>,

    /// Maximum age (inclusive)
    #[arg(long)]
    pub max_age: Option<i32>,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub nickname: String,

    /// Birth date as YYYY-MM-DD
    #[arg(long)]
    pub birth_date: String,

    #[arg(long)]
    pub country: String,

    #[arg(long)]
    pub province: String,

    #[arg(long)]
    pub neighborhood: String,

    #[arg(long)]
    pub email: String,

    /// Image file used as the user's photo
    #[arg(long)]
    pub photo: PathBuf,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// User ID
    pub id: UserId,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub nickname: Option<String>,

    /// Birth date as YYYY-MM-DD
    #[arg(long)]
    pub birth_date: Option<String>,

    #[arg(long)]
    pub country: Option<String>,

    #[arg(long)]
    pub province: Option<String>,

    #[arg(long)]
    pub neighborhood: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// Replacement photo
    #[arg(long)]
    pub photo: Option<PathBuf>,
}
