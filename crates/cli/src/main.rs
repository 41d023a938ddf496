//! Listmate CLI - database migrations and administration.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! listmate migrate
//!
//! # Create a staff account (password from --password or LISTMATE_USER_PASSWORD)
//! listmate user create -e staff@example.com --staff
//!
//! # Grant or revoke access to a list
//! listmate list add-member --list <uuid> --email shopper@example.com
//! listmate list remove-member --list <uuid> --email shopper@example.com
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "listmate")]
#[command(author, version, about = "Listmate CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Manage list membership
    List {
        #[command(subcommand)]
        action: ListAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create an account
    Create {
        /// Email address (login name)
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(long, env = "LISTMATE_USER_PASSWORD", hide_env_values = true)]
        password: String,

        /// Let the account bypass list membership checks
        #[arg(long)]
        staff: bool,
    },
}

#[derive(Subcommand)]
enum ListAction {
    /// Add a user to a list
    AddMember {
        /// Shopping list ID
        #[arg(short, long)]
        list: String,

        /// Email of the user to add
        #[arg(short, long)]
        email: String,
    },
    /// Remove a user from a list
    RemoveMember {
        /// Shopping list ID
        #[arg(short, long)]
        list: String,

        /// Email of the user to remove
        #[arg(short, long)]
        email: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::User { action } => match action {
            UserAction::Create {
                email,
                password,
                staff,
            } => commands::user::create(&email, &password, staff).await?,
        },
        Commands::List { action } => match action {
            ListAction::AddMember { list, email } => {
                commands::list::add_member(&list, &email).await?;
            }
            ListAction::RemoveMember { list, email } => {
                commands::list::remove_member(&list, &email).await?;
            }
        },
    }
    Ok(())
}
