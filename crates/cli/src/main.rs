//! Mr. Daebak CLI - Catalog and order ledger tools for operators.
//!
//! # Usage
//!
//! ```bash
//! # Inspect the catalog
//! daebak menus list
//! daebak menus show champagne
//!
//! # Price a configuration
//! daebak quote valentine --bread 3 --wine 1
//!
//! # Find a guest's token from their phone
//! daebak guest-token 010-1234-5678
//!
//! # Work the order ledger (requires DAEBAK_DATA_DIR)
//! daebak orders list
//! daebak orders status ord-1718000000000-004211 confirmed
//! ```
//!
//! # Commands
//!
//! - `menus` - List menus or show one joined menu
//! - `quote` - Price a dinner configuration
//! - `guest-token` - Derive the guest token for a phone number
//! - `orders` - List, look up, show and advance orders

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use mr_daebak_core::{MenuStyle, OrderStatus};

mod commands;

#[derive(Parser)]
#[command(name = "daebak")]
#[command(author, version, about = "Mr. Daebak operator tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the menu catalog
    Menus {
        #[command(subcommand)]
        action: MenuAction,
    },
    /// Price a dinner configuration
    Quote {
        /// Menu id (e.g. `valentine`)
        menu_id: String,

        /// Baguette count (defaults to the menu's)
        #[arg(short, long)]
        bread: Option<u32>,

        /// Champagne bottle count (defaults to the menu's)
        #[arg(short, long)]
        wine: Option<u32>,

        /// Serving style (`simple`, `grand`, `deluxe`)
        #[arg(short, long)]
        style: Option<MenuStyle>,
    },
    /// Derive the guest token for a phone number
    GuestToken {
        /// Phone number in any format
        phone: String,
    },
    /// Work the order ledger
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
}

#[derive(Subcommand)]
enum MenuAction {
    /// List all menus
    List,
    /// Show one menu with styles, courses and prices
    Show {
        /// Menu id
        menu_id: String,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// List orders, optionally for one owner
    List {
        /// Owner key: member email or guest token
        #[arg(short, long)]
        owner: Option<String>,

        /// Treat the owner key as a guest token
        #[arg(short, long, requires = "owner")]
        guest: bool,
    },
    /// Find guest orders by token or trailing phone digits
    Lookup {
        /// Guest token or its last 8 digits
        token: String,
    },
    /// Show one order
    Show {
        /// Order id
        order_id: String,
    },
    /// Move an order to a new status
    Status {
        /// Order id
        order_id: String,

        /// Target status (`CONFIRMED`, `COOKING`, `DELIVERED`, `CANCELLED`)
        status: OrderStatus,
    },
}

fn main() {
    dotenvy::dotenv().ok();

    // Logs go to stderr so JSON output stays clean on stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mr_daebak_cli=info,mr_daebak_storefront=info".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Menus { action } => match action {
            MenuAction::List => commands::menus::list()?,
            MenuAction::Show { menu_id } => commands::menus::show(&menu_id)?,
        },
        Commands::Quote {
            menu_id,
            bread,
            wine,
            style,
        } => commands::menus::quote(&menu_id, bread, wine, style)?,
        Commands::GuestToken { phone } => commands::orders::guest_token(&phone)?,
        Commands::Orders { action } => match action {
            OrderAction::List { owner, guest } => commands::orders::list(owner, guest)?,
            OrderAction::Lookup { token } => commands::orders::lookup(&token)?,
            OrderAction::Show { order_id } => commands::orders::show(&order_id)?,
            OrderAction::Status { order_id, status } => {
                commands::orders::status(&order_id, status)?;
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_status() {
        let cli = Cli::try_parse_from(["daebak", "orders", "status", "ord-1-000001", "cooking"])
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(matches!(
            cli.command,
            Commands::Orders {
                action: OrderAction::Status {
                    status: OrderStatus::Cooking,
                    ..
                }
            }
        ));
    }

    #[test]
    fn test_guest_requires_owner() {
        assert!(Cli::try_parse_from(["daebak", "orders", "list", "--guest"]).is_err());
    }
}
