//! # Vending Kiosk
//!
//! Terminal front end for a vending machine backed by a REST data store.
//!
//! ## Module Structure
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      vending_kiosk                                      │
//! │                                                                         │
//! │  cli.rs ──────► clap commands and flags                                 │
//! │                                                                         │
//! │  state/ ──────► KioskConfig (defaults, TOML, env, flags)                │
//! │                                                                         │
//! │  commands/ ───► PurchaseFlow, AdminPanel, HistoryView                   │
//! │                                                                         │
//! │  display.rs ──► text rendering (tables, receipt, step indicator)        │
//! │  messages.rs ─► Indonesian customer text                                │
//! │  prompt.rs ───► yes/no confirmation and line input                      │
//! │  error.rs ────► KioskError (what the customer sees)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup Sequence
//! 1. Load `.env` into the environment
//! 2. Parse the command line
//! 3. Initialize tracing (stderr, so page output stays clean)
//! 4. Load and validate configuration
//! 5. Build the store client
//! 6. Run the requested page

pub mod cli;
pub mod commands;
pub mod display;
pub mod error;
pub mod messages;
pub mod prompt;
pub mod state;

use std::io;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vending_client::ApiClient;

use crate::cli::{AdminCommand, Cli, Commands};
use crate::commands::admin::run_admin;
use crate::commands::{AdminPanel, HistoryView, PurchaseFlow};
use crate::error::{ErrorCode, KioskError, KioskResult};
use crate::prompt::{AutoConfirm, Prompt};
use crate::state::KioskConfig;

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - Default: `info` for all crates, `debug` for ours
/// - Override with the `RUST_LOG` environment variable
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vending=debug,reqwest=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Runs one command to completion.
pub async fn run(cli: Cli) -> KioskResult<()> {
    let config = KioskConfig::load(cli.config)?.with_api_url(cli.api_url);
    config.validate()?;

    let client = ApiClient::new(config.api_config())
        .map_err(|e| KioskError::new(ErrorCode::Config, e.to_string()))?;
    info!(base_url = %client.base_url(), "Starting vending kiosk");

    let store = Arc::new(client);

    match cli.command {
        Commands::Products => {
            let mut flow = PurchaseFlow::new(store, config.insert_delay());
            flow.load_products().await?;
            println!("{}", display::product_grid(flow.products()));
        }

        Commands::Shop => {
            let mut flow = PurchaseFlow::new(store, config.insert_delay());
            let mut prompt = Prompt::new(io::stdin().lock(), io::stdout());
            commands::purchase::run_shop(&mut flow, &mut prompt).await?;
        }

        Commands::Buy { id, notes, yes } => {
            let mut flow = PurchaseFlow::new(store, config.insert_delay());
            let receipt = if yes {
                commands::purchase::run_buy(&mut flow, &id, &notes, &mut AutoConfirm(true)).await?
            } else {
                let mut prompt = Prompt::new(io::stdin().lock(), io::stdout());
                commands::purchase::run_buy(&mut flow, &id, &notes, &mut prompt).await?
            };
            println!("{}", receipt);
        }

        Commands::Admin(command) => {
            let assume_yes = matches!(command, AdminCommand::Delete { yes: true, .. });
            let mut panel = AdminPanel::new(store);
            let page = if assume_yes {
                run_admin(&mut panel, command, &mut AutoConfirm(true)).await?
            } else {
                let mut prompt = Prompt::new(io::stdin().lock(), io::stdout());
                run_admin(&mut panel, command, &mut prompt).await?
            };
            println!("{}", page);
        }

        Commands::History => {
            let mut view = HistoryView::new(store);
            println!("{}", messages::LOADING_HISTORY);
            view.load().await?;
            println!("{}", view.render());
        }
    }

    Ok(())
}
