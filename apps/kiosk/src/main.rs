//! # Vending Kiosk Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        vending (binary)                                 │
//! │                                                                         │
//! │  main.rs ────► .env, flags, logging                                     │
//! │                                                                         │
//! │  lib.rs ─────► config, store client, page dispatch                      │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    REST data store                               │  │
//! │  │  /products   /transactions   (http://localhost:3001 by default)  │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Exit code is non-zero when a command fails; the message is printed to
//! stderr in the customer's language.

use clap::Parser;

use vending_kiosk::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is normal.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    vending_kiosk::init_tracing();

    vending_kiosk::run(cli).await?;
    Ok(())
}
