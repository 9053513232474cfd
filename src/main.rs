//! Bank ledger CLI
//!
//! Command-line interface for managing users, accounts and transfers stored
//! in a JSON data file.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- register --username Ada --surname Lovelace
//! cargo run -- create-account --user-id 1 --account-id 1 --currency USD --opening-balance 500
//! cargo run -- deposit --user-id 1 --account-id 1 --amount 200
//! cargo run -- transfer --user-id 1 --from-id 1 --to-id 2 --amount 150
//! cargo run -- --storage async summary --user-id 1
//! ```
//!
//! Every command loads the data file, applies one operation and saves the
//! file again only if the operation succeeded.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (validation failure, unknown user or account, unreadable data file, etc.)

use rust_bank_ledger::cli;
use rust_bank_ledger::core::BankService;
use rust_bank_ledger::io;
use rust_bank_ledger::logging;
use std::process;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();
    logging::init_cli_logger(args.verbose);
    tracing::debug!(?args, "parsed arguments");

    let store = io::create_store(args.storage, &args.data_file);
    let service = BankService::new(store);

    let mut output = std::io::stdout();
    if let Err(e) = cli::run(args.command, &service, &mut output) {
        tracing::debug!(kind = ?e.kind(), "command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
