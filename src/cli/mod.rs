// CLI module
// Command-line interface, argument parsing and command dispatch

mod args;

pub use args::{CliArgs, Command, StorageType};

use crate::core::BankService;
use crate::types::BankError;
use clap::Parser;
use std::io::Write;

/// Parse command-line arguments using clap
///
/// If parsing fails (e.g., invalid arguments, missing required arguments, or
/// --help flag), clap displays an error message or help text and exits the
/// process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

/// Execute one command against the service and write its result to `output`
pub fn run(
    command: Command,
    service: &BankService,
    output: &mut dyn Write,
) -> Result<(), BankError> {
    match command {
        Command::Register { username, surname } => {
            let id = service.register(&username, &surname)?;
            writeln!(
                output,
                "New user registered: {} {}, ID: {}",
                username, surname, id
            )?;
        }
        Command::Login { user_id } => {
            let user = service.login(user_id)?;
            writeln!(output, "Hi, {} {}!", user.username, user.surname)?;
        }
        Command::CreateAccount {
            user_id,
            account_id,
            currency,
            opening_balance,
        } => {
            service.create_account(user_id, account_id, currency, opening_balance)?;
            writeln!(
                output,
                "Created account {} ({}) for user {}",
                account_id, currency, user_id
            )?;
        }
        Command::Deposit {
            user_id,
            account_id,
            amount,
            currency,
        } => {
            let balance = service.deposit(user_id, account_id, amount, currency)?;
            writeln!(
                output,
                "Deposited {} into account {}. Balance: {}",
                amount, account_id, balance
            )?;
        }
        Command::Withdraw {
            user_id,
            account_id,
            amount,
            currency,
        } => {
            let balance = service.withdraw(user_id, account_id, amount, currency)?;
            writeln!(
                output,
                "Withdrew {} from account {}. Balance: {}",
                amount, account_id, balance
            )?;
        }
        Command::Transfer {
            user_id,
            from_id,
            to_id,
            amount,
            currency,
        } => {
            let receipt = service.transfer(user_id, from_id, to_id, amount, currency)?;
            writeln!(output, "{}", receipt)?;
        }
        Command::Summary { user_id } => {
            service.user(user_id)?.write_summary(output)?;
        }
    }
    Ok(())
}
