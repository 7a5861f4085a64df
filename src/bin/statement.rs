use std::error::Error;
use std::process::exit;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use bankbook_rs::{Config, account_statement, get_accounts_by_user, get_user_by_email};

/// Prints the accounts, balances, and transaction histories of a user.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the ledger SQLite database.
    #[arg(long)]
    db_path: String,

    /// Email address of the user to report on.
    #[arg(long)]
    email: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    setup_logging();

    let args = Args::parse();

    let config = Config::new(&args.db_path);
    let conn = config.connect()?;

    let Some(user) = get_user_by_email(&args.email, &conn)? else {
        eprintln!("No user with the email {:?}.", args.email);
        exit(1);
    };

    let accounts = get_accounts_by_user(user.id, &conn)?;

    if accounts.is_empty() {
        println!(
            "{} {} <{}> has no accounts.",
            user.first_name, user.last_name, user.email
        );
        return Ok(());
    }

    println!(
        "Accounts for {} {} <{}>:",
        user.first_name, user.last_name, user.email
    );

    for account in accounts {
        let Some(statement) = account_statement(account.id, &conn)? else {
            continue;
        };

        println!(
            "\nAccount #{} ({:?}): opened at {}, current balance {}",
            account.id, account.kind, account.opening_balance, statement.balance
        );

        for transaction in &statement.transactions {
            println!(
                "  {}  {:<8}  {:>12}  {}",
                transaction.date,
                format!("{:?}", transaction.kind),
                transaction.amount.to_string(),
                transaction.payee
            );
        }
    }

    Ok(())
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}
