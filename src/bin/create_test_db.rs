use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;

use bankbook_rs::{AccountKind, Amount, Config, NewUser, pay_bill, transfer_funds};

/// A utility for creating a demo ledger database for bankbook_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let config = Config::new(output_path);
    let conn = config.connect()?;

    bankbook_rs::initialize(&conn)?;

    println!("Creating test user and accounts...");

    let user = bankbook_rs::create_user(
        NewUser {
            email: "test@example.com".to_owned(),
            first_name: "Test".to_owned(),
            last_name: "User".to_owned(),
            password: "test".to_owned(),
            phone: "555-0100".to_owned(),
        },
        &conn,
    )?;

    let checking = bankbook_rs::create_account(
        user.id,
        Amount::new(100_00, 2),
        AccountKind::Checking,
        &conn,
    )?;
    let savings =
        bankbook_rs::create_account(user.id, Amount::new(50_00, 2), AccountKind::Savings, &conn)?;

    println!("Recording sample activity...");

    let today = config.today();
    transfer_funds(checking.id, savings.id, Amount::new(30_00, 2), today, &conn)?;
    pay_bill(
        checking.id,
        "Acme Electric",
        Amount::new(15_00, 2),
        today,
        &conn,
    )?;

    println!("Success!");

    Ok(())
}
