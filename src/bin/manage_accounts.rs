//! CLI tool to manage staff accounts.
//!
//! Usage:
//!   cargo run --bin manage-accounts -- create --email <e> --password <p> --role <r> \
//!       --nom <n> --prenom <p> --sex <s> --cin <c>
//!   cargo run --bin manage-accounts -- list-pending
//!   cargo run --bin manage-accounts -- approve --id <account-id>
//!   cargo run --bin manage-accounts -- purge-sessions

use std::env;

use crda_workflow::auth::Argon2Verifier;
use crda_workflow::config::Config;
use crda_workflow::db::DbPool;
use crda_workflow::models::{AccountStatus, RegisterForm};
use crda_workflow::services;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let command = &args[1];
    if matches!(command.as_str(), "help" | "--help" | "-h") {
        print_usage();
        return;
    }

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    let pool = match DbPool::connect(&config.database).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error connecting to database: {}", e);
            std::process::exit(1);
        }
    };

    match command.as_str() {
        "create" => create_account(&pool, &config, &args).await,
        "list-pending" | "ls" => list_pending(&pool).await,
        "approve" => {
            let id = parse_id_arg(&args);
            approve_account(&pool, id).await;
        }
        "purge-sessions" => purge_sessions(&pool).await,
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            std::process::exit(1);
        }
    }
}

fn flag_value(args: &[String], name: &str) -> Option<String> {
    args.iter()
        .skip(2)
        .position(|a| a == name)
        .and_then(|i| args.get(i + 3))
        .cloned()
}

fn parse_id_arg(args: &[String]) -> i32 {
    let Some(raw) = flag_value(args, "--id") else {
        eprintln!("Error: --id is required");
        std::process::exit(1);
    };
    match raw.parse() {
        Ok(id) => id,
        Err(_) => {
            eprintln!("Error: --id must be a number, got '{}'", raw);
            std::process::exit(1);
        }
    }
}

async fn create_account(pool: &DbPool, config: &Config, args: &[String]) {
    let form = RegisterForm {
        email_user: flag_value(args, "--email"),
        password_user: flag_value(args, "--password"),
        role_user: flag_value(args, "--role"),
        nom_user: flag_value(args, "--nom"),
        prenom_user: flag_value(args, "--prenom"),
        sex_user: flag_value(args, "--sex"),
        cin_user: flag_value(args, "--cin"),
    };

    match services::create_account(
        pool,
        &Argon2Verifier,
        form,
        &config.org_email_domain,
        AccountStatus::Approved,
    )
    .await
    {
        Ok(id) => println!("Created approved account {}", id),
        Err(e) => {
            eprintln!("Error creating account: {}", e);
            std::process::exit(1);
        }
    }
}

async fn list_pending(pool: &DbPool) {
    let accounts = match pool.list_pending_accounts().await {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error listing accounts: {}", e);
            std::process::exit(1);
        }
    };

    if accounts.is_empty() {
        println!("No accounts awaiting approval.");
        return;
    }

    println!(
        "{:<6} {:<36} {:<18} {:<30}",
        "ID", "EMAIL", "ROLE", "NAME"
    );
    println!("{}", "-".repeat(92));
    for account in &accounts {
        println!(
            "{:<6} {:<36} {:<18} {} {}",
            account.id,
            account.email_user,
            account.role_user,
            account.prenom_user,
            account.nom_user
        );
    }
    println!();
    println!("{} pending account(s)", accounts.len());
}

async fn approve_account(pool: &DbPool, id: i32) {
    match pool.approve_account(id).await {
        Ok(true) => println!("Account {} approved.", id),
        Ok(false) => {
            eprintln!("Account {} not found.", id);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error approving account: {}", e);
            std::process::exit(1);
        }
    }
}

async fn purge_sessions(pool: &DbPool) {
    match pool.purge_expired_sessions().await {
        Ok(n) => println!("Purged {} expired session(s).", n),
        Err(e) => {
            eprintln!("Error purging sessions: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("CRDA Account Management");
    println!();
    println!("Usage:");
    println!("  manage-accounts <command> [options]");
    println!();
    println!("Commands:");
    println!("  create           Create an approved account");
    println!("      --email --password --role --nom --prenom --sex --cin");
    println!("  list-pending     List accounts awaiting approval");
    println!("  approve --id N   Approve a pending account");
    println!("  purge-sessions   Delete expired login sessions");
    println!("  help             Show this help message");
    println!();
    println!("Roles: chef_dentreprise, gerant, directeur");
}
