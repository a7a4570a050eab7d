use colored::*;
use futures::FutureExt;
use sea_orm_migration::prelude::*;
use std::io::{self, Write};
use std::time::Instant;

use migration::Migrator;

const STATUS_COLUMN: usize = 80;

/// Applies every pending migration one at a time, printing a status line for
/// each. Applied migrations are recorded so the server's own `Migrator::up`
/// skips them.
pub async fn run_all_migrations(url: &str) {
    let db = match sea_orm::Database::connect(url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("{} {e}", "DB connection failed:".red());
            std::process::exit(1);
        }
    };

    let pending = match Migrator::get_pending_migrations(&db).await {
        Ok(pending) => pending,
        Err(e) => {
            eprintln!("{} {e}", "Could not read migration state:".red());
            std::process::exit(1);
        }
    };

    if pending.is_empty() {
        println!("Nothing to migrate");
        return;
    }

    println!("Running migrations...");
    for migration in pending {
        run_next(&db, migration.name()).await;
    }
}

async fn run_next(db: &sea_orm::DatabaseConnection, name: &str) {
    let name_str = format!("Applying {}", name.bold());
    let dots = ".".repeat(STATUS_COLUMN.saturating_sub(name_str.len()));
    print!("{}{} ", name_str, dots);
    io::stdout().flush().ok();

    let start = Instant::now();
    let result = std::panic::AssertUnwindSafe(Migrator::up(db, Some(1)))
        .catch_unwind()
        .await;

    match result {
        Ok(Ok(())) => {
            let time_str = format!("({:.2?})", start.elapsed()).dimmed();
            println!("{} {}", "done".green(), time_str);
        }
        Ok(Err(e)) => {
            println!("{}", "failed".red());
            eprintln!("{e}");
            std::process::exit(1);
        }
        Err(_) => {
            println!("{}", "panicked".red());
            std::process::exit(1);
        }
    }
}
