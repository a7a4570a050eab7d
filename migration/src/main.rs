use std::{fs, path::Path};
use util::config;

mod runner;

/// `migration` applies pending migrations, `migration fresh` deletes the
/// SQLite file first, `migration clean` only deletes it.
#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let db_path = config::database_path();
    let is_dsn = db_path.contains("://") || db_path.starts_with("sqlite:");
    let url = if is_dsn {
        db_path.clone()
    } else {
        format!("sqlite://{}?mode=rwc", db_path)
    };
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("clean") if !is_dsn => {
            remove_db_file(&db_path);
        }
        Some("fresh") if !is_dsn => {
            remove_db_file(&db_path);
            create_db_dir(&db_path);
            runner::run_all_migrations(&url).await;
        }
        Some("clean") | Some("fresh") => {
            eprintln!("`clean` and `fresh` only apply to a SQLite file path");
            std::process::exit(2);
        }
        _ => {
            if !is_dsn {
                create_db_dir(&db_path);
            }
            runner::run_all_migrations(&url).await;
        }
    }
}

fn remove_db_file(path: &str) {
    let db_path = Path::new(path);
    if !db_path.exists() {
        println!("DB file does not exist: {}", db_path.display());
        return;
    }
    match fs::remove_file(db_path) {
        Ok(()) => println!("Deleted DB: {}", db_path.display()),
        Err(e) => {
            eprintln!("Failed to delete {}: {e}", db_path.display());
            std::process::exit(1);
        }
    }
}

fn create_db_dir(path: &str) {
    if let Some(parent) = Path::new(path).parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("Failed to create {}: {e}", parent.display());
            std::process::exit(1);
        }
    }
}
