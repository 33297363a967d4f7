use anyhow::Result;
use kintree::db::{migrate, Db};
use kintree::error::KintreeError;
use kintree::Config;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or("RUST_LOG", "info")
    ).init();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("verify");

    match command {
        "migrate" => run_migrations_only().await?,
        "verify" | _ => run_schema_verification().await?,
    }

    Ok(())
}

async fn open_migrated_db() -> Result<Db> {
    let config = Config::load()?;
    log::info!("Database path: {}", config.db_path().display());

    let db = Db::new(config.db_path());
    let migrations_dir = Path::new("migrations");
    db.with_connection(|conn| migrate::run_migrations(conn, migrations_dir))
        .await?;

    Ok(db)
}

async fn run_migrations_only() -> Result<()> {
    log::info!("Starting kintree v{}", env!("CARGO_PKG_VERSION"));
    open_migrated_db().await?;
    log::info!("Database initialized successfully");
    Ok(())
}

/// Verify that all expected database objects exist
async fn run_schema_verification() -> Result<()> {
    log::info!("Starting kintree v{}", env!("CARGO_PKG_VERSION"));
    let db = open_migrated_db().await?;

    db.with_connection(|conn| {
        let mut stmt = conn.prepare(
            "SELECT name FROM sqlite_master WHERE type='table' ORDER BY name",
        )?;
        let tables: Vec<String> = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

        for table in ["persons", "relations", "schema_migrations"] {
            if !tables.iter().any(|t| t == table) {
                return Err(KintreeError::Config(format!("Missing table: {}", table)));
            }
            log::debug!("Table exists: {}", table);
        }

        let mut stmt = conn.prepare(
            "SELECT name FROM sqlite_master WHERE type='index' AND name LIKE 'idx_%' ORDER BY name",
        )?;
        let indexes: Vec<String> = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

        for index in ["idx_relations_person1", "idx_relations_person2"] {
            if indexes.iter().any(|i| i == index) {
                log::debug!("Index exists: {}", index);
            } else {
                log::warn!("Adjacency index not found: {} (migration 002 may not be applied)", index);
            }
        }

        let journal_mode: String = conn.query_row("PRAGMA journal_mode", [], |row| row.get(0))?;
        if journal_mode.to_uppercase() != "WAL" {
            return Err(KintreeError::Config(format!("Journal mode is not WAL: {}", journal_mode)));
        }

        let foreign_keys: i32 = conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0))?;
        if foreign_keys != 1 {
            return Err(KintreeError::Config("Foreign keys not enabled".to_string()));
        }

        let integrity: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        if integrity != "ok" {
            return Err(KintreeError::Config(format!("Database integrity check failed: {}", integrity)));
        }

        Ok(())
    })
    .await?;

    log::info!("Database schema verification complete");
    Ok(())
}
