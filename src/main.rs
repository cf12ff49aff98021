use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use cableschema::config::Config;
use cableschema::{CableListDatabase, CreationEvent, Dialect, RunOutcome, SqliteConnection, Status};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "cableschema", version, about = "Create and check the cable list database schema")]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database file, overrides the configured one
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create every table, seed row, view and trigger
    Create,
    /// Check that every table and view exists
    Check,
    /// Drop every object of the schema
    Drop,
    /// Print the schema as an SQL script
    Script {
        /// sqlite, generic, postgresql or mysql
        #[arg(long)]
        dialect: Option<String>,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(database) = cli.database {
        config.database = database;
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .context("Invalid log filter")?;
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let db = CableListDatabase::new().context("Failed to build cable list schema")?;

    match cli.command {
        Command::Create => create(&db, &config),
        Command::Check => {
            let mut conn = open(&config)?;
            db.check_schema(&mut conn)?;
            println!("Schema OK: {}", config.database.display());
            Ok(())
        }
        Command::Drop => {
            let mut conn = open(&config)?;
            db.drop_schema(&mut conn)?;
            println!("Schema dropped: {}", config.database.display());
            Ok(())
        }
        Command::Script { dialect, output } => {
            let dialect = match dialect {
                Some(name) => Dialect::from_str(&name)
                    .with_context(|| format!("Unknown SQL dialect '{name}'"))?,
                None => config.dialect()?,
            };
            let script = db.schema().sql_script(dialect)?;
            match output {
                Some(path) => fs::write(&path, script)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => print!("{script}"),
            }
            Ok(())
        }
    }
}

fn open(config: &Config) -> Result<SqliteConnection> {
    let mut conn = SqliteConnection::open(&config.database)
        .with_context(|| format!("Failed to open {}", config.database.display()))?;
    conn.set_foreign_keys(config.foreign_keys)?;
    Ok(conn)
}

fn create(db: &CableListDatabase, config: &Config) -> Result<()> {
    let conn = open(config)?;
    info!("creating cable list schema in {}", config.database.display());

    let handle = db.spawn_creation(conn).context("Failed to start schema creation")?;
    for event in handle.events() {
        match event {
            CreationEvent::ObjectStatus {
                category,
                name,
                status: Status::Ok,
            } => println!("  {category} {name}"),
            CreationEvent::GlobalProgress { completed, total } if completed == total => {
                println!("{completed}/{total} objects created");
            }
            CreationEvent::GlobalError(err) => eprintln!("{err}"),
            _ => {}
        }
    }

    let finished = handle.join()?;
    match finished.result? {
        RunOutcome::Completed => Ok(()),
        RunOutcome::Aborted => bail!("Schema creation aborted"),
    }
}
