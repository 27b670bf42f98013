use clap::Parser;
use sql_middleware::middleware::DatabaseType;

use crate::args::validation::check_readable_file;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Database type: sqlite or postgres
    #[arg(
        short = 'd',
        long,
        value_name = "DATABASE_TYPE",
        default_value = "Sqlite",
        value_parser = clap::value_parser!(DatabaseType)
    )]
    pub db_type: DatabaseType,
    // Only necessary for postgres.
    #[arg(long, value_name = "DATABASE_HOST", default_value = "localhost")]
    pub db_host: Option<String>,
    #[arg(
        short = 'p',
        long,
        value_name = "DATABASE_PORT",
        default_value = "5432"
    )]
    pub db_port: Option<u16>,
    #[arg(
        short = 'u',
        long,
        value_name = "DATABASE_USER",
        default_value = "postgres"
    )]
    pub db_user: Option<String>,
    #[arg(short = 'w', long, value_name = "DATABASE_PASSWORD")]
    pub db_password: Option<String>,

    /// For postgres, the name of the database. For sqlite, the filename.
    #[arg(short = 'n', long, value_name = "DATABASE_NAME")]
    pub db_name: String,
    /// If specified, this sql is run on program startup. Be careful with the SQL you run here, don't mess up your own database.
    #[arg(long, value_name = "DATABASE_STARTUP_SCRIPT", value_parser = check_readable_file)]
    pub db_startup_script: Option<String>,

    /// Tournament whose current-week leaderboard is refreshed in the
    /// background. Without this, caches fill lazily on request.
    #[arg(long, value_name = "TOURNAMENT_ID")]
    pub refresh_tournament: Option<i32>,
    /// Seconds between background refresh passes.
    #[arg(long, value_name = "SECONDS", default_value = "5")]
    pub refresh_interval: u64,
}

impl Args {
    /// # Errors
    ///
    /// Will return `Err` if the postgres arguments are incomplete
    pub fn validate(&self) -> Result<(), String> {
        if self.db_type == DatabaseType::Postgres && self.db_password.is_none() {
            return Err("db_password is required when db_type is postgres.".to_string());
        }
        if self.refresh_interval == 0 {
            return Err("refresh_interval must be at least 1 second.".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CleanArgs {
    pub db_type: DatabaseType,
    pub db_host: Option<String>,
    pub db_port: Option<u16>,
    pub db_user: Option<String>,
    pub db_password: Option<String>,
    pub db_name: String,
    pub db_startup_script: Option<String>,
    pub combined_sql_script: String,
    pub refresh_tournament: Option<i32>,
    pub refresh_interval: u64,
}
