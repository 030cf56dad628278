use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use shorty_telemetry::LogFormat;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const LISTEN_ADDR_ENV: &str = "SHORTY_LISTEN_ADDR";
pub const USE_SQLITE_ENV: &str = "USE_SQLITE";
pub const DATABASE_PATH_ENV: &str = "SHORTY_DATABASE_PATH";
pub const CODE_LENGTH_ENV: &str = "SHORTY_CODE_LENGTH";
pub const PER_PAGE_ENV: &str = "SHORTY_PER_PAGE";
pub const PUBLIC_BASE_URL_ENV: &str = "SHORTY_PUBLIC_BASE_URL";
pub const LOG_FORMAT_ENV: &str = "SHORTY_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_DATABASE_PATH: &str = "urls.db";

#[derive(Debug, Parser)]
#[command(name = "shorty", about = "Shortens URLs and redirects short codes back")]
pub struct Cli {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Persist mappings in SQLite instead of process memory.
    #[arg(
        long,
        env = USE_SQLITE_ENV,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true",
    )]
    pub use_sqlite: bool,

    #[arg(long, env = DATABASE_PATH_ENV, default_value = DEFAULT_DATABASE_PATH)]
    pub database_path: PathBuf,

    #[arg(long, env = CODE_LENGTH_ENV, default_value_t = shorty_generator::random::DEFAULT_CODE_LENGTH)]
    pub code_length: usize,

    #[arg(long, env = PER_PAGE_ENV, default_value_t = shorty_core::page::DEFAULT_PER_PAGE)]
    pub per_page: usize,

    /// Base URL used when rendering short links; defaults to the request host.
    #[arg(long, env = PUBLIC_BASE_URL_ENV)]
    pub public_base_url: Option<String>,

    #[arg(long, env = LOG_FORMAT_ENV, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Cli {
    pub fn storage_backend(&self) -> &'static str {
        if self.use_sqlite {
            "sqlite"
        } else {
            "in-memory"
        }
    }
}
