//! Probe the configured storage backend. Opens the database named in the
//! config file and reports how many summary rows it currently holds.

use clap::Parser;
use tracing::{error, info};

use census_job::config::Config;
use census_job::storage;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the job configuration file.
    #[arg(short, long, default_value = "census.toml")]
    config: String,
}

fn main() {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    match check(&args.config) {
        Ok(rows) => info!("Connection successful. {rows} row(s) in census_data."),
        Err(e) => {
            error!("Connection error: {e:#}");
            std::process::exit(1);
        }
    }
}

fn check(config_path: &str) -> Result<i64, anyhow::Error> {
    let config = Config::load(config_path)?;
    let client = storage::Client::from_conf(&config.storage)?;
    client.count_rows()
}
