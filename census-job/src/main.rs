use std::thread;

use anyhow::anyhow;
use clap::Parser;
use tracing::{error, info};

use census_job::args::Args;
use census_job::config::Config;
use census_job::{pipeline, storage};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    // Clap exits with its own status code on a bad invocation; the job
    // contract is a usage message and exit code 1. Help and version output
    // still exit 0.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    if let Err(e) = run(args).await {
        error!("job failed: {e:#}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), anyhow::Error> {
    let workload = workload::try_named(&args.workload)
        .ok_or_else(|| anyhow!("The workload `{}` is not a known workload", args.workload))?;

    let config = Config::load(&args.config)?;
    let sink = storage::Client::from_conf(&config.storage)?;

    let n_tasks = args
        .tasks
        .unwrap_or_else(|| thread::available_parallelism().map(|n| n.get()).unwrap_or(1));

    let stats = pipeline::run(workload, &args.input, &sink, n_tasks).await?;
    info!(
        "job complete: {} file(s), {} entries, {} group(s), {} row(s) written",
        stats.files, stats.entries, stats.groups, stats.rows
    );

    Ok(())
}
