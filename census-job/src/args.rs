use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the input: a file, a directory, or a glob pattern.
    pub input: String,

    /// Path to the job configuration file.
    #[arg(short, long, default_value = "census.toml")]
    pub config: String,

    /// Name of the workload to run.
    #[arg(short, long, default_value = "census")]
    pub workload: String,

    /// Number of aggregation buckets. Defaults to available parallelism.
    #[arg(short, long)]
    pub tasks: Option<usize>,
}
