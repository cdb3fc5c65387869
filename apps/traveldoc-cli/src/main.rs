mod checkin_cmd;
mod cli;
mod job_file;
mod stamp_cmd;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Stamp { input, job, output } => stamp_cmd::run(&input, &job, &output),
        Commands::Checkin {
            time,
            lead_hours,
            international,
            json,
        } => checkin_cmd::run(&time, lead_hours, international, json),
    }
}
