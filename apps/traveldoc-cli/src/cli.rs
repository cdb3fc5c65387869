use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "traveldoc", about = "Stamp travel documents and track check-in windows")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply a signing job (checkmarks, signature, form field) to a PDF
    Stamp {
        /// Source PDF
        input: PathBuf,
        /// JSON job file describing the marks to apply
        job: PathBuf,
        /// Destination for the annotated PDF
        output: PathBuf,
    },
    /// Classify an event's check-in window against the current clock
    Checkin {
        /// Scheduled time ("YYYY-MM-DD HH:MM:SS" for flights, "YYYY-MM-DD"
        /// for briefings)
        #[arg(long)]
        time: String,
        /// How many hours before the scheduled time check-in opens
        #[arg(long, default_value_t = 2.5)]
        lead_hours: f64,
        /// Use the international check-in prefix
        #[arg(long)]
        international: bool,
        /// Emit the classification as JSON
        #[arg(long)]
        json: bool,
    },
}
