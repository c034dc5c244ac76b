// src/cli/mod.rs
// Command line for the YouYoung server

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod persona;
pub mod serve;

pub use persona::run_persona;
pub use serve::run_server;

#[derive(Parser)]
#[command(name = "youyoung")]
#[command(about = "Chat with your younger self, shaped by a personality questionnaire")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server (default)
    Serve,

    /// Derive a persona offline from a questionnaire file and print it as JSON
    Persona {
        /// JSON file: an array of {questionId, answer} or a profile object
        #[arg(short, long)]
        answers: PathBuf,

        /// Seed for the greeting and formatter draws
        #[arg(long)]
        seed: Option<u64>,

        /// Optional message to run through the persona formatter
        #[arg(short, long)]
        message: Option<String>,
    },
}
