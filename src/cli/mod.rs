pub mod analyze;
pub mod config_cmd;
pub mod serve;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "solsight")]
#[command(author, version, about = "AI-assisted rooftop solar potential and ROI estimator")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file
    #[arg(short, long, global = true, env = "SOLSIGHT_CONFIG")]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a rooftop image and print the solar estimate
    Analyze(analyze::AnalyzeArgs),

    /// Start the HTTP server with the web UI
    Serve(serve::ServeArgs),

    /// Configuration management
    Config(config_cmd::ConfigArgs),
}
