use std::path::PathBuf;

use clap::Parser;

/// Parley: a terminal chat session with persistent history and tool calling.
#[derive(Parser, Debug)]
#[command(name = "parley", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Chat history database override.
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Backend to start with (gpt-4o, gemini-flash).
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Log filter directive override (e.g. debug, parley=trace).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
