use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// CLI arguments for solvechat
#[derive(Parser)]
#[command(name = "solvechat")]
#[command(about = "Terminal client for the Enhanced AI Chatbot service")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the chatbot backend (e.g., http://localhost:5001)
    #[arg(long, value_name = "URL", env = "SOLVECHAT_API_URL")]
    pub api_url: Option<String>,

    /// Path to a TOML config file (default: solvechat.toml if present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Disable the JSONL conversation log
    #[arg(long)]
    pub no_log: bool,

    /// Enable verbose debug output (shows HTTP requests and responses)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Generate shell completions
    #[arg(long, value_enum)]
    pub generate: Option<Shell>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send a single message and print the reply
    Send {
        /// The message text
        message: String,
        /// Also print the reply's metadata detail block
        #[arg(long)]
        detail: bool,
    },
    /// Submit a problem to the dedicated solver endpoint
    Solve {
        /// The problem statement (e.g., "solve 2x + 5 = 15")
        problem: String,
    },
    /// Check backend health and list its capabilities
    Health,
}
