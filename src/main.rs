use anyhow::Result;
use clap::{CommandFactory, Parser};
use colored::Colorize;
use std::path::Path;

mod api;
mod app;
mod chat;
mod cli;
mod config;
mod logging;
mod models;
mod render;

use api::ApiClient;
use chat::ChatSession;
use cli::{Cli, Commands};
use config::ClientConfig;
use logging::ConversationLogger;
use render::{format_bot_body, format_detail_block, Renderer};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Some(shell) = cli.generate {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(());
    }

    let config = ClientConfig::resolve(cli.api_url.clone(), cli.config.as_deref().map(Path::new))?;
    let client = ApiClient::new(config.api_url.clone(), cli.verbose);

    match cli.command {
        Some(Commands::Send { message, detail }) => send_once(&client, &message, detail).await,
        Some(Commands::Solve { problem }) => solve_once(&client, &problem).await,
        Some(Commands::Health) => health_once(&client).await,
        None => {
            let logger = if cli.no_log {
                None
            } else {
                match ConversationLogger::new(Path::new(".")).await {
                    Ok(logger) => Some(logger),
                    Err(e) => {
                        eprintln!("Logging disabled: {}", e);
                        None
                    }
                }
            };

            let session = ChatSession::new(client, Renderer::new()).with_logger(logger);
            app::repl::run_repl(session, config.suggestions).await
        }
    }
}

/// One-shot exchange: print the reply body (and optionally its metadata)
/// and exit non-zero on transport failure.
async fn send_once(client: &ApiClient, message: &str, detail: bool) -> Result<()> {
    let reply = client.exchange(message).await?;
    println!("{}", format_bot_body(&reply));
    if detail {
        println!("{}", format_detail_block(&reply).bright_black());
    }
    Ok(())
}

async fn solve_once(client: &ApiClient, problem: &str) -> Result<()> {
    let report = client.solve(problem).await?;
    if !report.solution.kind.is_empty() {
        println!("{}", format!("[{}]", report.solution.kind).bright_black());
    }
    println!("{}", report.solution.answer);
    if !report.solution.explanation.is_empty() {
        println!("{}", report.solution.explanation);
    }
    Ok(())
}

async fn health_once(client: &ApiClient) -> Result<()> {
    let report = client.health().await?;
    println!("{} ({})", report.service, report.status.green());
    for capability in &report.capabilities {
        println!("  • {}", capability);
    }
    Ok(())
}
