use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::chat::{ChatSession, Intent};

/// One parsed REPL line. Intents go to the session dispatch table; the rest
/// are REPL-level commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplAction {
    Intent(Intent),
    ListSuggestions,
    Suggest(usize),
    Health,
    Solve(String),
    Help,
    Exit,
}

/// Map a line of input to an action. Empty lines close an open detail view
/// (the terminal analog of clicking the modal background) and are otherwise
/// ignored by the caller.
pub fn parse_line(line: &str) -> ReplAction {
    let trimmed = line.trim();

    if trimmed == "exit" || trimmed == "quit" {
        return ReplAction::Exit;
    }
    if trimmed == "/help" {
        return ReplAction::Help;
    }
    if trimmed == "/clear" {
        return ReplAction::Intent(Intent::Clear);
    }
    if trimmed == "/close" {
        return ReplAction::Intent(Intent::CloseDetail);
    }
    if let Some(rest) = trimmed.strip_prefix("/detail") {
        return match rest.trim().parse::<usize>() {
            Ok(n) => ReplAction::Intent(Intent::OpenDetail(n)),
            Err(_) => ReplAction::Help,
        };
    }
    if trimmed == "/suggest" {
        return ReplAction::ListSuggestions;
    }
    if let Some(rest) = trimmed.strip_prefix("/suggest ") {
        return match rest.trim().parse::<usize>() {
            Ok(n) => ReplAction::Suggest(n),
            Err(_) => ReplAction::Help,
        };
    }
    if trimmed == "/health" {
        return ReplAction::Health;
    }
    if let Some(rest) = trimmed.strip_prefix("/solve ") {
        return ReplAction::Solve(rest.trim().to_string());
    }

    // Everything else is message text, submitted as typed.
    ReplAction::Intent(Intent::Submit(line.to_string()))
}

fn print_help() {
    println!("{}", "Commands:".bright_cyan());
    println!("  /clear          - Clear the chat transcript");
    println!("  /detail <n>     - Show metadata for bot reply #n");
    println!("  /close          - Close the detail view (Enter also closes it)");
    println!("  /suggest        - List suggested messages");
    println!("  /suggest <n>    - Send suggested message #n");
    println!("  /solve <text>   - Ask the dedicated problem solver");
    println!("  /health         - Check backend status");
    println!("  exit, quit      - Leave the chat");
}

/// Run interactive REPL mode
pub async fn run_repl(mut session: ChatSession, suggestions: Vec<String>) -> Result<()> {
    println!("{}", "💬 SolveChat - Study Assistant".bright_cyan().bold());
    println!(
        "{}",
        format!("Backend: {}", session.endpoint()).bright_black()
    );
    println!(
        "{}",
        "Type a message to chat, '/help' for commands, 'exit' to leave\n".bright_black()
    );

    // Show the fixed welcome turn that opens every transcript.
    session.render_transcript();

    let mut rl = DefaultEditor::new()?;

    loop {
        let readline = rl.readline(&format!("{} ", "You:".bright_green().bold()));

        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    if session.detail_open() {
                        session.dispatch(Intent::CloseDetail).await?;
                    }
                    continue;
                }

                rl.add_history_entry(line.as_str())?;

                match parse_line(&line) {
                    ReplAction::Exit => {
                        println!("{}", "Goodbye!".bright_cyan());
                        break;
                    }
                    ReplAction::Help => {
                        print_help();
                    }
                    ReplAction::ListSuggestions => {
                        println!("{}", "💡 Suggestions:".bright_cyan());
                        for (i, text) in suggestions.iter().enumerate() {
                            println!("  {}. {}", i + 1, text);
                        }
                        println!(
                            "{}",
                            "Use '/suggest <n>' to send one.".bright_black()
                        );
                    }
                    ReplAction::Suggest(n) => {
                        match suggestions.get(n.wrapping_sub(1)) {
                            Some(text) => {
                                // Inserted verbatim as if typed, then submitted.
                                let text = text.clone();
                                session
                                    .dispatch(Intent::TextChanged(text.clone()))
                                    .await?;
                                session.dispatch(Intent::Submit(text)).await?;
                            }
                            None => {
                                eprintln!(
                                    "{} No suggestion #{} (1-{})",
                                    "⚠️".yellow(),
                                    n,
                                    suggestions.len()
                                );
                            }
                        }
                    }
                    ReplAction::Health => match session.health().await {
                        Ok(report) => {
                            println!(
                                "{} {} ({})",
                                "💚".green(),
                                report.service,
                                report.status.green()
                            );
                            for capability in &report.capabilities {
                                println!("  • {}", capability);
                            }
                        }
                        Err(e) => {
                            eprintln!("{} Backend unreachable: {}", "❌".bright_red(), e);
                        }
                    },
                    ReplAction::Solve(problem) => match session.solve(&problem).await {
                        Ok(report) => {
                            println!(
                                "{} {}",
                                "🧮".bright_cyan(),
                                format_solution_report(&report)
                            );
                        }
                        Err(e) => {
                            eprintln!("{} Solver failed: {}", "❌".bright_red(), e);
                        }
                    },
                    ReplAction::Intent(intent) => {
                        if let Intent::Submit(ref text) = intent {
                            session
                                .dispatch(Intent::TextChanged(text.clone()))
                                .await?;
                        }
                        session.dispatch(intent).await?;
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".bright_black());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_cyan());
                break;
            }
            Err(err) => {
                eprintln!("{} {}", "Error:".bright_red().bold(), err);
                break;
            }
        }
    }

    session.shutdown().await;
    Ok(())
}

fn format_solution_report(report: &crate::models::SolveReport) -> String {
    let mut out = String::new();
    if !report.solution.kind.is_empty() {
        out.push_str(&format!("[{}] ", report.solution.kind));
    }
    out.push_str(&report.solution.answer);
    if !report.solution.explanation.is_empty() {
        out.push('\n');
        out.push_str(&report.solution.explanation);
    }
    out
}
