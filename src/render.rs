//! Terminal rendering of transcript turns, the typing indicator, the
//! character counter, and the metadata detail view.

use std::io::{self, Write};

use colored::Colorize;

use crate::chat::composer::{CounterState, Severity};
use crate::chat::transcript::{Speaker, TranscriptEntry};
use crate::models::{BotReply, ReplyKind};

const TYPING_TEXT: &str = "🤖 typing...";

/// Multi-line-aware body for a bot turn.
///
/// Problem-solution replies keep embedded newlines as line breaks and append
/// the solver detail block when one is present; everything else renders as a
/// single block.
pub fn format_bot_body(reply: &BotReply) -> String {
    match reply.kind() {
        ReplyKind::ProblemSolution { .. } => {
            let mut body = reply.bot_response.clone();
            if let Some(details) = reply.solution() {
                body.push('\n');
                body.push_str(&format_solution_block(details));
            }
            body
        }
        ReplyKind::Plain => reply.bot_response.split('\n').collect::<Vec<_>>().join(" "),
    }
}

fn format_solution_block(details: &crate::models::SolutionDetails) -> String {
    let mut lines = vec![format!("── solution [{}] ──", details.kind)];
    if !details.answer.is_empty() {
        lines.push(format!("answer: {}", details.answer));
    }
    if !details.explanation.is_empty() {
        lines.push(format!("explanation: {}", details.explanation));
    }
    lines.join("\n")
}

/// Detail-view block: the reply's classification metadata, verbatim.
pub fn format_detail_block(reply: &BotReply) -> String {
    format!(
        "type:       {}\nsentiment:  {}\nconfidence: {}",
        reply.response_type, reply.sentiment, reply.confidence
    )
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    fn timestamp(&self, entry: &TranscriptEntry) -> colored::ColoredString {
        format!("[{}]", entry.timestamp.format("%H:%M:%S")).bright_black()
    }

    pub fn render_entry(&self, entry: &TranscriptEntry) {
        match entry.speaker {
            Speaker::User => self.render_user(entry),
            Speaker::Bot => self.render_bot(entry),
        }
    }

    pub fn render_user(&self, entry: &TranscriptEntry) {
        println!(
            "{} {} {}",
            self.timestamp(entry),
            "You:".bright_green().bold(),
            entry.text
        );
    }

    pub fn render_bot(&self, entry: &TranscriptEntry) {
        let tag = entry
            .reply
            .as_ref()
            .map(|r| format!("[{}]", r.response_type))
            .unwrap_or_default();
        let body = entry
            .reply
            .as_ref()
            .map(format_bot_body)
            .unwrap_or_else(|| entry.text.clone());

        let mut lines = body.lines();
        println!(
            "{} {} {} {}",
            self.timestamp(entry),
            "Bot:".bright_blue().bold(),
            lines.next().unwrap_or(""),
            tag.bright_black()
        );
        for line in lines {
            println!("           {}", line);
        }
    }

    pub fn render_counter(&self, counter: &CounterState) {
        let colored_text = match counter.severity {
            Severity::Normal => counter.text.bright_black(),
            Severity::Warning => counter.text.yellow(),
            Severity::Critical => counter.text.red().bold(),
        };
        println!("{}", colored_text);
    }

    /// Shown on entering AwaitingReply; cleared on either outcome.
    pub fn typing_on(&self) {
        print!("{}", TYPING_TEXT.bright_black());
        let _ = io::stdout().flush();
    }

    pub fn typing_off(&self) {
        // Overwrite the indicator line in place.
        print!("\r{}\r", " ".repeat(TYPING_TEXT.chars().count() + 2));
        let _ = io::stdout().flush();
    }

    pub fn render_detail_open(&self, n: usize, reply: &BotReply) {
        println!("{}", format!("───── reply #{} details ─────", n).cyan());
        println!("{}", format_detail_block(reply));
        println!("{}", "─────────────────────────────".cyan());
        println!(
            "{}",
            "(press Enter or type /close to dismiss)".bright_black()
        );
    }

    pub fn render_detail_closed(&self) {
        println!("{}", "Detail view closed.".bright_black());
    }

    pub fn render_cleared(&self, entries: &[TranscriptEntry]) {
        println!("{}", "🧹 Chat cleared.".yellow());
        for entry in entries {
            self.render_entry(entry);
        }
    }

    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠️".yellow(), message);
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
