use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::models::BotReply;

/// Truncate a string to at most `max_chars` characters, appending "..." when
/// anything was cut. Char-based to stay safe with multibyte input.
pub fn safe_truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let trunc_chars = if max_chars >= 3 { max_chars - 3 } else { 0 };
        format!("{}...", s.chars().take(trunc_chars).collect::<String>())
    }
}

#[derive(Serialize)]
struct LogEntry {
    timestamp: String, // ISO-8601 UTC
    role: String,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sentiment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    confidence: Option<f64>,
}

/// Appends one JSONL line per conversational turn under `logs/`.
///
/// Logging is best-effort: write failures go to stderr and never interrupt
/// the session.
pub struct ConversationLogger {
    file_path: PathBuf,
    file: Option<tokio::fs::File>,
}

impl ConversationLogger {
    /// Create a new logger; generates the file name based on the current UTC time.
    pub async fn new(base_dir: &Path) -> Result<Self> {
        let logs_dir = base_dir.join("logs");
        fs::create_dir_all(&logs_dir).await?;

        let now: DateTime<Utc> = Utc::now();
        let filename = format!("solvechat-{}.jsonl", now.format("%Y-%m-%d-%H%M%S"));
        let file_path = logs_dir.join(filename);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)
            .await?;
        Ok(Self {
            file_path,
            file: Some(file),
        })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Append a user turn.
    pub async fn log_user(&mut self, content: &str) {
        self.write_entry(LogEntry {
            timestamp: Utc::now().to_rfc3339(),
            role: "user".to_string(),
            content: content.to_string(),
            response_type: None,
            sentiment: None,
            confidence: None,
        })
        .await;
    }

    /// Append a bot turn with its classification metadata.
    pub async fn log_bot(&mut self, reply: &BotReply) {
        self.write_entry(LogEntry {
            timestamp: Utc::now().to_rfc3339(),
            role: "bot".to_string(),
            content: reply.bot_response.clone(),
            response_type: Some(reply.response_type.clone()),
            sentiment: Some(reply.sentiment.clone()),
            confidence: Some(reply.confidence),
        })
        .await;
    }

    async fn write_entry(&mut self, entry: LogEntry) {
        if let Some(file) = &mut self.file {
            if let Ok(json) = serde_json::to_string(&entry) {
                if let Err(e) = file.write_all(json.as_bytes()).await {
                    eprintln!("[Logging error] {}", e);
                } else if let Err(e) = file.write_all(b"\n").await {
                    eprintln!("[Logging error] {}", e);
                }
            }
        }
    }

    /// Close the logger (explicit drop). Called on graceful shutdown.
    pub async fn shutdown(&mut self) {
        if let Some(file) = self.file.take() {
            let _ = file.sync_all().await;
        }
    }
}
