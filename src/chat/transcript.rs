use chrono::{DateTime, Local};

use crate::models::BotReply;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Bot,
}

/// One rendered conversational turn. Bot turns keep the originating reply
/// around so the detail view can show its metadata later.
#[derive(Debug, Clone)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
    /// Render time, not server time.
    pub timestamp: DateTime<Local>,
    pub reply: Option<BotReply>,
}

impl TranscriptEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
            timestamp: Local::now(),
            reply: None,
        }
    }

    pub fn bot(reply: BotReply) -> Self {
        Self {
            speaker: Speaker::Bot,
            text: reply.bot_response.clone(),
            timestamp: Local::now(),
            reply: Some(reply),
        }
    }

    pub fn welcome() -> Self {
        Self::bot(BotReply::welcome())
    }
}

/// The ordered, in-memory list of turns. Lives for the process lifetime;
/// `reset` is the only wholesale destruction.
#[derive(Debug)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// A fresh transcript always opens with the fixed welcome entry.
    pub fn new() -> Self {
        Self {
            entries: vec![TranscriptEntry::welcome()],
        }
    }

    pub fn push(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    /// Discard everything except the welcome entry, then append the
    /// synthesized confirmation turn.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.entries.push(TranscriptEntry::welcome());
        self.entries
            .push(TranscriptEntry::bot(BotReply::clear_confirmation()));
    }

    /// Look up the `n`-th bot turn (1-based), the addressing scheme the
    /// detail view uses.
    pub fn bot_entry(&self, n: usize) -> Option<&TranscriptEntry> {
        self.entries
            .iter()
            .filter(|e| e.speaker == Speaker::Bot)
            .nth(n.checked_sub(1)?)
    }

    pub fn bot_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.speaker == Speaker::Bot)
            .count()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}
