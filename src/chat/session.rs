use anyhow::Result;

use crate::api::{ApiClient, TransportError};
use crate::chat::composer::{accept_input, counter_state};
use crate::chat::transcript::{Transcript, TranscriptEntry};
use crate::logging::ConversationLogger;
use crate::models::{BotReply, HealthReport, SolveReport};
use crate::render::Renderer;

/// Fixed set of user actions. Every interaction the terminal surface can
/// produce maps to exactly one of these, consumed synchronously by the
/// session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Submit(String),
    TextChanged(String),
    Clear,
    OpenDetail(usize),
    CloseDetail,
}

/// Renderer state machine per pending exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangePhase {
    Idle,
    AwaitingReply,
    RenderedSuccess,
    RenderedError,
}

/// Process-lifetime session state: the transcript, the pending-exchange
/// phase, the open detail view, and the transport client. Constructed once
/// at startup; there are no ambient globals.
pub struct ChatSession {
    transcript: Transcript,
    phase: ExchangePhase,
    /// Bumped by every clear; exchange completions carrying an older
    /// generation are discarded instead of appended to the new transcript.
    generation: u64,
    open_detail: Option<usize>,
    client: ApiClient,
    renderer: Renderer,
    logger: Option<ConversationLogger>,
}

impl ChatSession {
    pub fn new(client: ApiClient, renderer: Renderer) -> Self {
        Self {
            transcript: Transcript::new(),
            phase: ExchangePhase::Idle,
            generation: 0,
            open_detail: None,
            client,
            renderer,
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: Option<ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn phase(&self) -> ExchangePhase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn detail_open(&self) -> bool {
        self.open_detail.is_some()
    }

    pub fn endpoint(&self) -> &str {
        self.client.base_url()
    }

    /// Render every transcript entry in order (used to show the opening
    /// welcome turn).
    pub fn render_transcript(&self) {
        for entry in self.transcript.entries() {
            self.renderer.render_entry(entry);
        }
    }

    /// Consume one user intent. The only suspension point is the network
    /// exchange inside `Submit`.
    pub async fn dispatch(&mut self, intent: Intent) -> Result<()> {
        match intent {
            Intent::Submit(text) => self.submit(&text).await,
            Intent::TextChanged(text) => {
                self.renderer.render_counter(&counter_state(&text));
                Ok(())
            }
            Intent::Clear => {
                self.clear();
                Ok(())
            }
            Intent::OpenDetail(n) => {
                self.open_detail(n);
                Ok(())
            }
            Intent::CloseDetail => {
                self.close_detail();
                Ok(())
            }
        }
    }

    /// One full exchange: user entry, network round trip, bot entry. A
    /// transport failure becomes the synthetic error turn; it never surfaces
    /// as a raw fault.
    async fn submit(&mut self, raw: &str) -> Result<()> {
        let Some(text) = accept_input(raw) else {
            // Blank input: no entry, no network call.
            return Ok(());
        };

        let user_entry = TranscriptEntry::user(text.as_str());
        self.renderer.render_user(&user_entry);
        self.transcript.push(user_entry);
        if let Some(logger) = &mut self.logger {
            logger.log_user(&text).await;
        }

        let generation = self.generation;
        self.phase = ExchangePhase::AwaitingReply;
        self.renderer.typing_on();
        let result = self.client.exchange(&text).await;
        self.renderer.typing_off();

        let reply = match result {
            Ok(reply) => {
                self.phase = ExchangePhase::RenderedSuccess;
                reply
            }
            Err(_) => {
                self.phase = ExchangePhase::RenderedError;
                BotReply::connectivity_fallback()
            }
        };

        self.complete_exchange(generation, reply).await;
        self.phase = ExchangePhase::Idle;
        Ok(())
    }

    /// Append the bot turn unless the transcript was cleared while the
    /// exchange was in flight.
    pub(crate) async fn complete_exchange(&mut self, generation: u64, reply: BotReply) -> bool {
        if generation != self.generation {
            return false;
        }
        if let Some(logger) = &mut self.logger {
            logger.log_bot(&reply).await;
        }
        let entry = TranscriptEntry::bot(reply);
        self.renderer.render_bot(&entry);
        self.transcript.push(entry);
        true
    }

    fn clear(&mut self) {
        self.generation += 1;
        self.open_detail = None;
        self.transcript.reset();
        self.renderer.render_cleared(self.transcript.entries());
    }

    fn open_detail(&mut self, n: usize) {
        match self.transcript.bot_entry(n).and_then(|e| e.reply.clone()) {
            Some(reply) => {
                self.open_detail = Some(n);
                self.renderer.render_detail_open(n, &reply);
            }
            None => {
                self.renderer.warn(&format!(
                    "No bot reply #{} (transcript has {})",
                    n,
                    self.transcript.bot_count()
                ));
            }
        }
    }

    fn close_detail(&mut self) {
        if self.open_detail.take().is_some() {
            self.renderer.render_detail_closed();
        }
    }

    pub async fn health(&self) -> Result<HealthReport, TransportError> {
        self.client.health().await
    }

    pub async fn solve(&self, problem: &str) -> Result<SolveReport, TransportError> {
        self.client.solve(problem).await
    }

    /// Graceful shutdown: flush and close the conversation log.
    pub async fn shutdown(&mut self) {
        if let Some(logger) = &mut self.logger {
            logger.shutdown().await;
        }
    }
}
