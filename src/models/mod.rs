// Models module - data structures for backend communication
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{ChatRequest, SolveRequest};
pub use responses::{BotReply, HealthReport, ReplyKind, SolutionDetails, SolveReport};
