use serde::Deserialize;

/// Tag prefix the backend uses for problem-solver replies
/// (e.g. "problem_solution_algebra", "problem_solution_derivative").
pub const PROBLEM_SOLUTION_PREFIX: &str = "problem_solution_";

/// Structured reply from `POST /chat`.
///
/// The backend owns validation; everything here is deserialized leniently so
/// a missing field renders as empty rather than failing the whole turn.
#[derive(Debug, Clone, Deserialize)]
pub struct BotReply {
    #[serde(default)]
    pub bot_response: String,
    #[serde(default)]
    pub response_type: String,
    #[serde(default)]
    pub sentiment: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub solution_details: Option<SolutionDetails>,
    /// Echo of the submitted message; informational only.
    #[serde(default)]
    pub user_message: Option<String>,
    /// Server-side timestamp string; the transcript uses render time instead.
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Solver payload nested inside problem-solution replies.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SolutionDetails {
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl SolutionDetails {
    /// The backend sends `{}` when there is no solver payload.
    pub fn is_empty(&self) -> bool {
        self.answer.is_empty() && self.explanation.is_empty() && self.kind.is_empty()
    }
}

/// Rendering path selected from the open `response_type` tag.
///
/// Unrecognized tags fall through to `Plain`, which keeps the client forward
/// compatible with new backend classifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyKind {
    ProblemSolution { category: String },
    Plain,
}

impl BotReply {
    pub fn kind(&self) -> ReplyKind {
        match self.response_type.strip_prefix(PROBLEM_SOLUTION_PREFIX) {
            Some(category) => ReplyKind::ProblemSolution {
                category: category.to_string(),
            },
            None => ReplyKind::Plain,
        }
    }

    /// Solver payload, treating the backend's empty `{}` as absent.
    pub fn solution(&self) -> Option<&SolutionDetails> {
        self.solution_details.as_ref().filter(|d| !d.is_empty())
    }

    fn synthetic(text: &str, response_type: &str, sentiment: &str, confidence: f64) -> Self {
        Self {
            bot_response: text.to_string(),
            response_type: response_type.to_string(),
            sentiment: sentiment.to_string(),
            confidence,
            solution_details: None,
            user_message: None,
            timestamp: None,
        }
    }

    /// Fallback turn for a failed exchange. Shaped exactly like a normal
    /// reply so the rendering path has one shape to handle.
    pub fn connectivity_fallback() -> Self {
        Self::synthetic(
            "Sorry, I couldn't reach the chat service. Please check that the \
             backend is running and try again.",
            "error",
            "NEUTRAL",
            0.0,
        )
    }

    /// Synthesized confirmation appended after a transcript clear.
    pub fn clear_confirmation() -> Self {
        Self::synthetic(
            "Chat cleared. What would you like to talk about?",
            "system",
            "POSITIVE",
            1.0,
        )
    }

    /// Fixed greeting that opens every transcript.
    pub fn welcome() -> Self {
        Self::synthetic(
            "Hi! I'm your study assistant. Ask me anything - math problems, \
             science questions, unit conversions, or just chat.",
            "system",
            "POSITIVE",
            1.0,
        )
    }
}

/// Response body of `GET /health`.
#[derive(Debug, Deserialize)]
pub struct HealthReport {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Response body of `POST /solve`.
#[derive(Debug, Deserialize)]
pub struct SolveReport {
    #[serde(default)]
    pub problem: String,
    #[serde(default)]
    pub solution: SolutionDetails,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_problem_solution_reply() {
        let json = r#"{
            "user_message": "solve 2x + 5 = 15",
            "bot_response": "x = 5\nSubtract 5, then divide by 2.",
            "response_type": "problem_solution_algebra",
            "sentiment": "POSITIVE",
            "confidence": 0.87,
            "timestamp": "2026-08-30 12:00:00",
            "solution_details": {
                "answer": "x = 5",
                "explanation": "Subtract 5, then divide by 2.",
                "type": "algebra"
            }
        }"#;

        let reply: BotReply = serde_json::from_str(json).unwrap();
        assert_eq!(
            reply.kind(),
            ReplyKind::ProblemSolution {
                category: "algebra".to_string()
            }
        );
        let details = reply.solution().expect("solution payload");
        assert_eq!(details.kind, "algebra");
        assert!(reply.bot_response.contains('\n'));
    }

    #[test]
    fn empty_solution_details_object_counts_as_absent() {
        // The backend emits "solution_details": {} on non-solver turns.
        let json = r#"{
            "bot_response": "Hello!",
            "response_type": "rule_based",
            "sentiment": "POSITIVE",
            "confidence": 0.99,
            "solution_details": {}
        }"#;

        let reply: BotReply = serde_json::from_str(json).unwrap();
        assert_eq!(reply.kind(), ReplyKind::Plain);
        assert!(reply.solution().is_none());
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let reply: BotReply = serde_json::from_str("{}").unwrap();
        assert_eq!(reply.bot_response, "");
        assert_eq!(reply.response_type, "");
        assert_eq!(reply.sentiment, "");
        assert_eq!(reply.confidence, 0.0);
        assert_eq!(reply.kind(), ReplyKind::Plain);
        assert!(reply.solution().is_none());
    }

    #[test]
    fn unprefixed_tags_render_plain() {
        let reply = BotReply::synthetic("answer", "faq", "NEUTRAL", 0.5);
        assert_eq!(reply.kind(), ReplyKind::Plain);
    }

    #[test]
    fn synthetic_turns_carry_fixed_metadata() {
        let err = BotReply::connectivity_fallback();
        assert_eq!(err.response_type, "error");
        assert_eq!(err.sentiment, "NEUTRAL");
        assert_eq!(err.confidence, 0.0);

        let cleared = BotReply::clear_confirmation();
        assert_eq!(cleared.response_type, "system");
        assert_eq!(cleared.sentiment, "POSITIVE");
        assert_eq!(cleared.confidence, 1.0);
    }
}
