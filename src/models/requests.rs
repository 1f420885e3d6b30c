use serde::Serialize;

/// Request body for `POST /chat`
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Request body for `POST /solve`
#[derive(Debug, Serialize)]
pub struct SolveRequest {
    pub problem: String,
}

impl SolveRequest {
    pub fn new(problem: impl Into<String>) -> Self {
        Self {
            problem: problem.into(),
        }
    }
}
