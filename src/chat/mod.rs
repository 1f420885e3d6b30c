// Chat module - session state, transcript, and input handling
pub mod composer;
pub mod session;
pub mod transcript;

#[cfg(test)]
mod tests;

pub use session::{ChatSession, Intent};
