//! Statement field extraction and reconciliation.

mod chat;
mod completer;
mod decoder;
pub mod formulas;
mod merge;
mod prompt;
mod reconciler;
pub mod rules;
pub mod validity;

pub use chat::ChatPromptBuilder;
pub use completer::complete;
pub use decoder::decode_reply;
pub use merge::merge;
pub use prompt::PromptBuilder;
pub use reconciler::Reconciler;
pub use rules::extract_patterns;
pub use validity::{is_valid, Validity};
