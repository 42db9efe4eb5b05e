pub mod client;
pub mod conversation;
pub mod messages;
pub mod processor;

pub use client::OmniStackClient;
pub use conversation::{Conversation, ConversationOutcome};
pub use processor::process_model_response;
