pub mod catalog;
pub mod client;
pub mod config;
pub mod models;
pub mod renderer;
pub mod session;
pub mod submit;
pub mod ui;
pub mod validation;

pub use catalog::ModelSelector;
pub use client::{ErrorSink, GroqClient, GROQ_ENDPOINT};
pub use config::Config;
pub use models::{ChatMessage, ChatResponse, Choice, CompletionError, CompletionRequest, Error, Result};
pub use session::Session;
pub use submit::{submit, Outcome};
pub use validation::{validate, Submission, ValidationError};
