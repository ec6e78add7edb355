//! Penwright: backend for an AI-assisted text editor.
//!
//! Exposes a liveness probe and a text processing endpoint that forwards
//! edits to an OpenAI-compatible chat-completions API.

pub mod config;
pub mod editor;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
