pub mod auth;
pub mod commands;
pub mod config;
pub mod database;
pub mod error;
pub mod grader;
pub mod intent;
pub mod keyboard;
pub mod logging;
mod messages;
pub mod router;
pub mod state;
pub mod transport;

pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type HandlerResult = Result<(), BoxedError>;
