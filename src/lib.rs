pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod http;
pub mod utils;

pub use adapters::mailer::{HttpMailer, NoopMailer};
pub use adapters::store::{JsonlStore, MemoryStore};
pub use config::{AppConfig, Args};
pub use core::pipeline::SubmissionPipeline;
pub use http::{router, serve, AppState};
pub use utils::error::{GatewayError, Result};
