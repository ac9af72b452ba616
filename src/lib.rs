pub mod config;
pub mod error;
pub mod handlers;
pub mod intent;
pub mod models;
pub mod service;
pub mod session;
pub mod store;
pub mod synth;
pub mod transport;
pub mod weather;

pub use config::Config;
pub use error::{AssistantError, Result};
pub use service::AssistantService;
pub use session::SessionController;
