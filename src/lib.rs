pub mod config;
pub mod error;
pub mod fetch;
pub mod process;
pub mod server;
pub mod tracking;

pub use config::Config;
pub use error::LookupError;
pub use server::{Webhook, WebhookRequest, WebhookResponse};
