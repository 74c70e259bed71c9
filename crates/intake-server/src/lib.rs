pub mod bootstrap;
pub mod config;
pub mod handlers;
pub mod hooks;
pub mod observability;
pub mod server;
pub mod usecases;

pub use bootstrap::{build_state, AppState};
pub use config::{load_config, AppConfig, ServerConfig, StorageBackend, StorageConfig};
pub use observability::{apply_logging_level, init_tracing};
pub use server::{build_app, IntakeServer, ServerBuilder};
