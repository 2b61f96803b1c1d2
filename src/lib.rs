//! Sheetbridge - Google Sheets export bridge for LLM agents
//!
//! Exposes a single `export_to_sheet` tool over a lightweight discovery +
//! invocation protocol, plus a keep-alive event stream for connected agents.

pub mod config;
pub mod error;
pub mod mcp;
pub mod server;
pub mod sheets;
pub mod stream;

pub use config::Config;
pub use error::{BridgeError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
