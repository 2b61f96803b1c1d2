//! Runtime configuration
//!
//! Built once at startup from CLI flags / environment and passed into the
//! handlers through shared state. Handlers never read the process
//! environment themselves.

use std::time::Duration;

/// Default sheet/tab name when none is configured
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Default listening port
pub const DEFAULT_PORT: u16 = 3000;

/// Default keep-alive ping interval
pub const DEFAULT_PING_INTERVAL: Duration = Duration::from_secs(10);

/// Read-only process-wide configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON-encoded service account key material. Absence is reported
    /// per-invocation as a configuration error, not a startup crash.
    pub service_account: Option<String>,
    /// Target spreadsheet identifier
    pub spreadsheet_id: Option<String>,
    /// Target sheet/tab name
    pub sheet_name: String,
    /// Interval between keep-alive pings on the event stream
    pub ping_interval: Duration,
    /// Listening port
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_account: None,
            spreadsheet_id: None,
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            ping_interval: DEFAULT_PING_INTERVAL,
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// A1-notation range appends are issued against
    pub fn append_range(&self) -> String {
        format!("{}!A1", self.sheet_name)
    }
}
