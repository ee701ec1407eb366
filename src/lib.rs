/// CloudKit-specific types and remote client helpers.
pub mod cloudkit;
/// Secrets loading for CloudKit Web Services access.
pub mod config;

/// Logging verbosity for client operations.
#[derive(Debug, Clone, Copy, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Emit verbose debug output.
    Debug,
    /// Emit standard informational output.
    Information,
}

impl Default for LogLevel {
    /// Defaults to `Information` logging.
    fn default() -> Self {
        LogLevel::Information
    }
}
