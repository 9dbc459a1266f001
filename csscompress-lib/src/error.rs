//! Error types for the compressor core.

/// Result type alias for compressor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can abort a compression run.
///
/// Malformed selectors, declarations and colour literals are never errors;
/// they pass through unchanged. The only fatal condition is missing or
/// unreadable colour table data.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A canonical colour table could not be loaded or parsed.
    #[error("failed to load color table '{table}': {message}")]
    ResourceLoad { table: &'static str, message: String },
}

impl Error {
    /// Create a resource load error for the named table.
    pub fn resource_load(table: &'static str, message: impl Into<String>) -> Self {
        Self::ResourceLoad {
            table,
            message: message.into(),
        }
    }
}
