//! Error types for typed store reads

/// Errors raised by typed getters on [`ConfigStore`](crate::ConfigStore)
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Value present but not parseable as an integer
    #[error("value for '{key}' is not an integer: '{value}'")]
    InvalidInt {
        /// Key that was read
        key: String,
        /// Offending raw value
        value: String,
    },

    /// Value present but not parseable as a boolean
    #[error("value for '{key}' is not a boolean: '{value}'")]
    InvalidBool {
        /// Key that was read
        key: String,
        /// Offending raw value
        value: String,
    },
}
