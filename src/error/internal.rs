use thiserror::Error;

/// Unexpected data from Discord or the database indicating a bug or
/// misconfiguration rather than a transient fault.
#[derive(Error, Debug)]
pub enum InternalError {
    /// The counting game stored a negative value, which has no binary form.
    #[error("Counter value {0} is negative")]
    NegativeCounter(i64),

    /// The configured guild is neither cached nor reachable over HTTP.
    #[error("Guild {0} is not available to the bot")]
    MissingGuild(u64),

    /// Failure to convert Unix timestamp to Discord timestamp
    ///
    /// Occurs when a valid Unix timestamp cannot be converted to Discord's
    /// timestamp format, typically due to timestamp being out of range.
    #[error("Failed to convert Unix timestamp {timestamp} to Discord timestamp: {reason}")]
    InvalidDiscordTimestamp {
        /// The Unix timestamp that failed to convert
        timestamp: i64,
        /// The reason for conversion failure
        reason: String,
    },
}
