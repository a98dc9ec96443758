use thiserror::Error;

use crate::types::Channel;

#[derive(Debug, Error)]
pub enum Error {
    /// The query was blank after trimming.
    #[error("Search string cannot be empty")]
    EmptyQuery,

    /// One channel could not produce results; recoverable at the search level.
    #[error("Retrieval failed on {channel} channel: {reason}")]
    Retrieval { channel: Channel, reason: String },

    /// Neither channel produced results.
    #[error("Search failed: direct channel: {direct}; fuzzy channel: {fuzzy}")]
    SearchFailed { direct: String, fuzzy: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub fn retrieval(channel: Channel, reason: impl std::fmt::Display) -> Self {
        Error::Retrieval { channel, reason: reason.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
