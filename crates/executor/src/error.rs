use thiserror::Error;

use common::error::Error as PathError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigLoadError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Malformed graph description at token {token}: {message}")]
    MalformedGraph { token: usize, message: String },

    #[error("Malformed query input: {0}")]
    MalformedQuery(String),

    #[error("Channel sender failed: Receiver has been dropped.")]
    ChannelSendFailed,

    #[error("Graph processing error: {0}")]
    GraphError(#[from] PathError),

    #[error("Query task failed: {0}")]
    TaskJoinFailed(#[from] tokio::task::JoinError),
}
