use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("probe channel closed: {0}")]
    ChannelClosed(#[from] flume::RecvError),

    #[error("probe channel send failed: {0}")]
    SendFailed(String),
}

pub type Result<T> = std::result::Result<T, Error>;
