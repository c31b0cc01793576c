use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unsupported element type: {0}")]
    UnsupportedElementType(String),
}
