use thiserror::Error;

use crate::marshal::BoxError;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("attempted to encode unsupported type: {0}")]
    UnsupportedType(&'static str),

    #[error("custom encoder failed: {0}")]
    Custom(#[source] BoxError),

    #[error("failed to write to sink: {0}")]
    Io(#[from] std::io::Error),
}
