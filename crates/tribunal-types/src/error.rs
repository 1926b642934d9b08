use thiserror::Error;

/// Errors that can occur when constructing or parsing core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesError {
    #[error("Invalid account id length: {0}")]
    InvalidAccountLength(usize),

    #[error("Invalid account id format: {0}")]
    InvalidAccountFormat(String),

    #[error("Bech32 error: {0}")]
    Bech32Error(String),

    #[error("Hex error: {0}")]
    HexError(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

impl From<hex::FromHexError> for TypesError {
    fn from(e: hex::FromHexError) -> Self {
        TypesError::HexError(e.to_string())
    }
}
