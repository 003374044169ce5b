use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid holding: {reason}")]
    InvalidHolding { reason: String },

    #[error("Holding {id} not found")]
    NotFound { id: u64 },
}

pub type PortfolioResult<T> = Result<T, PortfolioError>;
