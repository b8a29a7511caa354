use thiserror::Error;

#[derive(Error, Debug)]
pub enum VendingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid seed data: {0}")]
    InvalidSeed(String),
    #[error("Unknown item code: {0}")]
    UnknownCode(String),
    #[error("Item {0} is out of stock")]
    OutOfStock(String),
    #[error("Not a valid amount: {0}")]
    InvalidAmount(String),
    #[error("Amount must be positive")]
    NonPositiveAmount,
    #[error("Amount exceeds the accepted range")]
    AmountOverflow,
    #[error("Amount is below the smallest accepted unit")]
    AmountTooSmall,
}

pub type Result<T> = std::result::Result<T, VendingError>;
