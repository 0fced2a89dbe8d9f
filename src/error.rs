use thiserror::Error;

/// Failures of a single request travelling through a resource actor.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Server responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Could not decode response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FrameworkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FrameworkError::Decode(e.to_string())
        } else {
            FrameworkError::Transport(e.to_string())
        }
    }
}

/// Client-side form checks. The display strings are the messages shown to the operator.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Quantity exceeds available stock.")]
    ExceedsStock,
    #[error("Quantity must be greater than zero.")]
    NonPositiveQuantity,
    #[error("Please select a product.")]
    MissingProduct,
    #[error("Please select a user.")]
    MissingUser,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    #[error("User validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(i64),
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },
    #[error("Stock overflow: {stock} + {released}")]
    StockOverflow { stock: u32, released: u32 },
    #[error("Product validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid API base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
    #[error("Could not read config file {path}: {reason}")]
    File { path: String, reason: String },
}
