use thiserror::Error;

#[derive(Debug, Error)]
pub enum CustidError {
    #[error("invalid option {name}: {message}")]
    InvalidOption { name: &'static str, message: String },
}

pub type Result<T> = std::result::Result<T, CustidError>;
