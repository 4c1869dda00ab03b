use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CoreError {
    #[error("Invalid pull request state: {0}")]
    InvalidPrState(String),

    #[error("Invalid repository: {0}")]
    InvalidRepository(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
