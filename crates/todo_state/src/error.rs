//! State layer error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Api(#[from] todo_client::ApiError),

    #[error("todo list not found: {0}")]
    ListNotFound(String),

    #[error("task not found: {0}")]
    TaskNotFound(String),
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("session not found")]
    NotFound,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
