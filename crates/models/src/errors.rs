use thiserror::Error;

use crate::booking::BookingStatus;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("transition not allowed: {from} -> {to}")]
    Transition { from: BookingStatus, to: BookingStatus },
    #[error("database error: {0}")]
    Db(String),
}
