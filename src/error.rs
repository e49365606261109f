use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Referenced movie (or its ratings) does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Input rejected before it reached the database.
    #[error("{0}")]
    Validation(String),

    /// Write violated a unique or foreign key constraint.
    #[error("{0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(DbErr),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => {
                Self::Conflict(format!("unique constraint violated: {msg}"))
            },
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
                Self::Conflict(format!("foreign key constraint violated: {msg}"))
            },
            _ => Self::Database(err),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(err) => {
                tracing::error!(error = %err, "database error");
                StatusCode::INTERNAL_SERVER_ERROR
            },
        };

        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
