//! Convenience result type alias for PromptVault.

use crate::error::AppError;

/// A specialized `Result` type for PromptVault operations.
pub type AppResult<T> = Result<T, AppError>;
