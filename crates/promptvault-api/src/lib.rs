//! # promptvault-api
//!
//! HTTP boundary for PromptVault authorization. Converts decisions and
//! errors into Axum responses with a `{code, error, message}` body:
//! `RESOURCE_NOT_FOUND` → 404, any other denial → 403, resolver
//! failures → 500.

pub mod error;
pub mod guard;

pub use error::{ApiError, ApiErrorResponse};
pub use guard::{enforce, guard};
