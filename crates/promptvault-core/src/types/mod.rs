//! Core type definitions used across the PromptVault workspace.

pub mod id;

pub use id::*;
