//! # promptvault-entity
//!
//! Domain entity models for PromptVault authorization. Principals, roles,
//! actions, resource kinds, and the immutable resource snapshots that the
//! decision engine reads. Every type derives `Debug`, `Clone`,
//! `Serialize`, and `Deserialize`.

pub mod permission;
pub mod resource;
pub mod user;

pub use permission::{Action, ResourceKind};
pub use resource::{Resource, ResourceMeta};
pub use user::{Principal, Role};
