//! Action and resource-kind vocabulary for RBAC.

pub mod action;
pub mod kind;

pub use action::Action;
pub use kind::ResourceKind;
