//! Principal and role entities.

pub mod principal;
pub mod role;

pub use principal::Principal;
pub use role::Role;
