//! Core traits defined in `promptvault-core` and implemented by other crates.

pub mod sink;

pub use sink::EventSink;
