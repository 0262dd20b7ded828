//! Enforcement adapter: the boundary request handlers call.
//!
//! Resolves resource snapshots, delegates to the decision engine, and
//! logs and publishes every decision. Handlers only ever see
//! [`Decision`](crate::rbac::Decision) values, never the rule set.

pub mod authorizer;
pub mod builder;
pub mod denial;
pub mod request;
pub mod sink;

pub use authorizer::Authorizer;
pub use builder::AuthorizerBuilder;
pub use denial::{denial_error, denial_message, denial_title};
pub use request::AuthorizeRequest;
pub use sink::BroadcastEventSink;
