//! # promptvault-auth
//!
//! Authorization for the PromptVault content API.
//!
//! ## Modules
//!
//! - `rbac`: role hierarchy, condition predicates, policy rule set, and the decision engine
//! - `resolver`: per-kind resource snapshot lookup
//! - `enforcement`: the [`Authorizer`] boundary used by request handlers

pub mod enforcement;
pub mod rbac;
pub mod resolver;

pub use enforcement::{
    AuthorizeRequest, Authorizer, AuthorizerBuilder, BroadcastEventSink, denial_error,
    denial_message, denial_title,
};
pub use rbac::{
    Condition, Decision, DecisionEngine, DenyReason, Explanation, PolicyRule, PolicyRuleSet,
    RuleEvaluation,
};
pub use resolver::{MemoryResolver, ResolverRegistry, ResourceResolver};
