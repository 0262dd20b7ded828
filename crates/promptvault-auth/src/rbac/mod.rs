//! Role-based access control: role model, rules, and decisions.

pub mod condition;
pub mod engine;
pub mod hierarchy;
pub mod policies;

pub use condition::Condition;
pub use engine::{Decision, DecisionEngine, DenyReason, Explanation, RuleEvaluation};
pub use hierarchy::{role_at_least, subsumed_roles};
pub use policies::{PolicyRule, PolicyRuleSet, PolicyRuleSetBuilder};
