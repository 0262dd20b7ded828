//! Startup assembly of an [`Authorizer`].

use std::future::Future;
use std::sync::Arc;

use tracing::info;

use promptvault_core::config::AuthzConfig;
use promptvault_core::error::AppError;
use promptvault_core::result::AppResult;
use promptvault_core::traits::EventSink;
use promptvault_entity::permission::ResourceKind;
use promptvault_entity::resource::{Resource, SensitivityClassifier};

use super::authorizer::Authorizer;
use crate::rbac::{DecisionEngine, PolicyRuleSet};
use crate::resolver::{ResolverRegistry, ResourceResolver};

/// Collects rules, resolvers and sinks, then validates them together.
///
/// Every failure from [`build`](Self::build) is a configuration error and
/// is meant to stop the process at startup.
#[derive(Debug)]
pub struct AuthorizerBuilder {
    config: AuthzConfig,
    rules: Option<PolicyRuleSet>,
    registry: ResolverRegistry,
    sinks: Vec<Arc<dyn EventSink>>,
    snapshot_only: bool,
}

impl AuthorizerBuilder {
    /// Creates a builder using the standard rule table for `config`.
    pub fn new(config: AuthzConfig) -> Self {
        Self {
            config,
            rules: None,
            registry: ResolverRegistry::new(),
            sinks: Vec::new(),
            snapshot_only: false,
        }
    }

    /// Replaces the standard rule table.
    pub fn rules(mut self, rules: PolicyRuleSet) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Registers the resolver for `kind`.
    pub fn resolver(mut self, kind: ResourceKind, resolver: Arc<dyn ResourceResolver>) -> Self {
        self.registry.register(kind, resolver);
        self
    }

    /// Registers an async closure as the resolver for `kind`.
    pub fn resolver_fn<F, Fut>(mut self, kind: ResourceKind, f: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<Option<Resource>>> + Send + 'static,
    {
        self.registry.register_fn(kind, f);
        self
    }

    /// Adds a decision-event sink.
    pub fn sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Skips the resolver coverage check.
    ///
    /// For callers that only use
    /// [`Authorizer::authorize_snapshot`], such as offline policy checks.
    pub fn snapshot_only(mut self) -> Self {
        self.snapshot_only = true;
        self
    }

    /// Validates the configuration and builds the authorizer.
    pub fn build(self) -> AppResult<Authorizer> {
        let rules = match self.rules {
            Some(rules) => rules,
            None => PolicyRuleSet::standard(&self.config)?,
        };

        if self.config.require_resolvers && !self.snapshot_only {
            let missing: Vec<&str> = rules
                .kinds_requiring_resources()
                .into_iter()
                .filter(|kind| !self.registry.has(*kind))
                .map(|kind| kind.as_str())
                .collect();

            if !missing.is_empty() {
                return Err(AppError::configuration(format!(
                    "Missing resource resolvers for: {}",
                    missing.join(", ")
                )));
            }
        }

        let classifier = SensitivityClassifier::new(&self.config.sensitive_tags);

        info!(
            rules = rules.len(),
            resolvers = self.registry.kinds().len(),
            sinks = self.sinks.len(),
            moderator_admin_content = ?self.config.moderator_admin_content,
            "Authorizer initialized"
        );

        Ok(Authorizer::from_parts(
            DecisionEngine::new(rules),
            self.registry,
            self.sinks,
            classifier,
        ))
    }
}
