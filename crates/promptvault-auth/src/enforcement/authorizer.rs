//! The [`Authorizer`]: resolve, decide, log, publish.

use std::fmt;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use promptvault_core::config::AuthzConfig;
use promptvault_core::error::AppError;
use promptvault_core::events::{AuthzEvent, DomainEvent, EventPayload};
use promptvault_core::result::AppResult;
use promptvault_core::traits::EventSink;
use promptvault_entity::permission::{Action, ResourceKind};
use promptvault_entity::resource::{Resource, SensitivityClassifier};
use promptvault_entity::user::{Principal, Role};

use super::builder::AuthorizerBuilder;
use super::denial::denial_error;
use super::request::AuthorizeRequest;
use crate::rbac::{Decision, DecisionEngine, DenyReason, Explanation};
use crate::resolver::ResolverRegistry;

/// Authorization boundary shared by all request handlers.
///
/// Cheap to clone; all state is immutable and behind `Arc`.
#[derive(Clone)]
pub struct Authorizer {
    engine: DecisionEngine,
    registry: Arc<ResolverRegistry>,
    sinks: Arc<[Arc<dyn EventSink>]>,
    classifier: Arc<SensitivityClassifier>,
}

impl fmt::Debug for Authorizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authorizer")
            .field("rules", &self.engine.rules().len())
            .field("resolvers", &self.registry.kinds())
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl Authorizer {
    /// Starts building an authorizer from configuration.
    pub fn builder(config: AuthzConfig) -> AuthorizerBuilder {
        AuthorizerBuilder::new(config)
    }

    pub(crate) fn from_parts(
        engine: DecisionEngine,
        registry: ResolverRegistry,
        sinks: Vec<Arc<dyn EventSink>>,
        classifier: SensitivityClassifier,
    ) -> Self {
        Self {
            engine,
            registry: Arc::new(registry),
            sinks: sinks.into(),
            classifier: Arc::new(classifier),
        }
    }

    /// The sensitivity classifier built from `authz.sensitive_tags`, for
    /// resolvers that construct prompt snapshots.
    pub fn classifier(&self) -> &SensitivityClassifier {
        &self.classifier
    }

    /// Decides a request, fetching the target snapshot when the rules need it.
    ///
    /// A resource that does not exist yields a `RESOURCE_NOT_FOUND` decision
    /// before any rule is consulted. Resolver failures other than "not
    /// found" are returned as errors.
    pub async fn authorize(
        &self,
        principal: &Principal,
        action: Action,
        kind: ResourceKind,
        resource_id: Option<&str>,
    ) -> AppResult<Decision> {
        let resource = match resource_id {
            Some(id) if self.engine.rules().requires_resource(action, kind) => {
                match self.fetch(kind, id).await? {
                    Some(resource) => Some(resource),
                    None => {
                        let decision = Decision::deny(DenyReason::ResourceNotFound);
                        self.record(
                            principal,
                            action.as_str(),
                            kind.as_str(),
                            resource_id,
                            &decision,
                        );
                        return Ok(decision);
                    }
                }
            }
            _ => None,
        };

        let decision = self.engine.decide(principal, action, kind, resource.as_ref());
        self.record(principal, action.as_str(), kind.as_str(), resource_id, &decision);
        Ok(decision)
    }

    /// Like [`authorize`](Self::authorize), but gives up when `cancel` fires.
    ///
    /// Cancellation yields an `ErrorKind::Cancelled` error; no decision is
    /// produced or recorded.
    pub async fn authorize_cancellable(
        &self,
        principal: &Principal,
        action: Action,
        kind: ResourceKind,
        resource_id: Option<&str>,
        cancel: &CancellationToken,
    ) -> AppResult<Decision> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(
                    principal_id = %principal.id,
                    action = %action,
                    resource_kind = %kind,
                    "Authorization cancelled"
                );
                Err(AppError::cancelled("Authorization cancelled"))
            }
            result = self.authorize(principal, action, kind, resource_id) => result,
        }
    }

    /// Decides a request against a snapshot the caller already holds.
    pub fn authorize_snapshot(
        &self,
        principal: &Principal,
        action: Action,
        kind: ResourceKind,
        resource: Option<&Resource>,
    ) -> Decision {
        let decision = self.engine.decide(principal, action, kind, resource);
        let resource_id = resource.map(|r| r.id().as_str());
        self.record(principal, action.as_str(), kind.as_str(), resource_id, &decision);
        decision
    }

    /// Traces every candidate rule for a request against a snapshot the
    /// caller already holds. Nothing is logged or published.
    pub fn explain(
        &self,
        principal: &Principal,
        action: Action,
        kind: ResourceKind,
        resource: Option<&Resource>,
    ) -> Explanation {
        self.engine.explain(principal, action, kind, resource)
    }

    /// Decides a string-typed request.
    ///
    /// An unknown role is a validation error. An unknown action or
    /// resource kind is denied with `NO_MATCHING_RULE`.
    pub async fn authorize_request(&self, request: &AuthorizeRequest) -> AppResult<Decision> {
        let role: Role = request.role.parse()?;
        let principal = Principal::new(request.principal_id.as_str(), role);

        let action = request.action.parse::<Action>().ok();
        let kind = request.resource_kind.parse::<ResourceKind>().ok();

        match action.zip(kind) {
            Some((action, kind)) => {
                self.authorize(&principal, action, kind, request.resource_id.as_deref())
                    .await
            }
            None => {
                let decision = Decision::deny(DenyReason::NoMatchingRule);
                self.record(
                    &principal,
                    &request.action,
                    &request.resource_kind,
                    request.resource_id.as_deref(),
                    &decision,
                );
                Ok(decision)
            }
        }
    }

    /// Authorizes and converts a denial into an error.
    ///
    /// `RESOURCE_NOT_FOUND` becomes `ErrorKind::NotFound`; every other
    /// denial becomes `ErrorKind::Forbidden`.
    pub async fn require(
        &self,
        principal: &Principal,
        action: Action,
        kind: ResourceKind,
        resource_id: Option<&str>,
    ) -> AppResult<()> {
        let decision = self.authorize(principal, action, kind, resource_id).await?;
        match decision.reason {
            None => Ok(()),
            Some(reason) => Err(denial_error(reason, action, kind)),
        }
    }

    async fn fetch(&self, kind: ResourceKind, id: &str) -> AppResult<Option<Resource>> {
        match self.registry.resolve(kind, id).await {
            Ok(resource) => Ok(resource),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => {
                warn!(
                    resource_kind = %kind,
                    resource_id = %id,
                    error = %e,
                    "Resource resolution failed"
                );
                self.emit(
                    None,
                    AuthzEvent::ResolutionFailed {
                        resource_kind: kind.as_str().to_string(),
                        resource_id: id.to_string(),
                        error: e.message.clone(),
                    },
                );
                Err(e)
            }
        }
    }

    fn record(
        &self,
        principal: &Principal,
        action: &str,
        kind: &str,
        resource_id: Option<&str>,
        decision: &Decision,
    ) {
        let reason = decision.reason.map(|r| r.as_str());

        if decision.allowed {
            debug!(
                principal_id = %principal.id,
                role = %principal.role,
                action = %action,
                resource_kind = %kind,
                resource_id = ?resource_id,
                matched_rule = ?decision.matched_rule.as_ref().map(ToString::to_string),
                "Access allowed"
            );
        } else {
            info!(
                principal_id = %principal.id,
                role = %principal.role,
                action = %action,
                resource_kind = %kind,
                resource_id = ?resource_id,
                reason = reason.unwrap_or_default(),
                "Access denied"
            );
        }

        self.emit(
            Some(principal),
            AuthzEvent::DecisionMade {
                role: principal.role.as_str().to_string(),
                action: action.to_string(),
                resource_kind: kind.to_string(),
                resource_id: resource_id.map(str::to_string),
                allowed: decision.allowed,
                reason: reason.map(str::to_string),
                matched_rule: decision.matched_rule.as_ref().map(ToString::to_string),
            },
        );
    }

    /// Publishes an event to every sink. Sink failures are logged and ignored.
    fn emit(&self, actor: Option<&Principal>, event: AuthzEvent) {
        if self.sinks.is_empty() {
            return;
        }

        let event = DomainEvent::new(actor.map(|p| p.id.clone()), EventPayload::Authz(event));
        for sink in self.sinks.iter() {
            if let Err(e) = sink.publish(&event) {
                warn!(event_id = %event.id, error = %e, "Event sink failed");
            }
        }
    }
}
