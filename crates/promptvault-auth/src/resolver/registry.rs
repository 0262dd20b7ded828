//! Registry mapping each resource kind to its resolver.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info, warn};

use promptvault_core::error::AppError;
use promptvault_core::result::AppResult;
use promptvault_entity::permission::ResourceKind;
use promptvault_entity::resource::Resource;

use super::{FnResolver, ResourceResolver};

/// Resource kind → resolver.
///
/// Populated at startup, then shared read-only by the authorizer.
#[derive(Debug, Clone, Default)]
pub struct ResolverRegistry {
    resolvers: HashMap<ResourceKind, Arc<dyn ResourceResolver>>,
}

impl ResolverRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the resolver for `kind`, replacing any previous one.
    pub fn register(
        &mut self,
        kind: ResourceKind,
        resolver: Arc<dyn ResourceResolver>,
    ) -> &mut Self {
        if self.resolvers.insert(kind, resolver).is_some() {
            warn!(resource_kind = %kind, "Resolver replaced");
        } else {
            info!(resource_kind = %kind, "Resolver registered");
        }
        self
    }

    /// Registers an async closure as the resolver for `kind`.
    pub fn register_fn<F, Fut>(&mut self, kind: ResourceKind, f: F) -> &mut Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<Option<Resource>>> + Send + 'static,
    {
        self.register(kind, Arc::new(FnResolver::new(f)))
    }

    /// Whether a resolver is registered for `kind`.
    pub fn has(&self, kind: ResourceKind) -> bool {
        self.resolvers.contains_key(&kind)
    }

    /// Kinds with a registered resolver.
    pub fn kinds(&self) -> Vec<ResourceKind> {
        let mut kinds: Vec<_> = self.resolvers.keys().copied().collect();
        kinds.sort();
        kinds
    }

    /// Fetches the snapshot of `kind` with the given id.
    ///
    /// Returns `Ok(None)` when the resource does not exist. Fails with a
    /// configuration error if no resolver is registered for `kind`, and with
    /// an internal error if the resolver returns a snapshot of another kind.
    pub async fn resolve(&self, kind: ResourceKind, id: &str) -> AppResult<Option<Resource>> {
        let resolver = self.resolvers.get(&kind).ok_or_else(|| {
            AppError::configuration(format!("No resolver registered for resource kind {kind}"))
        })?;

        let resource = resolver.resolve(id).await?;

        match resource {
            Some(resource) if resource.kind() != kind => Err(AppError::internal(format!(
                "Resolver for {kind} returned a {} snapshot",
                resource.kind()
            ))),
            Some(resource) => {
                debug!(resource_kind = %kind, resource_id = %id, "Resource resolved");
                Ok(Some(resource))
            }
            None => {
                debug!(resource_kind = %kind, resource_id = %id, "Resource not found");
                Ok(None)
            }
        }
    }
}
