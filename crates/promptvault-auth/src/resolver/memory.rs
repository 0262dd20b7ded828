//! In-memory resolver backed by a map of snapshots.

use std::collections::HashMap;

use async_trait::async_trait;

use promptvault_core::result::AppResult;
use promptvault_entity::resource::Resource;

use super::ResourceResolver;

/// Resolver over a fixed set of snapshots, keyed by resource id.
///
/// Used by tests and by the policy CLI, where snapshots come from the
/// command line rather than a database.
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    resources: HashMap<String, Resource>,
}

impl MemoryResolver {
    /// Creates an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a snapshot, keyed by its own id.
    pub fn with(mut self, resource: Resource) -> Self {
        self.insert(resource);
        self
    }

    /// Adds or replaces a snapshot.
    pub fn insert(&mut self, resource: Resource) {
        self.resources
            .insert(resource.id().as_str().to_string(), resource);
    }

    /// Looks up a snapshot without going through the resolver trait.
    pub fn get(&self, id: &str) -> Option<&Resource> {
        self.resources.get(id)
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether no snapshots are stored.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[async_trait]
impl ResourceResolver for MemoryResolver {
    async fn resolve(&self, id: &str) -> AppResult<Option<Resource>> {
        Ok(self.resources.get(id).cloned())
    }
}
