//! Resource snapshot lookup, one resolver per resource kind.

pub mod memory;
pub mod registry;

use std::fmt;
use std::future::Future;

use async_trait::async_trait;

use promptvault_core::result::AppResult;
use promptvault_entity::resource::Resource;

pub use memory::MemoryResolver;
pub use registry::ResolverRegistry;

/// Fetches the current snapshot of a resource by id.
///
/// Implemented by the persistence layer. `Ok(None)` means the resource
/// does not exist; an error with [`ErrorKind::NotFound`] is treated the
/// same way. Any other error is a resolution failure.
///
/// [`ErrorKind::NotFound`]: promptvault_core::error::ErrorKind::NotFound
#[async_trait]
pub trait ResourceResolver: Send + Sync + fmt::Debug + 'static {
    /// Look up the resource with the given id.
    async fn resolve(&self, id: &str) -> AppResult<Option<Resource>>;
}

/// Adapts an async closure into a [`ResourceResolver`].
pub struct FnResolver<F> {
    f: F,
}

impl<F> FnResolver<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> fmt::Debug for FnResolver<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnResolver").finish_non_exhaustive()
    }
}

#[async_trait]
impl<F, Fut> ResourceResolver for FnResolver<F>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = AppResult<Option<Resource>>> + Send + 'static,
{
    async fn resolve(&self, id: &str) -> AppResult<Option<Resource>> {
        (self.f)(id.to_string()).await
    }
}
