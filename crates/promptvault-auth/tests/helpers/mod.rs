//! Shared fixtures for authorizer integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::broadcast;

use promptvault_auth::{Authorizer, BroadcastEventSink, MemoryResolver, ResourceResolver};
use promptvault_core::config::AuthzConfig;
use promptvault_core::error::AppError;
use promptvault_core::events::DomainEvent;
use promptvault_entity::permission::ResourceKind;
use promptvault_entity::resource::{Resource, ReviewStatus};
use promptvault_entity::user::{Principal, Role};

/// Prompt id whose resolver reports `ErrorKind::NotFound`.
pub const GONE: &str = "gone";
/// Prompt id whose resolver fails with a backend error.
pub const BROKEN: &str = "broken";

/// An authorizer over a small in-memory catalog.
pub struct TestCatalog {
    pub authorizer: Authorizer,
    pub events: broadcast::Receiver<DomainEvent>,
    prompt_lookups: Arc<AtomicUsize>,
}

impl TestCatalog {
    pub fn new() -> Self {
        Self::with_config(AuthzConfig::default())
    }

    pub fn with_config(config: AuthzConfig) -> Self {
        let sink = BroadcastEventSink::new(64);
        let events = sink.subscribe();

        let prompts = Arc::new(prompts());
        let prompt_lookups = Arc::new(AtomicUsize::new(0));
        let counter = prompt_lookups.clone();

        let authorizer = Authorizer::builder(config)
            .resolver_fn(ResourceKind::Prompt, move |id| {
                let prompts = prompts.clone();
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    match id.as_str() {
                        GONE => Err(AppError::not_found("prompt row deleted")),
                        BROKEN => Err(AppError::external("connection reset")),
                        _ => prompts.resolve(&id).await,
                    }
                }
            })
            .resolver(ResourceKind::Tag, Arc::new(tags()))
            .resolver(ResourceKind::TagSuggestion, Arc::new(suggestions()))
            .resolver(ResourceKind::Favorite, Arc::new(favorites()))
            .resolver(ResourceKind::ApprovalRequest, Arc::new(approvals()))
            .sink(Arc::new(sink))
            .build()
            .expect("test catalog builds");

        Self {
            authorizer,
            events,
            prompt_lookups,
        }
    }

    /// How many times the prompt resolver has been called.
    pub fn prompt_lookups(&self) -> usize {
        self.prompt_lookups.load(Ordering::SeqCst)
    }

    /// Drains every event published so far.
    pub fn drain_events(&mut self) -> Vec<DomainEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }
}

pub fn alice() -> Principal {
    Principal::new("alice", Role::Contributor)
}

pub fn carol() -> Principal {
    Principal::new("carol", Role::Contributor)
}

pub fn viewer() -> Principal {
    Principal::new("bob", Role::Viewer)
}

pub fn moderator() -> Principal {
    Principal::new("mod", Role::Moderator)
}

pub fn admin() -> Principal {
    Principal::new("root", Role::Admin)
}

fn prompts() -> MemoryResolver {
    MemoryResolver::new()
        .with(Resource::prompt("published", "alice", true, false).with_owner_role(Role::Contributor))
        .with(Resource::prompt("draft", "alice", false, false).with_owner_role(Role::Contributor))
        .with(Resource::prompt("sensitive", "alice", true, true).with_owner_role(Role::Contributor))
        .with(Resource::prompt("admin-post", "root", true, false).with_owner_role(Role::Admin))
}

fn tags() -> MemoryResolver {
    MemoryResolver::new().with(Resource::tag("poetry", "mod", "poetry"))
}

fn suggestions() -> MemoryResolver {
    MemoryResolver::new()
        .with(Resource::tag_suggestion(
            "pending",
            "alice",
            "haiku",
            ReviewStatus::Pending,
        ))
        .with(Resource::tag_suggestion(
            "approved",
            "alice",
            "sonnet",
            ReviewStatus::Approved,
        ))
}

fn favorites() -> MemoryResolver {
    MemoryResolver::new().with(Resource::favorite("fav-alice", "alice", "published"))
}

fn approvals() -> MemoryResolver {
    MemoryResolver::new().with(Resource::approval_request(
        "req-alice",
        "alice",
        "draft",
        ReviewStatus::Pending,
    ))
}
