//! In-process event bus for post-commit side effects.
//!
//! Services publish a [`DomainEvent`] once their primary write has
//! committed. Handlers run in registration order; a failing handler is
//! logged and skipped, so the publisher's result is never affected.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::DomainEvent;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Reacts to published domain events.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Handler name used in logs
    fn name(&self) -> &'static str;

    async fn handle(&self, event: &DomainEvent) -> AppResult<()>;
}

/// Dispatches events to every subscribed handler.
#[derive(Clone, Default)]
pub struct EventBus {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, builder style
    pub fn with_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Deliver `event` to every handler, logging failures at `warn`.
    pub async fn publish(&self, event: DomainEvent) {
        tracing::debug!(event = event.name(), faculty_id = event.faculty_id(), "Publishing event");

        for handler in &self.handlers {
            if let Err(err) = handler.handle(&event).await {
                tracing::warn!(
                    event = event.name(),
                    faculty_id = event.faculty_id(),
                    handler = handler.name(),
                    error = %err,
                    "Event handler failed; primary change already committed"
                );
            }
        }
    }
}
