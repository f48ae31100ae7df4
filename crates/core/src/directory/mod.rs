//! Thread-safe registries of events and issued tickets.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::ticket::Ticket;
use crate::venue::EventShow;

/// In-memory directory of events and tickets.
///
/// Event registration is an admin operation outside the concurrency-critical
/// path; lookups are safe to call concurrently with admin mutation. Tickets
/// are registered by the reservation engine only and never removed.
#[derive(Debug, Default)]
pub struct BookingDirectory {
    events: RwLock<HashMap<String, Arc<EventShow>>>,
    tickets: RwLock<HashMap<String, Arc<Ticket>>>,
}

impl BookingDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event. Replaces any previous event with the same id.
    pub async fn add_event(&self, event: EventShow) -> Arc<EventShow> {
        let event = Arc::new(event);
        info!(event_id = event.event_id(), "event registered");
        self.events
            .write()
            .await
            .insert(event.event_id().to_string(), Arc::clone(&event));
        event
    }

    /// Remove an event. Returns the removed event, if any. Tickets already
    /// issued for it stay in the directory.
    pub async fn remove_event(&self, event_id: &str) -> Option<Arc<EventShow>> {
        self.events.write().await.remove(event_id)
    }

    /// Look up an event by id.
    pub async fn event(&self, event_id: &str) -> Option<Arc<EventShow>> {
        self.events.read().await.get(event_id).cloned()
    }

    /// Number of registered events.
    pub async fn event_count(&self) -> usize {
        self.events.read().await.len()
    }

    /// Record an issued ticket. Engine-only write path.
    pub(crate) async fn register_ticket(&self, ticket: Arc<Ticket>) {
        self.tickets
            .write()
            .await
            .insert(ticket.ticket_id().to_string(), ticket);
    }

    /// Look up a ticket by id.
    pub async fn ticket(&self, ticket_id: &str) -> Option<Arc<Ticket>> {
        self.tickets.read().await.get(ticket_id).cloned()
    }

    /// All tickets issued to one user, in no particular order.
    pub async fn tickets_for_user(&self, user_id: &str) -> Vec<Arc<Ticket>> {
        self.tickets
            .read()
            .await
            .values()
            .filter(|t| t.user_id() == user_id)
            .cloned()
            .collect()
    }

    /// Number of issued tickets.
    pub async fn ticket_count(&self) -> usize {
        self.tickets.read().await.len()
    }
}
