//! Reservation engine implementation.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::directory::BookingDirectory;
use crate::locks::SeatLockRegistry;
use crate::metrics;
use crate::payment::PaymentProcessor;
use crate::ticket::{Ticket, TicketStatus};
use crate::venue::{Seat, SeatStatus, Venue};

use super::config::BookingConfig;
use super::error::BookingError;

/// The reservation engine - books and cancels seat sets concurrently.
///
/// All state is injected at construction (directory, lock registry, payment
/// processor), so independent instances are fully isolated (one per test,
/// or one per deployment).
pub struct BookingEngine {
    config: BookingConfig,
    directory: Arc<BookingDirectory>,
    locks: SeatLockRegistry,
    payment: Arc<dyn PaymentProcessor>,
}

impl BookingEngine {
    /// Create a new engine.
    pub fn new(
        config: BookingConfig,
        directory: Arc<BookingDirectory>,
        locks: SeatLockRegistry,
        payment: Arc<dyn PaymentProcessor>,
    ) -> Self {
        Self {
            config,
            directory,
            locks,
            payment,
        }
    }

    /// The directory this engine books against.
    pub fn directory(&self) -> &Arc<BookingDirectory> {
        &self.directory
    }

    /// Book a set of seats for a user.
    ///
    /// On success the returned ticket is `Booked`, registered in the
    /// directory, and every seat in the set is `Booked`. On failure no seat
    /// changes status and the attempt's ticket ends up `Failed`.
    pub async fn book(
        &self,
        user_id: &str,
        event_id: &str,
        seat_ids: &[String],
    ) -> Result<Arc<Ticket>, BookingError> {
        self.book_instrumented(user_id, event_id, seat_ids, None).await
    }

    /// Book while keeping all seat locks held for `hold` before the
    /// availability check, modeling a slow downstream dependency. Behavior
    /// is otherwise identical to [`BookingEngine::book`].
    pub async fn book_with_hold(
        &self,
        user_id: &str,
        event_id: &str,
        seat_ids: &[String],
        hold: Duration,
    ) -> Result<Arc<Ticket>, BookingError> {
        self.book_instrumented(user_id, event_id, seat_ids, Some(hold))
            .await
    }

    async fn book_instrumented(
        &self,
        user_id: &str,
        event_id: &str,
        seat_ids: &[String],
        hold: Option<Duration>,
    ) -> Result<Arc<Ticket>, BookingError> {
        let started = Instant::now();
        let result = self.book_inner(user_id, event_id, seat_ids, hold).await;

        let label = match &result {
            Ok(_) => "booked",
            Err(err) => err.metric_label(),
        };
        metrics::BOOKING_ATTEMPTS.with_label_values(&[label]).inc();
        metrics::BOOKING_DURATION
            .with_label_values(&[label])
            .observe(started.elapsed().as_secs_f64());

        result
    }

    async fn book_inner(
        &self,
        user_id: &str,
        event_id: &str,
        seat_ids: &[String],
        hold: Option<Duration>,
    ) -> Result<Arc<Ticket>, BookingError> {
        // Validation happens before any lock is taken.
        validate_booking_request(user_id, event_id, seat_ids)?;

        let event = self
            .directory
            .event(event_id)
            .await
            .ok_or_else(|| BookingError::EventNotFound(event_id.to_string()))?;

        let seats = resolve_seats(event.venue(), seat_ids)?;

        // The pending ticket exists before locking so failures past this
        // point can be reported against it.
        let total_price: u64 = seats.iter().map(|s| s.kind().price()).sum();
        let ticket = Arc::new(Ticket::new(user_id, event_id, seats.clone(), total_price));

        debug!(
            ticket_id = ticket.ticket_id(),
            user_id,
            event_id,
            seats = ?seat_ids,
            total_price,
            "booking attempt started"
        );

        let wait_started = Instant::now();
        let held = match self
            .locks
            .acquire(event_id, seat_ids, self.config.lock_wait_limit())
            .await
        {
            Ok(held) => held,
            Err(err) => {
                ticket.set_status(TicketStatus::Failed);
                return Err(err.into());
            }
        };
        metrics::SEAT_LOCK_WAIT.observe(wait_started.elapsed().as_secs_f64());

        if let Some(delay) = hold {
            info!(
                ticket_id = ticket.ticket_id(),
                user_id,
                seats = ?held.seat_ids(),
                hold_ms = delay.as_millis() as u64,
                "holding seat locks"
            );
            tokio::time::sleep(delay).await;
        }

        // The single availability check. It must run under the locks (and
        // after any hold): availability may have changed between resolution
        // and acquisition.
        for seat in &seats {
            if !seat.is_available() {
                ticket.set_status(TicketStatus::Failed);
                warn!(
                    ticket_id = ticket.ticket_id(),
                    seat_id = seat.seat_id(),
                    "seat lost to a concurrent booking"
                );
                return Err(BookingError::SeatUnavailable {
                    seat_id: seat.seat_id().to_string(),
                });
            }
        }

        // Charge while still holding every lock.
        if let Err(err) = self.payment.charge(&ticket).await {
            self.payment.refund(&ticket).await;
            ticket.set_status(TicketStatus::Failed);
            warn!(
                ticket_id = ticket.ticket_id(),
                processor = self.payment.name(),
                error = %err,
                "payment step failed, compensated"
            );
            return Err(BookingError::PaymentFailed {
                ticket_id: ticket.ticket_id().to_string(),
                source: err,
            });
        }

        // Commit seats and ticket together, still under the locks, so no
        // observer sees a booked ticket with unbooked seats or vice versa.
        for seat in &seats {
            seat.set_status(SeatStatus::Booked);
        }
        ticket.set_status(TicketStatus::Booked);
        self.directory.register_ticket(Arc::clone(&ticket)).await;

        held.release();

        info!(
            ticket_id = ticket.ticket_id(),
            user_id, event_id, total_price, "booking committed"
        );
        Ok(ticket)
    }

    /// Cancel a booked ticket, returning its seats to the available pool.
    pub async fn cancel(&self, ticket_id: &str) -> Result<(), BookingError> {
        let result = self.cancel_inner(ticket_id).await;

        let label = match &result {
            Ok(()) => "cancelled",
            Err(err) => err.metric_label(),
        };
        metrics::CANCELLATIONS.with_label_values(&[label]).inc();

        result
    }

    async fn cancel_inner(&self, ticket_id: &str) -> Result<(), BookingError> {
        if ticket_id.trim().is_empty() {
            return Err(BookingError::InvalidArgument(
                "ticket id cannot be empty".to_string(),
            ));
        }

        let ticket = self
            .directory
            .ticket(ticket_id)
            .await
            .ok_or_else(|| BookingError::TicketNotFound(ticket_id.to_string()))?;

        // Fast fail outside the locks; the real decision is the atomic
        // transition below.
        let status = ticket.status();
        if !status.can_cancel() {
            return Err(BookingError::InvalidState {
                ticket_id: ticket_id.to_string(),
                status,
                operation: "cancel",
            });
        }

        let seat_ids = ticket.seat_ids();
        let held = self
            .locks
            .acquire(ticket.event_id(), &seat_ids, self.config.lock_wait_limit())
            .await?;

        // A lost cancel race surfaces as InvalidState, never a double
        // release of the seats.
        if !ticket.try_transition(TicketStatus::Booked, TicketStatus::Cancelled) {
            return Err(BookingError::InvalidState {
                ticket_id: ticket_id.to_string(),
                status: ticket.status(),
                operation: "cancel",
            });
        }

        for seat in ticket.seats() {
            seat.set_status(SeatStatus::Available);
        }

        held.release();

        info!(
            ticket_id,
            user_id = ticket.user_id(),
            event_id = ticket.event_id(),
            "ticket cancelled"
        );
        Ok(())
    }
}

fn validate_booking_request(
    user_id: &str,
    event_id: &str,
    seat_ids: &[String],
) -> Result<(), BookingError> {
    if user_id.trim().is_empty() {
        return Err(BookingError::InvalidArgument(
            "user id cannot be empty".to_string(),
        ));
    }
    if event_id.trim().is_empty() {
        return Err(BookingError::InvalidArgument(
            "event id cannot be empty".to_string(),
        ));
    }
    if seat_ids.is_empty() {
        return Err(BookingError::InvalidArgument(
            "seat id list cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Resolve requested seat ids against the venue, in request order.
///
/// Duplicate ids resolve to fewer unique seats than requested and fail the
/// count check.
fn resolve_seats(venue: &Arc<Venue>, seat_ids: &[String]) -> Result<Vec<Arc<Seat>>, BookingError> {
    let by_id: HashMap<&str, &Arc<Seat>> =
        venue.seats().iter().map(|s| (s.seat_id(), s)).collect();

    let mut seen = HashSet::new();
    let mut resolved = Vec::with_capacity(seat_ids.len());
    for seat_id in seat_ids {
        let seat = by_id
            .get(seat_id.as_str())
            .ok_or_else(|| BookingError::SeatNotFound(seat_id.clone()))?;
        if seen.insert(seat_id.as_str()) {
            resolved.push(Arc::clone(seat));
        }
    }

    if resolved.len() != seat_ids.len() {
        return Err(BookingError::SeatCountMismatch {
            requested: seat_ids.len(),
            resolved: resolved.len(),
        });
    }

    Ok(resolved)
}
