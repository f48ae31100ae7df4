//! Contention integration tests.
//!
//! These tests verify the engine's concurrency guarantees: at most one
//! booking succeeds per seat, lock acquisition order prevents deadlocks,
//! and aborted waiters unwind without leaking locks.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;

use encore_core::{
    testing::{fixtures, MockPaymentGateway},
    BookingConfig, BookingDirectory, BookingEngine, BookingError, SeatLockRegistry, SeatStatus,
    TicketStatus,
};

/// Install a subscriber once so failing runs can be replayed with
/// `RUST_LOG=debug` for the interleaving.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

async fn engine_with_seats(seat_count: usize) -> Arc<BookingEngine> {
    init_tracing();
    let directory = Arc::new(BookingDirectory::new());
    directory
        .add_event(fixtures::mixed_seat_event("event-1", seat_count))
        .await;
    Arc::new(BookingEngine::new(
        BookingConfig::default(),
        directory,
        SeatLockRegistry::new(),
        Arc::new(MockPaymentGateway::new()),
    ))
}

fn ids(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

async fn seat_status(engine: &BookingEngine, seat_id: &str) -> SeatStatus {
    engine
        .directory()
        .event("event-1")
        .await
        .unwrap()
        .venue()
        .seat(seat_id)
        .unwrap()
        .status()
}

#[tokio::test]
async fn test_exactly_one_winner_for_identical_requests() {
    let engine = engine_with_seats(3).await;

    let results = join_all((0..8).map(|i| {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move {
            engine
                .book(&format!("user-{}", i), "event-1", &ids(&["S1", "S2"]))
                .await
        })
    }))
    .await;

    let mut winners = 0;
    for result in results {
        match result.unwrap() {
            Ok(ticket) => {
                winners += 1;
                assert_eq!(ticket.status(), TicketStatus::Booked);
            }
            Err(BookingError::SeatUnavailable { .. }) => {}
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }

    assert_eq!(winners, 1);
    assert_eq!(seat_status(&engine, "S1").await, SeatStatus::Booked);
    assert_eq!(seat_status(&engine, "S2").await, SeatStatus::Booked);
    assert_eq!(engine.directory().ticket_count().await, 1);
}

#[tokio::test]
async fn test_disjoint_seat_sets_all_succeed() {
    let engine = engine_with_seats(8).await;

    let requests = [
        ids(&["S1", "S2"]),
        ids(&["S3", "S4"]),
        ids(&["S5", "S6"]),
        ids(&["S7", "S8"]),
    ];

    let results = join_all(requests.into_iter().enumerate().map(|(i, seats)| {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move { engine.book(&format!("user-{}", i), "event-1", &seats).await })
    }))
    .await;

    for result in results {
        assert!(result.unwrap().is_ok());
    }
    assert_eq!(engine.directory().ticket_count().await, 4);
}

#[tokio::test]
async fn test_overlapping_subsets_never_share_a_seat() {
    let engine = engine_with_seats(4).await;

    let requests = [
        ids(&["S1", "S2"]),
        ids(&["S2", "S3"]),
        ids(&["S3", "S4"]),
        ids(&["S4", "S1"]),
        ids(&["S1", "S3"]),
        ids(&["S2", "S4"]),
    ];

    let results = join_all(requests.into_iter().enumerate().map(|(i, seats)| {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move { engine.book(&format!("user-{}", i), "event-1", &seats).await })
    }))
    .await;

    let mut booked_seats = Vec::new();
    for result in results {
        match result.unwrap() {
            Ok(ticket) => booked_seats.extend(ticket.seat_ids()),
            Err(BookingError::SeatUnavailable { .. }) => {}
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }

    // No seat appears in two successful tickets.
    let mut unique = booked_seats.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), booked_seats.len());
}

#[tokio::test]
async fn test_holder_beats_racer_on_same_seats() {
    let engine = engine_with_seats(3).await;

    // Task A grabs both locks and holds them across a simulated slow
    // dependency; its availability check runs only after the hold.
    let holder = {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move {
            engine
                .book_with_hold(
                    "holder-user",
                    "event-1",
                    &ids(&["S1", "S2"]),
                    Duration::from_millis(300),
                )
                .await
        })
    };

    // Give A time to acquire the locks, then race the same seats.
    tokio::time::sleep(Duration::from_millis(100)).await;
    let racer = engine
        .book("racer-user", "event-1", &ids(&["S1", "S2"]))
        .await;

    let held = holder.await.unwrap().unwrap();
    assert_eq!(held.status(), TicketStatus::Booked);
    assert_eq!(held.user_id(), "holder-user");

    match racer {
        Err(BookingError::SeatUnavailable { .. }) => {}
        other => panic!("racer should lose with SeatUnavailable, got {:?}", other),
    }

    assert_eq!(seat_status(&engine, "S1").await, SeatStatus::Booked);
    assert_eq!(seat_status(&engine, "S2").await, SeatStatus::Booked);
}

#[tokio::test]
async fn test_reverse_order_requests_complete_under_stress() {
    let engine = engine_with_seats(4).await;
    let forward = ids(&["S1", "S2", "S3", "S4"]);
    let reverse = ids(&["S4", "S3", "S2", "S1"]);

    let tasks: Vec<_> = (0..20)
        .map(|i| {
            let engine = Arc::clone(&engine);
            let seats = if i % 2 == 0 {
                forward.clone()
            } else {
                reverse.clone()
            };
            tokio::spawn(async move {
                for round in 0..5 {
                    let user = format!("user-{}-{}", i, round);
                    match engine.book(&user, "event-1", &seats).await {
                        Ok(ticket) => {
                            // Free the seats so other tasks keep contending.
                            engine.cancel(ticket.ticket_id()).await.unwrap();
                        }
                        Err(BookingError::SeatUnavailable { .. }) => {}
                        Err(other) => panic!("unexpected error: {:?}", other),
                    }
                }
            })
        })
        .collect();

    // Sorted acquisition order means mixed-direction requests must finish
    // in bounded time instead of deadlocking.
    tokio::time::timeout(Duration::from_secs(10), join_all(tasks))
        .await
        .expect("mixed-order booking stress deadlocked");
}

#[tokio::test]
async fn test_bounded_wait_aborts_cleanly() {
    init_tracing();
    let directory = Arc::new(BookingDirectory::new());
    directory
        .add_event(fixtures::mixed_seat_event("event-1", 2))
        .await;
    let engine = Arc::new(BookingEngine::new(
        BookingConfig {
            lock_wait_timeout_ms: 50,
        },
        directory,
        SeatLockRegistry::new(),
        Arc::new(MockPaymentGateway::new()),
    ));

    let holder = {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move {
            engine
                .book_with_hold(
                    "holder-user",
                    "event-1",
                    &ids(&["S1"]),
                    Duration::from_millis(400),
                )
                .await
        })
    };

    tokio::time::sleep(Duration::from_millis(100)).await;
    let err = engine
        .book("impatient-user", "event-1", &ids(&["S1"]))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Cancelled { seat_id } if seat_id == "S1"));

    // The holder is unaffected by the aborted waiter.
    let ticket = holder.await.unwrap().unwrap();
    assert_eq!(ticket.status(), TicketStatus::Booked);
    assert_eq!(seat_status(&engine, "S1").await, SeatStatus::Booked);

    // And the abandoned wait left no lock behind: cancel reacquires it.
    engine.cancel(ticket.ticket_id()).await.unwrap();
    assert_eq!(seat_status(&engine, "S1").await, SeatStatus::Available);
}
