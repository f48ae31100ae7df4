pub mod booking;
pub mod config;
pub mod directory;
pub mod locks;
pub mod metrics;
pub mod payment;
pub mod testing;
pub mod ticket;
pub mod venue;

pub use booking::{BookingConfig, BookingEngine, BookingError};
pub use config::{load_config, load_config_from_str, validate_config, Config, ConfigError};
pub use directory::BookingDirectory;
pub use locks::{HeldSeatLocks, LockError, SeatLockRegistry};
pub use payment::{PaymentConfig, PaymentError, PaymentProcessor, StochasticGateway};
pub use ticket::{Ticket, TicketStatus};
pub use venue::{EventShow, Seat, SeatKind, SeatStatus, Venue};
