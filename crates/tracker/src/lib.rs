//! The Muster core: per-team supply-request confirmation tracking.
//!
//! `RequestTracker` owns the mapping from team to its (at most one) active
//! supply request and applies every read-then-write on a team atomically.
//! `CooldownRegistry` throttles the open-request command per player. Both
//! are plain in-memory structures: no operation blocks, suspends, or
//! performs I/O, so callers can hold the results (player ids, status
//! snapshots) and do their messaging outside any lock.

pub mod config;
pub mod cooldown;
pub mod request;
pub mod tracker;

pub use config::{Category, TrackerConfig};
pub use cooldown::{CooldownDecision, CooldownRegistry};
pub use request::{CategoryProgress, StatusSnapshot, SupplyRequest};
pub use tracker::{ConfirmOutcome, ConfirmationReceipt, OpenReceipt, RequestTracker};
