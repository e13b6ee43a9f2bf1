//! Game-server admin API client.
//!
//! Implements the [`Roster`](muster_common::Roster) and
//! [`Notifier`](muster_common::Notifier) collaborator traits against a
//! CRCON-compatible HTTP admin API. Lookup failures never escape the trait
//! boundary: both tiers of the role/team lookup swallow transport and
//! decoding errors down to "unknown", and undeliverable messages are logged
//! and dropped.

pub mod client;

pub use client::{DetailedPlayer, DetailedPlayers, PlayerInfo, RconClient};
