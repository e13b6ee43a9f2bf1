//! Command routing for Muster.
//!
//! The dispatcher is the brain that:
//! 1. Receives chat events from the webhook gateway
//! 2. Classifies them into supply-request / confirmation commands
//! 3. Gates them by cooldown and role, resolving players via the roster
//! 4. Applies them to the tracker and messages players with the results
//!
//! # Architecture
//!
//! ```text
//! Chat event (webhook)
//!        │
//!        ▼
//! ┌──────────────────┐
//! │    Dispatcher    │ ◄── config, localization
//! │   (this crate)   │
//! └───────┬──────────┘
//!         │
//!   ┌─────┴───────┬──────────────┐
//!   ▼             ▼              ▼
//! [Roster]  [RequestTracker]  [Notifier]
//!  lookup     mutate/query      message
//! ```
//!
//! All tracker calls are synchronous and lock-scoped; roster lookups and
//! player messaging are async and happen strictly outside those locks.

pub mod config;
pub mod dispatch;
pub mod messages;
pub mod routing;

pub use config::{AdminApiConfig, AppConfig};
pub use dispatch::Dispatcher;
pub use messages::{render_status, Language};
pub use routing::ChatCommand;
