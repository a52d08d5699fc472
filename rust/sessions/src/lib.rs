//! # holdem-sessions: live hands keyed by game id
//!
//! Wraps [`holdem_engine::game::Game`] in a thread-safe registry with an
//! explicit `create` / `end` lifecycle, per-session locking, JSONL hand history
//! and structured logging. Transports (HTTP, websockets, CLI) sit on top and
//! speak the types in [`protocol`].
//!
//! ```rust
//! use holdem_engine::logger::Street;
//! use holdem_engine::seat::SeatSpec;
//! use holdem_sessions::config::RegistryConfig;
//! use holdem_sessions::protocol::{ActionRequest, CreateRequest};
//! use holdem_sessions::registry::SessionRegistry;
//!
//! let registry = SessionRegistry::new(RegistryConfig::default())?;
//! let seats = vec![SeatSpec::new("alice", 100), SeatSpec::new("bob", 100)];
//! registry.create("table-1", CreateRequest::new(seats).with_seed(1))?;
//!
//! registry.submit("table-1", &ActionRequest::new("alice", "call", 0))?;
//! let view = registry.submit("table-1", &ActionRequest::new("bob", "check", 0))?;
//! assert!(view.street_advanced);
//! assert_eq!(view.street, Street::Flop);
//!
//! registry.end("table-1")?;
//! # Ok::<(), holdem_sessions::errors::SessionError>(())
//! ```

pub mod config;
pub mod errors;
pub mod logging;
pub mod protocol;
pub mod registry;

pub use errors::SessionError;
pub use registry::{GameId, SessionRegistry};
