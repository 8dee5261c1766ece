//! Core types for campus-events.
//!
//! This crate holds everything below the terminal front-end:
//! - `store` for the key-value persistence boundary
//! - `user` and `session` for registration, login and the active session
//! - `event`, `repository`, `filter` and `rsvp` for the event data model,
//!   its persistence, list views and attendance toggling
//! - `config` for on-disk configuration

pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod repository;
pub mod rsvp;
pub mod session;
pub mod store;
pub mod user;
mod utils;

pub use error::{CampusError, CampusResult};
pub use event::{Category, Event, NewEvent};
pub use filter::{CategoryFilter, EventQuery, WorkingSet};
pub use repository::EventRepository;
pub use rsvp::{RsvpAction, RsvpState};
pub use session::SessionManager;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use user::{Role, SessionUser, User};
