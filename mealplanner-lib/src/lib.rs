//! Client-side record management for the Meal Planner REST backend.
//!
//! The [`Planner`] is the single session-scoped controller front ends talk to. It owns the
//! [`RecordStore`](store::RecordStore) (records fetched from the backend), the
//! [`FormSession`](session::FormSession) (the draft being created or edited) and the
//! [`ViewProjector`](projector::ViewProjector) (what the list view shows).

pub mod client;
pub mod config;
pub mod fs;
pub mod planner;
pub mod projector;
pub mod record;
pub mod session;
pub mod store;

mod error;

#[cfg(test)]
pub(crate) mod mock;

pub use client::{Backend, HttpBackend};
pub use config::ClientConfig;
pub use error::{ConfigError, Error, Result, ValidationError};
pub use planner::Planner;
pub use record::{MealRecord, MealSlot, RecordFields, RecordId};
pub use session::{FieldEdit, FormDraft, FormSession, Submission};
pub use store::{LoadTicket, RecordStore, WriteKind, WriteOutcome};
