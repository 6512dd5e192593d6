//! The records last fetched from the backend, plus the flags describing in-flight requests.
//!
//! The store never patches its own collection after a write. A successful create or update
//! is always followed by a full reload so that backend-computed fields (timestamps and the
//! like) are picked up, and the collection is replaced wholesale on every load.
//!
//! Each operation is split into a `begin_*` and a `finish_*` step so that front ends running
//! requests as background tasks can drive it. [`RecordStore::load`] and
//! [`RecordStore::submit`] run both steps around a [`Backend`] call.

use tracing::{debug, warn};

use crate::{
    Error, Result,
    client::{self, Backend},
    record::{MealRecord, RecordFields, RecordId},
    session::Submission,
};

pub const CONNECT_FAILED: &str =
    "Failed to connect to server. Please check if the backend is running.";
pub const FETCH_FAILED: &str = "Failed to fetch meal plans";
pub const CREATE_FAILED: &str = "Failed to save meal plan";
pub const UPDATE_FAILED: &str = "Failed to update meal plan";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    Create,
    Update,
}

impl WriteKind {
    /// Message shown when the request itself fails, or the backend gave no reason.
    fn fallback_message(self) -> &'static str {
        match self {
            WriteKind::Create => CREATE_FAILED,
            WriteKind::Update => UPDATE_FAILED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Saved,
    Failed { error: Error, message: String },
}

/// Identifies one load so its result can be matched to the moment it was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<MealRecord>,
    loading: bool,
    saving: bool,
    /// Last ticket handed out by `begin_load`
    issued: u64,
    /// Ticket of the newest load whose result was applied
    applied: u64,
    /// Set after a successful write: the first load issued after it completes the write
    reload_from: Option<u64>,
    error: Option<String>,
    last_error: Option<Error>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records in backend order, most recent first.
    pub fn records(&self) -> &[MealRecord] {
        &self.records
    }

    pub fn find(&self, id: &RecordId) -> Option<&MealRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// The last load failure, if the most recent load failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The error behind [`RecordStore::error`], for callers that care about its kind.
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        self.loading = true;
        self.error = None;
        self.last_error = None;
        LoadTicket(self.issued)
    }

    /// Apply the result of the fetch started with `ticket`.
    ///
    /// Results older than one already applied are dropped. Returns `true` when this load was
    /// the reload following a successful write, which is the point at which that write is
    /// complete. A load started before the write never counts as its reload.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<MealRecord>>) -> bool {
        let LoadTicket(n) = ticket;
        if n == self.issued {
            self.loading = false;
        }

        if n <= self.applied {
            debug!("Dropping stale load {n}");
            return false;
        }
        self.applied = n;

        match result {
            Ok(records) => {
                debug!("Loaded {} records", records.len());
                self.records = records;
            }
            Err(err) => {
                warn!("Failed to load records: {err}");
                self.error = Some(load_message(&err));
                self.last_error = Some(err);
            }
        }

        let completed_write = self.reload_from.is_some_and(|from| n >= from);
        if completed_write {
            self.reload_from = None;
            self.saving = false;
        }

        completed_write
    }

    pub fn begin_write(&mut self) {
        self.saving = true;
    }

    /// Apply the result of a create or update request.
    ///
    /// On [`WriteOutcome::Saved`] the caller must reload; the saving flag stays set until a
    /// load begun after this call finishes. On failure nothing but the saving flag changes.
    pub fn finish_write(&mut self, kind: WriteKind, result: Result<()>) -> WriteOutcome {
        match result {
            Ok(()) => {
                debug!("{kind:?} succeeded, reloading");
                self.reload_from = Some(self.issued + 1);
                WriteOutcome::Saved
            }
            Err(err) => {
                warn!("{kind:?} failed: {err}");
                self.saving = false;
                WriteOutcome::Failed {
                    message: write_message(kind, &err),
                    error: err,
                }
            }
        }
    }

    /// Replace the collection with whatever the backend currently holds.
    pub async fn load<B: Backend>(&mut self, backend: &B) {
        let ticket = self.begin_load();
        let result = backend.fetch_records().await;
        self.finish_load(ticket, result);
    }

    pub async fn create<B: Backend>(&mut self, backend: &B, fields: &RecordFields) -> WriteOutcome {
        self.submit(backend, &Submission::Create(fields.clone())).await
    }

    pub async fn update<B: Backend>(
        &mut self,
        backend: &B,
        id: &RecordId,
        fields: &RecordFields,
    ) -> WriteOutcome {
        self.submit(backend, &Submission::Update(id.clone(), fields.clone())).await
    }

    /// Send `submission` and, if it was accepted, reload before returning.
    pub async fn submit<B: Backend>(
        &mut self,
        backend: &B,
        submission: &Submission,
    ) -> WriteOutcome {
        self.begin_write();
        let result = client::submit(backend, submission).await;
        let outcome = self.finish_write(submission.kind(), result);

        if outcome == WriteOutcome::Saved {
            self.load(backend).await;
        }

        outcome
    }
}

fn load_message(err: &Error) -> String {
    match err {
        Error::Api { message } => message.clone().unwrap_or_else(|| FETCH_FAILED.into()),
        Error::Transport(_) => CONNECT_FAILED.into(),
        other => other.to_string(),
    }
}

fn write_message(kind: WriteKind, err: &Error) -> String {
    match err {
        Error::Api {
            message: Some(message),
        } => message.clone(),
        Error::Validation(e) => e.to_string(),
        _ => kind.fallback_message().into(),
    }
}
