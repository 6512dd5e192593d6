use chrono::NaiveDate;
use tracing::debug;

use crate::{
    Result,
    client::Backend,
    projector::{self, ViewMode, ViewProjector},
    record::{MealRecord, RecordId},
    session::{FieldEdit, FormSession, Submission},
    store::{LoadTicket, RecordStore, WriteKind, WriteOutcome},
};

/// Session-scoped controller tying the record store, the form and the list view together.
///
/// All state lives here and is only changed through these methods. The form never touches
/// the store directly: saves go through the store, and the form is closed once the reload
/// that follows a successful save has completed.
///
/// Front ends that await requests inline can use [`Planner::refresh`] and [`Planner::save`].
/// Front ends that run requests as background tasks use the `begin_*`/`finish_*` pairs and
/// perform the [`Backend`] call in between.
#[derive(Debug)]
pub struct Planner<B> {
    backend: B,
    store: RecordStore,
    session: FormSession,
    view: ViewProjector,
}

impl<B: Backend> Planner<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            store: RecordStore::new(),
            session: FormSession::default(),
            view: ViewProjector::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    pub fn view(&self) -> &ViewProjector {
        &self.view
    }

    pub fn mode(&self) -> ViewMode {
        if self.session.is_open() {
            ViewMode::Form
        } else {
            ViewMode::List
        }
    }

    pub fn recent(&self) -> &[MealRecord] {
        projector::recent(self.store.records())
    }

    pub fn older(&self) -> &[MealRecord] {
        projector::older(self.store.records())
    }

    pub fn toggle_expanded(&mut self, id: &RecordId) {
        self.view.toggle(id);
    }

    pub fn new_record(&mut self, today: NaiveDate) {
        self.session.open_new(today);
    }

    /// Open the form on a copy of the record with `id`. Returns `false` if there is no such
    /// record in the store.
    pub fn edit_record(&mut self, id: &RecordId) -> bool {
        match self.store.find(id) {
            Some(record) => {
                self.session.open_edit(record);
                true
            }
            None => false,
        }
    }

    pub fn edit_field(&mut self, edit: FieldEdit) {
        self.session.edit(edit);
    }

    pub fn cancel(&mut self) {
        self.session.cancel();
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.store.begin_load()
    }

    /// Apply a fetch result. Closes the form if this was the reload after a save.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<MealRecord>>) {
        if self.store.finish_load(ticket, result) {
            debug!("Save complete, closing form");
            self.session.close();
        }
    }

    /// Validate the draft and mark the store as saving.
    ///
    /// Returns `None` if there is nothing to send: the form is closed, a save is already in
    /// flight, or validation failed (the form then shows why).
    pub fn begin_save(&mut self) -> Option<Submission> {
        if self.store.is_saving() {
            return None;
        }

        let submission = self.session.submit()?;
        self.store.begin_write();

        Some(submission)
    }

    /// Apply the backend's answer to a save. Returns `true` if the caller must now reload.
    pub fn finish_save(&mut self, kind: WriteKind, result: Result<()>) -> bool {
        match self.store.finish_write(kind, result) {
            WriteOutcome::Saved => true,
            WriteOutcome::Failed { message, .. } => {
                self.session.fail(message);
                false
            }
        }
    }

    /// Reload the collection from the backend.
    pub async fn refresh(&mut self) {
        let ticket = self.begin_load();
        let result = self.backend.fetch_records().await;
        self.finish_load(ticket, result);
    }

    /// Validate and send the draft, reloading on success.
    ///
    /// Returns `None` if nothing was sent.
    pub async fn save(&mut self) -> Option<WriteOutcome> {
        if self.store.is_saving() {
            return None;
        }

        let submission = self.session.submit()?;
        let outcome = self.store.submit(&self.backend, &submission).await;

        match &outcome {
            WriteOutcome::Saved => self.session.close(),
            WriteOutcome::Failed { message, .. } => self.session.fail(message.clone()),
        }

        Some(outcome)
    }
}
