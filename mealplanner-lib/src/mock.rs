//! In-memory [`Backend`] that records every call made against it.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    Error, Result,
    client::Backend,
    record::{MealRecord, RecordFields, RecordId},
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Fetch,
    Create(RecordFields),
    Update(RecordId, RecordFields),
}

#[derive(Debug, Default)]
struct State {
    records: Vec<MealRecord>,
    next_id: u64,
    fetch_error: Option<Error>,
    write_error: Option<Error>,
    calls: Vec<Call>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct MockBackend {
    state: Arc<Mutex<State>>,
}

impl MockBackend {
    pub fn with_records(records: Vec<MealRecord>) -> Self {
        let backend = Self::default();
        backend.set_records(records);
        backend
    }

    pub fn set_records(&self, records: Vec<MealRecord>) {
        self.state.lock().records = records;
    }

    /// Make every following fetch fail with `err`.
    pub fn fail_fetch(&self, err: Error) {
        self.state.lock().fetch_error = Some(err);
    }

    /// Make every following create or update fail with `err`.
    pub fn fail_write(&self, err: Error) {
        self.state.lock().write_error = Some(err);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.state.lock().calls.iter().filter(|c| predicate(c)).count()
    }
}

impl Backend for MockBackend {
    async fn fetch_records(&self) -> Result<Vec<MealRecord>> {
        let mut state = self.state.lock();
        state.calls.push(Call::Fetch);

        match &state.fetch_error {
            Some(err) => Err(err.clone()),
            None => Ok(state.records.clone()),
        }
    }

    async fn create_record(&self, fields: &RecordFields) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(Call::Create(fields.clone()));

        if let Some(err) = &state.write_error {
            return Err(err.clone());
        }

        state.next_id += 1;
        let id = format!("mock-{}", state.next_id);
        state.records.insert(0, MealRecord::new(id, fields.clone()));

        Ok(())
    }

    async fn update_record(&self, id: &RecordId, fields: &RecordFields) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(Call::Update(id.clone(), fields.clone()));

        if let Some(err) = &state.write_error {
            return Err(err.clone());
        }

        match state.records.iter_mut().find(|r| &r.id == id) {
            Some(record) => {
                record.fields = fields.clone();
                Ok(())
            }
            None => Err(Error::Api {
                message: Some("Meal plan not found".into()),
            }),
        }
    }
}
