//! The form used to create a new record or edit an existing one.

use chrono::NaiveDate;
use tracing::debug;

use crate::{
    ValidationError,
    record::{MealRecord, MealSlot, RecordFields, RecordId},
    store::WriteKind,
};

/// Format used for dates entered in the form.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// A change to exactly one field of a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Date(String),
    Weight(String),
    Workout(bool),
    Creatine(bool),
    Whey(bool),
    Meal(MealSlot, String),
    Calories(String),
    Protein(String),
    Notes(String),
}

impl RecordFields {
    /// Return a copy with the single field named by `edit` replaced.
    pub fn with(mut self, edit: FieldEdit) -> Self {
        match edit {
            FieldEdit::Date(value) => self.date = value,
            FieldEdit::Weight(value) => self.weight = value,
            FieldEdit::Workout(value) => self.workout = value,
            FieldEdit::Creatine(value) => self.creatine = value,
            FieldEdit::Whey(value) => self.whey = value,
            FieldEdit::Meal(slot, value) => *self.meal_mut(slot) = value,
            FieldEdit::Calories(value) => self.calories = value,
            FieldEdit::Protein(value) => self.protein = value,
            FieldEdit::Notes(value) => self.notes = value,
        }
        self
    }
}

/// Editable copy of a record. Never shares storage with the record it was copied from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDraft {
    editing_id: Option<RecordId>,
    fields: RecordFields,
}

impl FormDraft {
    /// An empty draft dated `today`.
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            editing_id: None,
            fields: RecordFields {
                date: today.format(DATE_FORMAT).to_string(),
                ..Default::default()
            },
        }
    }

    pub fn from_record(record: &MealRecord) -> Self {
        Self {
            editing_id: Some(record.id.clone()),
            fields: record.fields.clone(),
        }
    }

    /// The record being edited, or `None` when creating.
    pub fn editing_id(&self) -> Option<&RecordId> {
        self.editing_id.as_ref()
    }

    pub fn fields(&self) -> &RecordFields {
        &self.fields
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.fields.date.is_empty() || self.fields.weight.is_empty() {
            return Err(ValidationError::MissingRequired);
        }

        Ok(())
    }

    pub fn submission(&self) -> Submission {
        match &self.editing_id {
            Some(id) => Submission::Update(id.clone(), self.fields.clone()),
            None => Submission::Create(self.fields.clone()),
        }
    }
}

/// A validated draft ready to be sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(RecordFields),
    Update(RecordId, RecordFields),
}

impl Submission {
    pub fn kind(&self) -> WriteKind {
        match self {
            Submission::Create(_) => WriteKind::Create,
            Submission::Update(..) => WriteKind::Update,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    draft: FormDraft,
    error: Option<String>,
}

impl Form {
    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn title(&self) -> &'static str {
        if self.draft.editing_id.is_some() {
            "Edit Meal Record"
        } else {
            "New Meal Record"
        }
    }
}

/// Either showing the form with a draft, or closed with the list view showing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormSession {
    #[default]
    Closed,
    Editing(Form),
}

impl FormSession {
    pub fn open_new(&mut self, today: NaiveDate) {
        debug!("Opening form for a new record");
        *self = Self::Editing(Form {
            draft: FormDraft::blank(today),
            error: None,
        });
    }

    pub fn open_edit(&mut self, record: &MealRecord) {
        debug!("Opening form for record {}", record.id);
        *self = Self::Editing(Form {
            draft: FormDraft::from_record(record),
            error: None,
        });
    }

    /// Replace one field of the draft. Does nothing while closed.
    pub fn edit(&mut self, edit: FieldEdit) {
        if let Self::Editing(form) = self {
            let fields = std::mem::take(&mut form.draft.fields);
            form.draft.fields = fields.with(edit);
        }
    }

    /// Discard the draft without contacting the backend.
    pub fn cancel(&mut self) {
        *self = Self::Closed;
    }

    /// Discard the draft after it has been saved.
    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    /// Validate the draft and hand back what should be sent.
    ///
    /// Returns `None` when closed or when validation fails; in the latter case the form
    /// stays open with the validation message set.
    pub fn submit(&mut self) -> Option<Submission> {
        let Self::Editing(form) = self else {
            return None;
        };

        form.error = None;

        if let Err(err) = form.draft.validate() {
            debug!("Draft rejected: {err}");
            form.error = Some(err.to_string());
            return None;
        }

        Some(form.draft.submission())
    }

    /// Keep the draft open and show `message`.
    pub fn fail(&mut self, message: impl Into<String>) {
        if let Self::Editing(form) = self {
            form.error = Some(message.into());
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Editing(_))
    }

    pub fn form(&self) -> Option<&Form> {
        match self {
            Self::Editing(form) => Some(form),
            Self::Closed => None,
        }
    }

    pub fn draft(&self) -> Option<&FormDraft> {
        self.form().map(Form::draft)
    }

    pub fn error(&self) -> Option<&str> {
        self.form().and_then(Form::error)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    fn record() -> MealRecord {
        MealRecord::new(
            "r1",
            RecordFields {
                date: "09/05/2024".into(),
                weight: "60".into(),
                lunch: "rice".into(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_new_draft_prefills_today() {
        let mut session = FormSession::default();
        session.open_new(today());

        let draft = session.draft().unwrap();
        assert_eq!(draft.fields().date, "10/05/2024");
        assert_eq!(draft.fields().weight, "");
        assert!(!draft.fields().workout);
        assert_eq!(draft.editing_id(), None);
        assert_eq!(session.form().unwrap().title(), "New Meal Record");
    }

    #[test]
    fn test_edit_draft_copies_record() {
        let record = record();
        let mut session = FormSession::default();
        session.open_edit(&record);

        let draft = session.draft().unwrap();
        assert_eq!(draft.fields(), &record.fields);
        assert_eq!(draft.editing_id(), Some(&record.id));
        assert_eq!(session.form().unwrap().title(), "Edit Meal Record");
    }

    #[test]
    fn test_editing_draft_leaves_record_untouched() {
        let record = record();
        let mut session = FormSession::default();
        session.open_edit(&record);

        session.edit(FieldEdit::Meal(MealSlot::Lunch, "dal".into()));

        assert_eq!(record.fields.lunch, "rice");
        assert_eq!(session.draft().unwrap().fields().lunch, "dal");
    }

    #[test]
    fn test_field_edits_are_independent() {
        let base = RecordFields::default();
        let a = FieldEdit::Weight("61.2".into());
        let b = FieldEdit::Whey(true);

        let ab = base.clone().with(a.clone()).with(b.clone());
        let ba = base.clone().with(b).with(a);

        assert_eq!(ab, ba);
        assert_eq!(ab.weight, "61.2");
        assert!(ab.whey);
        assert_eq!(ab.date, base.date);
        assert!(!ab.workout);
    }

    #[test]
    fn test_submit_without_date_keeps_form_open() {
        let mut session = FormSession::default();
        session.open_new(today());
        session.edit(FieldEdit::Date(String::new()));
        session.edit(FieldEdit::Weight("60".into()));

        assert_eq!(session.submit(), None);
        assert!(session.is_open());
        assert_eq!(session.error(), Some("Date and weight are required fields"));
    }

    #[test]
    fn test_submit_without_weight_keeps_form_open() {
        let mut session = FormSession::default();
        session.open_new(today());

        assert_eq!(session.submit(), None);
        assert_eq!(session.error(), Some("Date and weight are required fields"));
    }

    #[test]
    fn test_submit_kind_follows_editing_id() {
        let mut session = FormSession::default();
        session.open_new(today());
        session.edit(FieldEdit::Weight("60".into()));
        assert!(matches!(session.submit(), Some(Submission::Create(_))));

        session.open_edit(&record());
        assert!(matches!(
            session.submit(),
            Some(Submission::Update(id, _)) if id.as_str() == "r1"
        ));
    }

    #[test]
    fn test_cancel_discards_draft_and_error() {
        let mut session = FormSession::default();
        session.open_new(today());
        session.fail("boom");

        session.cancel();

        assert!(!session.is_open());
        assert_eq!(session.error(), None);
        assert_eq!(session.submit(), None);
    }

    #[test]
    fn test_reopening_clears_previous_error() {
        let mut session = FormSession::default();
        session.open_new(today());
        session.fail("duplicate date");

        session.open_edit(&record());

        assert_eq!(session.error(), None);
    }
}
