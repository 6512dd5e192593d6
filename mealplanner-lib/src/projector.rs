//! What the list view shows: the recent/older split, which card is expanded, and how a record
//! is rendered into display lines.

use chrono::NaiveDate;

use crate::{
    record::{MealRecord, MealSlot, RecordFields, RecordId},
    session::DATE_FORMAT,
};

/// How many records are shown as full cards at the top of the list.
pub const RECENT_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    List,
    Form,
}

/// Split `records` by position into the first [`RECENT_COUNT`] and the rest.
pub fn partition(records: &[MealRecord]) -> (&[MealRecord], &[MealRecord]) {
    records.split_at(records.len().min(RECENT_COUNT))
}

pub fn recent(records: &[MealRecord]) -> &[MealRecord] {
    partition(records).0
}

pub fn older(records: &[MealRecord]) -> &[MealRecord] {
    partition(records).1
}

/// Tracks the single expanded record card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewProjector {
    expanded: Option<RecordId>,
}

impl ViewProjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expand `id`, collapsing any other card. Collapses `id` if it is already expanded.
    pub fn toggle(&mut self, id: &RecordId) {
        if self.expanded.as_ref() == Some(id) {
            self.expanded = None;
        } else {
            self.expanded = Some(id.clone());
        }
    }

    pub fn is_expanded(&self, id: &RecordId) -> bool {
        self.expanded.as_ref() == Some(id)
    }

    pub fn expanded(&self) -> Option<&RecordId> {
        self.expanded.as_ref()
    }
}

/// Render a `DD/MM/YYYY` date as e.g. `Fri, May 10`. Anything unparseable is returned as is.
pub fn format_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
        Ok(date) => date.format("%a, %b %-d").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Labels of the activity/supplement flags that are set.
pub fn flags(fields: &RecordFields) -> Vec<&'static str> {
    [
        (fields.workout, "Workout"),
        (fields.creatine, "Creatine"),
        (fields.whey, "Whey"),
    ]
    .into_iter()
    .filter_map(|(set, label)| set.then_some(label))
    .collect()
}

/// One line per non-empty meal, e.g. `B: oats`.
pub fn meal_lines(fields: &RecordFields) -> Vec<String> {
    MealSlot::all()
        .filter(|slot| !fields.meal(*slot).is_empty())
        .map(|slot| format!("{}: {}", slot.abbreviation(), fields.meal(slot)))
        .collect()
}

/// Nutrition and notes lines shown on an expanded card.
pub fn nutrition_lines(fields: &RecordFields) -> Vec<String> {
    let mut lines = Vec::new();

    if !fields.calories.is_empty() {
        lines.push(format!("Calories: {} kcal", fields.calories));
    }
    if !fields.protein.is_empty() {
        lines.push(format!("Protein: {}g", fields.protein));
    }
    if !fields.notes.is_empty() {
        lines.push(format!("Notes: {}", fields.notes));
    }

    lines
}

/// Short nutrition summary shown on a collapsed card.
pub fn summary(fields: &RecordFields) -> Vec<String> {
    let mut parts = Vec::new();

    if !fields.calories.is_empty() {
        parts.push(format!("{} kcal", fields.calories));
    }
    if !fields.protein.is_empty() {
        parts.push(format!("{}g protein", fields.protein));
    }

    parts
}
