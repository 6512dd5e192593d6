//! Domain types for a single day's log entry.

use chrono::{DateTime, FixedOffset};
use derive_more::{Display, From};
use strum::{EnumIter, IntoEnumIterator};

/// Opaque identifier assigned by the backend once a record has been persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One of the seven meals tracked each day, in the order they are eaten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum MealSlot {
    Breakfast,
    MorningSnack,
    Lunch,
    PreWorkout,
    PostWorkout,
    Dinner,
    BedtimeSnack,
}

impl MealSlot {
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast (B)",
            Self::MorningSnack => "Morning Snack (MS)",
            Self::Lunch => "Lunch (L)",
            Self::PreWorkout => "Pre-Workout (PreW)",
            Self::PostWorkout => "Post-Workout (PostW)",
            Self::Dinner => "Dinner (D)",
            Self::BedtimeSnack => "Bedtime Snack (BB)",
        }
    }

    /// Short prefix used in the expanded record view, e.g. `B: oats`.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::Breakfast => "B",
            Self::MorningSnack => "MS",
            Self::Lunch => "L",
            Self::PreWorkout => "PreW",
            Self::PostWorkout => "PostW",
            Self::Dinner => "D",
            Self::BedtimeSnack => "BB",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Breakfast => "3 boiled eggs + oats + milk",
            Self::MorningSnack => "1 apple + 10 almonds",
            Self::Lunch => "2 roti + paneer curry + sabzi + curd",
            Self::PreWorkout => "1 scoop whey + banana",
            Self::PostWorkout => "4 egg whites + 1 toast + creatine",
            Self::Dinner => "2 phulkas + dal + lauki sabzi + salad",
            Self::BedtimeSnack => "1 cup milk + 1 tsp chia seeds",
        }
    }
}

/// Every user-editable field of a record.
///
/// Optional fields (`calories`, `protein`, `notes` and the meals) are empty strings when
/// unset. `weight`, `calories` and `protein` are kept as the text the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFields {
    /// `DD/MM/YYYY`
    pub date: String,
    /// Kilograms
    pub weight: String,
    pub workout: bool,
    pub creatine: bool,
    pub whey: bool,
    pub breakfast: String,
    pub morning_snack: String,
    pub lunch: String,
    pub pre_workout: String,
    pub post_workout: String,
    pub dinner: String,
    pub bedtime_snack: String,
    pub calories: String,
    pub protein: String,
    pub notes: String,
}

impl RecordFields {
    pub fn meal(&self, slot: MealSlot) -> &str {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::MorningSnack => &self.morning_snack,
            MealSlot::Lunch => &self.lunch,
            MealSlot::PreWorkout => &self.pre_workout,
            MealSlot::PostWorkout => &self.post_workout,
            MealSlot::Dinner => &self.dinner,
            MealSlot::BedtimeSnack => &self.bedtime_snack,
        }
    }

    pub fn meal_mut(&mut self, slot: MealSlot) -> &mut String {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::MorningSnack => &mut self.morning_snack,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::PreWorkout => &mut self.pre_workout,
            MealSlot::PostWorkout => &mut self.post_workout,
            MealSlot::Dinner => &mut self.dinner,
            MealSlot::BedtimeSnack => &mut self.bedtime_snack,
        }
    }
}

/// A persisted record as last fetched from the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct MealRecord {
    pub id: RecordId,
    pub fields: RecordFields,
    pub created_at: Option<DateTime<FixedOffset>>,
    pub updated_at: Option<DateTime<FixedOffset>>,
}

impl MealRecord {
    pub fn new(id: impl Into<RecordId>, fields: RecordFields) -> Self {
        Self {
            id: id.into(),
            fields,
            created_at: None,
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_meal_accessors_agree() {
        let mut fields = RecordFields::default();

        for slot in MealSlot::all() {
            *fields.meal_mut(slot) = slot.abbreviation().to_string();
        }

        assert_eq!(fields.breakfast, "B");
        assert_eq!(fields.bedtime_snack, "BB");
        for slot in MealSlot::all() {
            assert_eq!(fields.meal(slot), slot.abbreviation());
        }
    }

    #[test]
    fn test_slots_in_eating_order() {
        let slots: Vec<_> = MealSlot::all().map(MealSlot::abbreviation).collect();

        assert_eq!(slots, ["B", "MS", "L", "PreW", "PostW", "D", "BB"]);
    }
}
