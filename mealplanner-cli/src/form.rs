use chrono::Local;
use clap::Args;
use colored::Colorize;
use mealplanner_lib::{Backend, FieldEdit, MealSlot, Planner, RecordId, WriteOutcome};
use tracing::warn;

use crate::{Failure, records};

#[derive(Args, Debug, Clone)]
pub struct NewArgs {
    #[command(flatten)]
    draft: DraftArgs,
}

#[derive(Args, Debug, Clone)]
pub struct EditArgs {
    /// Id of the record to edit
    id: String,

    #[command(flatten)]
    draft: DraftArgs,
}

/// Field values to put into the draft. Anything left out keeps its current value.
#[derive(Args, Debug, Clone, Default)]
pub struct DraftArgs {
    /// Date as DD/MM/YYYY (defaults to today for new records)
    #[arg(long)]
    date: Option<String>,
    /// Weight in kg
    #[arg(long)]
    weight: Option<String>,
    /// Whether you worked out
    #[arg(long)]
    workout: Option<bool>,
    /// Whether you took creatine
    #[arg(long)]
    creatine: Option<bool>,
    /// Whether you had whey protein
    #[arg(long)]
    whey: Option<bool>,
    #[arg(long)]
    breakfast: Option<String>,
    #[arg(long)]
    morning_snack: Option<String>,
    #[arg(long)]
    lunch: Option<String>,
    #[arg(long)]
    pre_workout: Option<String>,
    #[arg(long)]
    post_workout: Option<String>,
    #[arg(long)]
    dinner: Option<String>,
    #[arg(long)]
    bedtime_snack: Option<String>,
    /// Approximate calories (kcal)
    #[arg(long)]
    calories: Option<String>,
    /// Protein estimate (g)
    #[arg(long)]
    protein: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

impl DraftArgs {
    pub fn edits(&self) -> Vec<FieldEdit> {
        let meals = [
            (MealSlot::Breakfast, &self.breakfast),
            (MealSlot::MorningSnack, &self.morning_snack),
            (MealSlot::Lunch, &self.lunch),
            (MealSlot::PreWorkout, &self.pre_workout),
            (MealSlot::PostWorkout, &self.post_workout),
            (MealSlot::Dinner, &self.dinner),
            (MealSlot::BedtimeSnack, &self.bedtime_snack),
        ];

        let mut edits: Vec<FieldEdit> = [
            self.date.clone().map(FieldEdit::Date),
            self.weight.clone().map(FieldEdit::Weight),
            self.workout.map(FieldEdit::Workout),
            self.creatine.map(FieldEdit::Creatine),
            self.whey.map(FieldEdit::Whey),
        ]
        .into_iter()
        .flatten()
        .collect();

        edits.extend(
            meals
                .into_iter()
                .filter_map(|(slot, value)| value.clone().map(|v| FieldEdit::Meal(slot, v))),
        );

        edits.extend(
            [
                self.calories.clone().map(FieldEdit::Calories),
                self.protein.clone().map(FieldEdit::Protein),
                self.notes.clone().map(FieldEdit::Notes),
            ]
            .into_iter()
            .flatten(),
        );

        edits
    }
}

pub async fn new<B: Backend>(planner: &mut Planner<B>, args: &NewArgs) -> Result<(), Failure> {
    planner.new_record(Local::now().date_naive());
    save(planner, &args.draft).await
}

pub async fn edit<B: Backend>(planner: &mut Planner<B>, args: &EditArgs) -> Result<(), Failure> {
    records::load(planner).await?;

    if !planner.edit_record(&RecordId::new(args.id.as_str())) {
        return Err(Failure::UnknownRecord(args.id.clone()));
    }

    save(planner, &args.draft).await
}

async fn save<B: Backend>(planner: &mut Planner<B>, draft: &DraftArgs) -> Result<(), Failure> {
    for edit in draft.edits() {
        planner.edit_field(edit);
    }

    let date = planner
        .session()
        .draft()
        .map(|d| d.fields().date.clone())
        .unwrap_or_default();

    match planner.save().await {
        Some(WriteOutcome::Saved) => {
            println!("{} record for {date}", "Saved".green().bold());

            // The write went through even if the reload after it didn't
            if let Some(message) = planner.store().error() {
                warn!("Reload after save failed: {message}");
                eprintln!("{} {message}", "warning:".yellow().bold());
            }

            Ok(())
        }
        Some(WriteOutcome::Failed { error, message }) => Err(Failure::Rejected { error, message }),
        None => Err(Failure::Invalid(
            planner
                .session()
                .error()
                .unwrap_or("Nothing to save")
                .to_string(),
        )),
    }
}
