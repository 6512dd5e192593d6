use colored::Colorize;
use mealplanner_lib::{
    Backend, MealRecord, Planner, RecordId,
    projector::{self, format_date},
};

use crate::Failure;

pub async fn list<B: Backend>(planner: &mut Planner<B>) -> Result<(), Failure> {
    load(planner).await?;

    print!("{}", render_list(planner.recent(), planner.older()));

    Ok(())
}

pub async fn show<B: Backend>(planner: &mut Planner<B>, id: &str) -> Result<(), Failure> {
    load(planner).await?;

    let record = planner
        .store()
        .find(&RecordId::new(id))
        .ok_or_else(|| Failure::UnknownRecord(id.to_string()))?;

    print!("{}", render_expanded(record));

    Ok(())
}

/// Refresh the planner, turning a failed load into a [`Failure`].
pub async fn load<B: Backend>(planner: &mut Planner<B>) -> Result<(), Failure> {
    planner.refresh().await;

    let store = planner.store();
    match (store.last_error(), store.error()) {
        (Some(error), Some(message)) => Err(Failure::Load {
            error: error.clone(),
            message: format!("{message}\nRun the command again to retry."),
        }),
        _ => Ok(()),
    }
}

pub fn render_list(recent: &[MealRecord], older: &[MealRecord]) -> String {
    if recent.is_empty() {
        return format!(
            "{}\nStart tracking your meals and nutrition by creating your first record with `mealplanner new`.\n",
            "No meal records yet".bold()
        );
    }

    let mut out = format!("{}\n", "Recent Records".bold());
    for record in recent {
        out.push_str(&render_card(record));
    }

    if !older.is_empty() {
        out.push_str(&format!("\n{}\n", "Previous Records".bold()));
        for record in older {
            out.push_str(&render_row(record));
        }
    }

    out
}

fn headline(record: &MealRecord) -> String {
    let mut line = format!(
        "{}  {} kg",
        format_date(&record.fields.date).bold(),
        record.fields.weight
    );

    for flag in projector::flags(&record.fields) {
        line.push_str(&format!("  [{}]", flag.green()));
    }

    line
}

/// A recent record: headline plus the collapsed nutrition summary.
fn render_card(record: &MealRecord) -> String {
    let mut out = format!("  {}  {}\n", headline(record), record.id.to_string().dimmed());

    let summary = projector::summary(&record.fields);
    if !summary.is_empty() {
        out.push_str(&format!("    {}\n", summary.join("  ")));
    }

    out
}

/// An older record on a single line.
fn render_row(record: &MealRecord) -> String {
    let mut line = format!(
        "  {}  {} kg",
        format_date(&record.fields.date),
        record.fields.weight
    );

    if !record.fields.calories.is_empty() {
        line.push_str(&format!("  {} kcal", record.fields.calories));
    }

    format!("{line}  {}\n", record.id.to_string().dimmed())
}

pub fn render_expanded(record: &MealRecord) -> String {
    let mut out = format!("{}  {}\n", headline(record), record.id.to_string().dimmed());

    let meals = projector::meal_lines(&record.fields);
    if !meals.is_empty() {
        out.push_str(&format!("\n{}\n", "Meals".bold()));
        for line in meals {
            out.push_str(&format!("  {line}\n"));
        }
    }

    let nutrition = projector::nutrition_lines(&record.fields);
    if !nutrition.is_empty() {
        out.push_str(&format!("\n{}\n", "Nutrition & Notes".bold()));
        for line in nutrition {
            out.push_str(&format!("  {line}\n"));
        }
    }

    out
}
