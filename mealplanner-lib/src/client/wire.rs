//! JSON shapes exchanged with the backend.
//!
//! Reads are nested (`meals` and `nutrition` sub-objects), writes are flat. The two
//! directions are handled by [`record_from_wire`] and [`write_body`] respectively.

use chrono::DateTime;
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

use crate::{
    Error,
    record::{MealRecord, RecordFields, RecordId},
};

/// Every response from the backend is wrapped in one of these.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwrap the payload, turning `success: false` into [`Error::Api`].
    pub fn into_result(self) -> crate::Result<Option<T>> {
        if self.success {
            Ok(self.data)
        } else {
            Err(Error::Api {
                message: self.message,
            })
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanWire {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub weight: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub workout: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub creatine: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub whey: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meals: MealsWire,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nutrition: NutritionWire,
    #[serde(default, deserialize_with = "lenient_string")]
    pub notes: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealsWire {
    #[serde(default, deserialize_with = "lenient_string")]
    pub breakfast: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub morning_snack: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub lunch: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub pre_workout: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub post_workout: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub dinner: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub bedtime_snack: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NutritionWire {
    #[serde(default, deserialize_with = "lenient_string")]
    pub calories: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub protein: String,
}

/// Request body for `POST /meal-plans` and `PUT /meal-plans/{id}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteBody<'a> {
    pub date: &'a str,
    pub weight: &'a str,
    pub workout: bool,
    pub creatine: bool,
    pub whey: bool,
    pub breakfast: &'a str,
    pub morning_snack: &'a str,
    pub lunch: &'a str,
    pub pre_workout: &'a str,
    pub post_workout: &'a str,
    pub dinner: &'a str,
    pub bedtime_snack: &'a str,
    pub calories: &'a str,
    pub protein: &'a str,
    pub notes: &'a str,
}

/// Flatten a fetched meal plan into a [`MealRecord`].
pub fn record_from_wire(wire: MealPlanWire) -> MealRecord {
    let MealPlanWire {
        id,
        date,
        weight,
        workout,
        creatine,
        whey,
        meals,
        nutrition,
        notes,
        created_at,
        updated_at,
    } = wire;

    MealRecord {
        id: RecordId::new(id),
        fields: RecordFields {
            date,
            weight,
            workout,
            creatine,
            whey,
            breakfast: meals.breakfast,
            morning_snack: meals.morning_snack,
            lunch: meals.lunch,
            pre_workout: meals.pre_workout,
            post_workout: meals.post_workout,
            dinner: meals.dinner,
            bedtime_snack: meals.bedtime_snack,
            calories: nutrition.calories,
            protein: nutrition.protein,
            notes,
        },
        created_at: created_at.as_deref().and_then(parse_timestamp),
        updated_at: updated_at.as_deref().and_then(parse_timestamp),
    }
}

/// The flat body the backend expects on writes. Nothing is re-nested.
pub fn write_body(fields: &RecordFields) -> WriteBody<'_> {
    WriteBody {
        date: &fields.date,
        weight: &fields.weight,
        workout: fields.workout,
        creatine: fields.creatine,
        whey: fields.whey,
        breakfast: &fields.breakfast,
        morning_snack: &fields.morning_snack,
        lunch: &fields.lunch,
        pre_workout: &fields.pre_workout,
        post_workout: &fields.post_workout,
        dinner: &fields.dinner,
        bedtime_snack: &fields.bedtime_snack,
        calories: &fields.calories,
        protein: &fields.protein,
        notes: &fields.notes,
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<chrono::FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).ok()
}

/// Accepts strings, numbers and booleans as text. `null` becomes an empty string.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => {
            return Err(de::Error::custom(format!(
                "expected a string or number, found {other}"
            )));
        }
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
