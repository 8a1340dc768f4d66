use chrono::{DateTime, Utc};
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::prelude::*;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use serde::{Deserialize, Serialize};
use std::io::Write;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Recipe difficulty, stored as text and constrained by a CHECK in the schema.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow, ToSchema,
)]
#[diesel(sql_type = Text)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl ToSql<Text, Pg> for Difficulty {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for Difficulty {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match std::str::from_utf8(bytes.as_bytes())? {
            "Easy" => Ok(Difficulty::Easy),
            "Medium" => Ok(Difficulty::Medium),
            "Hard" => Ok(Difficulty::Hard),
            other => Err(format!("unrecognized difficulty: {other}").into()),
        }
    }
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Recipe {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub difficulty: Difficulty,
    pub image_url: String,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub user_id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub difficulty: Difficulty,
    pub image_url: &'a str,
    pub is_favorite: bool,
}

/// Partial update of the recipe row. `None` fields are left untouched.
#[derive(AsChangeset, Default)]
#[diesel(table_name = crate::schema::recipes)]
pub struct RecipeChangeset<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    pub difficulty: Option<Difficulty>,
    pub image_url: Option<&'a str>,
    pub is_favorite: Option<bool>,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone)]
#[diesel(belongs_to(Recipe))]
#[diesel(table_name = crate::schema::ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct IngredientRow {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub notes: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::ingredients)]
pub struct NewIngredient<'a> {
    pub recipe_id: Uuid,
    pub name: &'a str,
    pub quantity: &'a str,
    pub unit: &'a str,
    pub notes: Option<&'a str>,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone)]
#[diesel(belongs_to(Recipe))]
#[diesel(table_name = crate::schema::instructions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct InstructionRow {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub step_number: i32,
    pub content: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::instructions)]
pub struct NewInstruction<'a> {
    pub recipe_id: Uuid,
    pub step_number: i32,
    pub content: &'a str,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone)]
#[diesel(belongs_to(Recipe))]
#[diesel(primary_key(recipe_id))]
#[diesel(table_name = crate::schema::nutrition)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NutritionRow {
    pub recipe_id: Uuid,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub sugar: Option<f64>,
    pub fiber: Option<f64>,
    pub sodium: Option<f64>,
}

/// Used for both the initial insert and the upsert on update, so `None`
/// must overwrite (the provided nutrition object fully replaces the row).
#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::nutrition)]
#[diesel(treat_none_as_null = true)]
pub struct NewNutrition {
    pub recipe_id: Uuid,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub sugar: Option<f64>,
    pub fiber: Option<f64>,
    pub sodium: Option<f64>,
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::dietary_tags)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DietaryTag {
    pub id: Uuid,
    pub name: String,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone)]
#[diesel(belongs_to(Recipe))]
#[diesel(table_name = crate::schema::affiliate_links)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AffiliateLinkRow {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::affiliate_links)]
pub struct NewAffiliateLink<'a> {
    pub recipe_id: Uuid,
    pub title: &'a str,
    pub url: &'a str,
    pub description: Option<&'a str>,
}

// Wire-side shapes for recipe children, shared by the create and update
// request bodies.

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct IngredientInput {
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NutritionInput {
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
    pub sugar: Option<f64>,
    pub fiber: Option<f64>,
    pub sodium: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AffiliateLinkInput {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_serializes_as_capitalized_name() {
        assert_eq!(
            serde_json::to_string(&Difficulty::Medium).unwrap(),
            "\"Medium\""
        );
        assert_eq!(Difficulty::Hard.as_str(), "Hard");
    }

    #[test]
    fn difficulty_deserializes_from_capitalized_name() {
        let d: Difficulty = serde_json::from_str("\"Easy\"").unwrap();
        assert_eq!(d, Difficulty::Easy);
    }

    #[test]
    fn difficulty_rejects_unknown_values() {
        assert!(serde_json::from_str::<Difficulty>("\"easy\"").is_err());
        assert!(serde_json::from_str::<Difficulty>("\"Extreme\"").is_err());
    }

    #[test]
    fn nutrition_input_defaults_missing_macros_to_zero() {
        let n: NutritionInput = serde_json::from_str("{\"calories\": 150}").unwrap();
        assert_eq!(n.calories, 150.0);
        assert_eq!(n.protein, 0.0);
        assert_eq!(n.fat, 0.0);
        assert!(n.sugar.is_none());
    }
}
