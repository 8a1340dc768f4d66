//! Wire shapes for the recipe aggregate. Storage rows are snake_case; the
//! API surface is camelCase, so the reshaping all happens here, in one
//! place, via `From` impls.

use crate::models::{AffiliateLinkRow, Difficulty, IngredientRow, InstructionRow, NutritionRow};
use crate::recipes::store::RecipeAggregate;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IngredientResponse {
    pub id: Uuid,
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub notes: Option<String>,
}

/// `step_number` stays snake_case on the wire; it is the one deliberate
/// exception to the camelCase surface and clients already depend on it.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InstructionResponse {
    pub step_number: i32,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NutritionResponse {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub sugar: Option<f64>,
    pub fiber: Option<f64>,
    pub sodium: Option<f64>,
}

impl Default for NutritionResponse {
    fn default() -> Self {
        Self {
            calories: 0.0,
            protein: 0.0,
            carbs: 0.0,
            fat: 0.0,
            sugar: None,
            fiber: None,
            sodium: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AffiliateLinkResponse {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    pub id: Uuid,
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
    pub ingredients: Vec<IngredientResponse>,
    pub instructions: Vec<InstructionResponse>,
    pub dietary_tags: Vec<String>,
    pub nutrition: NutritionResponse,
    pub affiliate_links: Vec<AffiliateLinkResponse>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeEnvelope {
    pub recipe: RecipeResponse,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeResponse>,
}

impl From<IngredientRow> for IngredientResponse {
    fn from(row: IngredientRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            quantity: row.quantity,
            unit: row.unit,
            notes: row.notes,
        }
    }
}

impl From<InstructionRow> for InstructionResponse {
    fn from(row: InstructionRow) -> Self {
        Self {
            step_number: row.step_number,
            content: row.content,
        }
    }
}

impl From<NutritionRow> for NutritionResponse {
    fn from(row: NutritionRow) -> Self {
        Self {
            calories: row.calories,
            protein: row.protein,
            carbs: row.carbs,
            fat: row.fat,
            sugar: row.sugar,
            fiber: row.fiber,
            sodium: row.sodium,
        }
    }
}

impl From<AffiliateLinkRow> for AffiliateLinkResponse {
    fn from(row: AffiliateLinkRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            url: row.url,
            description: row.description,
        }
    }
}

impl From<RecipeAggregate> for RecipeResponse {
    fn from(aggregate: RecipeAggregate) -> Self {
        let recipe = aggregate.recipe;
        Self {
            id: recipe.id,
            title: recipe.title,
            description: recipe.description,
            prep_time: recipe.prep_time,
            cook_time: recipe.cook_time,
            servings: recipe.servings,
            difficulty: recipe.difficulty,
            image_url: recipe.image_url,
            is_favorite: recipe.is_favorite,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
            ingredients: aggregate.ingredients.into_iter().map(Into::into).collect(),
            instructions: aggregate.instructions.into_iter().map(Into::into).collect(),
            dietary_tags: aggregate.dietary_tags,
            // A recipe without a nutrition row reads back as all-zero macros
            nutrition: aggregate.nutrition.map(Into::into).unwrap_or_default(),
            affiliate_links: aggregate
                .affiliate_links
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Recipe;

    fn sample_aggregate() -> RecipeAggregate {
        let recipe_id = Uuid::new_v4();
        let now = Utc::now();
        RecipeAggregate {
            recipe: Recipe {
                id: recipe_id,
                user_id: Uuid::new_v4(),
                title: "Scrambled eggs".to_string(),
                description: "Fast breakfast".to_string(),
                prep_time: 10,
                cook_time: 20,
                servings: 2,
                difficulty: Difficulty::Easy,
                image_url: "https://x/y.jpg".to_string(),
                is_favorite: false,
                created_at: now,
                updated_at: now,
            },
            ingredients: vec![IngredientRow {
                id: Uuid::new_v4(),
                recipe_id,
                name: "Egg".to_string(),
                quantity: "2".to_string(),
                unit: "ea".to_string(),
                notes: None,
            }],
            instructions: vec![
                InstructionRow {
                    id: Uuid::new_v4(),
                    recipe_id,
                    step_number: 1,
                    content: "Crack eggs".to_string(),
                },
                InstructionRow {
                    id: Uuid::new_v4(),
                    recipe_id,
                    step_number: 2,
                    content: "Cook".to_string(),
                },
            ],
            dietary_tags: vec!["vegetarian".to_string()],
            nutrition: None,
            affiliate_links: vec![],
        }
    }

    #[test]
    fn recipe_fields_are_camel_case_on_the_wire() {
        let value = serde_json::to_value(RecipeResponse::from(sample_aggregate())).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            "prepTime",
            "cookTime",
            "imageUrl",
            "isFavorite",
            "createdAt",
            "updatedAt",
            "dietaryTags",
            "affiliateLinks",
        ] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert!(!obj.contains_key("prep_time"));
    }

    #[test]
    fn instruction_items_keep_snake_case_step_number() {
        let value = serde_json::to_value(RecipeResponse::from(sample_aggregate())).unwrap();
        let steps = value["instructions"].as_array().unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0]["step_number"], 1);
        assert_eq!(steps[1]["step_number"], 2);
        assert_eq!(steps[1]["content"], "Cook");
    }

    #[test]
    fn missing_nutrition_reads_back_zeroed() {
        let response = RecipeResponse::from(sample_aggregate());
        assert_eq!(response.nutrition.calories, 0.0);
        assert_eq!(response.nutrition.fat, 0.0);
        assert!(response.nutrition.sodium.is_none());
    }
}
