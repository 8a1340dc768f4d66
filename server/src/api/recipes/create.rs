use crate::api::recipes::types::RecipeEnvelope;
use crate::api::recipes::validation;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::{AffiliateLinkInput, Difficulty, IngredientInput, NutritionInput};
use crate::recipes::store::{self, NewRecipeAggregate};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeRequest {
    pub title: String,
    pub description: String,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub difficulty: Difficulty,
    pub image_url: String,
    #[serde(default)]
    pub is_favorite: bool,
    pub ingredients: Vec<IngredientInput>,
    /// Plain strings on write; step numbers are assigned from array position.
    pub instructions: Vec<String>,
    #[serde(default)]
    pub dietary_tags: Vec<String>,
    pub nutrition: NutritionInput,
    #[serde(default)]
    pub affiliate_links: Vec<AffiliateLinkInput>,
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created successfully", body = RecipeEnvelope),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<CreateRecipeRequest>,
) -> impl IntoResponse {
    let details = validation::validate_create(&request);
    if !details.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::validation(details)),
        )
            .into_response();
    }

    let mut conn = get_conn!(pool);

    let result = store::create_recipe(
        &mut conn,
        &NewRecipeAggregate {
            user_id: user.id,
            title: &request.title,
            description: &request.description,
            prep_time: request.prep_time,
            cook_time: request.cook_time,
            servings: request.servings,
            difficulty: request.difficulty,
            image_url: &request.image_url,
            is_favorite: request.is_favorite,
            ingredients: &request.ingredients,
            instructions: &request.instructions,
            dietary_tags: &request.dietary_tags,
            nutrition: &request.nutrition,
            affiliate_links: &request.affiliate_links,
        },
    );

    let recipe_id = match result {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to create recipe: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to create recipe")),
            )
                .into_response();
        }
    };

    // Read the aggregate back so the response carries generated ids and
    // timestamps.
    match store::load_recipe(&mut conn, recipe_id) {
        Ok(Some(aggregate)) => (
            StatusCode::CREATED,
            Json(RecipeEnvelope {
                recipe: aggregate.into(),
            }),
        )
            .into_response(),
        Ok(None) | Err(_) => {
            tracing::error!("Failed to reload recipe {} after create", recipe_id);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to fetch recipe")),
            )
                .into_response()
        }
    }
}
