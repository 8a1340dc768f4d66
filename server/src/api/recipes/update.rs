use crate::api::recipes::types::RecipeEnvelope;
use crate::api::recipes::validation;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::{
    AffiliateLinkInput, Difficulty, IngredientInput, NutritionInput, RecipeChangeset,
};
use crate::recipes::store::{self, RecipeUpdate};
use crate::schema::recipes;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

/// All fields optional: omitted fields are left untouched, provided array
/// fields fully replace the stored set.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecipeRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    pub difficulty: Option<Difficulty>,
    pub image_url: Option<String>,
    pub is_favorite: Option<bool>,
    pub ingredients: Option<Vec<IngredientInput>>,
    pub instructions: Option<Vec<String>>,
    pub dietary_tags: Option<Vec<String>>,
    pub nutrition: Option<NutritionInput>,
    pub affiliate_links: Option<Vec<AffiliateLinkInput>>,
}

#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Recipe updated successfully", body = RecipeEnvelope),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRecipeRequest>,
) -> impl IntoResponse {
    let details = validation::validate_update(&request);
    if !details.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::validation(details)),
        )
            .into_response();
    }

    let mut conn = get_conn!(pool);

    // Ownership gate. A recipe that exists but belongs to someone else is
    // reported exactly like one that doesn't exist.
    match recipes::table
        .filter(recipes::id.eq(id))
        .filter(recipes::user_id.eq(user.id))
        .select(recipes::id)
        .first::<Uuid>(&mut conn)
    {
        Ok(_) => {}
        Err(diesel::NotFound) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("Recipe not found")),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to fetch recipe: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to fetch recipe")),
            )
                .into_response();
        }
    }

    let update = RecipeUpdate {
        changeset: RecipeChangeset {
            title: request.title.as_deref(),
            description: request.description.as_deref(),
            prep_time: request.prep_time,
            cook_time: request.cook_time,
            servings: request.servings,
            difficulty: request.difficulty,
            image_url: request.image_url.as_deref(),
            is_favorite: request.is_favorite,
        },
        ingredients: request.ingredients.as_deref(),
        instructions: request.instructions.as_deref(),
        dietary_tags: request.dietary_tags.as_deref(),
        nutrition: request.nutrition.as_ref(),
        affiliate_links: request.affiliate_links.as_deref(),
    };

    if let Err(e) = store::update_recipe(&mut conn, id, &update) {
        tracing::error!("Failed to update recipe: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("Failed to update recipe")),
        )
            .into_response();
    }

    match store::load_recipe(&mut conn, id) {
        Ok(Some(aggregate)) => (
            StatusCode::OK,
            Json(RecipeEnvelope {
                recipe: aggregate.into(),
            }),
        )
            .into_response(),
        Ok(None) | Err(_) => {
            tracing::error!("Failed to reload recipe {} after update", id);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to fetch recipe")),
            )
                .into_response()
        }
    }
}
