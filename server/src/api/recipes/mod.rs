pub mod create;
pub mod delete;
pub mod favorite;
pub mod get;
pub mod list;
pub mod types;
pub mod update;
mod validation;

use crate::AppState;
use axum::routing::{get, patch};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route(
            "/{id}",
            get(get::get_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe),
        )
        .route("/{id}/favorite", patch(favorite::toggle_favorite))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        create::create_recipe,
        get::get_recipe,
        update::update_recipe,
        delete::delete_recipe,
        favorite::toggle_favorite,
    ),
    components(schemas(
        types::RecipeResponse,
        types::RecipeEnvelope,
        types::ListRecipesResponse,
        types::IngredientResponse,
        types::InstructionResponse,
        types::NutritionResponse,
        types::AffiliateLinkResponse,
        create::CreateRecipeRequest,
        update::UpdateRecipeRequest,
        delete::DeleteRecipeResponse,
        favorite::FavoriteResponse,
    ))
)]
pub struct ApiDoc;
