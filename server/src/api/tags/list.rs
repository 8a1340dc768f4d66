use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::DietaryTag;
use crate::schema::dietary_tags;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TagItem {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TagsResponse {
    pub tags: Vec<TagItem>,
}

/// The registry is global and read-only here; tags come into existence on
/// demand when recipes reference them.
#[utoipa::path(
    get,
    path = "/api/dietary-tags",
    tag = "dietary-tags",
    responses(
        (status = 200, description = "All dietary tags", body = TagsResponse)
    )
)]
pub async fn list_tags(State(pool): State<Arc<DbPool>>) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    match dietary_tags::table
        .order(dietary_tags::name.asc())
        .select(DietaryTag::as_select())
        .load::<DietaryTag>(&mut conn)
    {
        Ok(tags) => (
            StatusCode::OK,
            Json(TagsResponse {
                tags: tags
                    .into_iter()
                    .map(|t| TagItem {
                        id: t.id,
                        name: t.name,
                    })
                    .collect(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch dietary tags: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to fetch dietary tags")),
            )
                .into_response()
        }
    }
}
