use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::category::Category;
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CategoryDto {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) slug: String,
    pub(crate) description: Option<String>,
    pub(crate) icon: String,
    pub(crate) color: String,
    pub(crate) thread_count: i64,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            slug: category.slug,
            description: category.description,
            icon: category.icon,
            color: category.color,
            thread_count: category.thread_count,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "categories",
    responses(
        (status = 200, description = "All categories ordered by name", body = [CategoryDto]),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CategoryDto>>> {
    let categories = state.forum_service.list_categories().await?;
    Ok(Json(categories.into_iter().map(CategoryDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/categories/{slug}",
    tag = "categories",
    params(
        ("slug" = String, Path, description = "Category slug")
    ),
    responses(
        (status = 200, description = "Category found", body = CategoryDto),
        (status = 404, description = "Category not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<CategoryDto>> {
    let category = state.forum_service.get_category(&slug).await?;
    Ok(Json(category.into()))
}
