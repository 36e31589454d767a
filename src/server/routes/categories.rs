use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{
    db::{Category, CategoryUpdate},
    error::{Entity, Error},
    server::app::AppState,
    services::CategoryService,
};

use super::{ApiResponse, Payload};

#[derive(Deserialize)]
struct NewCategory {
    title: String,
}

#[derive(Deserialize)]
struct CategoryChanges {
    #[serde(default)]
    title: Option<String>,
}

impl From<CategoryChanges> for CategoryUpdate {
    fn from(changes: CategoryChanges) -> Self {
        CategoryUpdate {
            title: changes.title,
        }
    }
}

async fn get_categories(State(service): State<CategoryService>) -> ApiResponse<Json<Vec<Category>>> {
    Ok(Json(service.list().await?))
}

async fn category(
    State(service): State<CategoryService>,
    Path(id): Path<i64>,
) -> ApiResponse<Json<Category>> {
    Ok(Json(service.get(id).await?))
}

async fn create_category(
    State(service): State<CategoryService>,
    Payload(new_category): Payload<NewCategory>,
) -> ApiResponse<(StatusCode, Json<Category>)> {
    let category = service.create(&new_category.title).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

async fn update_category(
    State(service): State<CategoryService>,
    Path(id): Path<i64>,
    Payload(changes): Payload<CategoryChanges>,
) -> ApiResponse<Json<Category>> {
    Ok(Json(service.update(id, changes.into()).await?))
}

async fn delete_category(
    State(service): State<CategoryService>,
    Path(id): Path<i64>,
) -> ApiResponse<StatusCode> {
    if service.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::not_found(Entity::Category, id).into())
    }
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/category", get(get_categories).post(create_category))
        .route(
            "/category/{id}",
            get(category).put(update_category).delete(delete_category),
        )
        .with_state(state)
}
