use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use tracing::instrument;

use crate::error::{ApiError, ApiErrorResponse, Entity};
use crate::serializer::{serialize_restaurant, RestaurantResponse};
use crate::service::PizzaService;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(list_restaurants))
        .route(
            "/restaurants/{id}",
            get(get_restaurant).delete(delete_restaurant),
        )
}

/// Only unsigned decimal digits name a restaurant; anything else, including
/// a leading `+` or `-`, is treated as unknown.
fn parse_restaurant_id(raw: &str) -> Result<i32, ApiError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::NotFound(Entity::Restaurant));
    }
    raw.parse::<i32>()
        .map_err(|_| ApiError::NotFound(Entity::Restaurant))
}

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "List of restaurants", body = [RestaurantResponse]),
        (status = 500, description = "Internal server error", body = ApiErrorResponse),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<RestaurantResponse>>, ApiError> {
    let restaurants = state
        .db
        .run(|conn| PizzaService::new(conn).list_restaurants())
        .await?;

    Ok(Json(
        restaurants
            .iter()
            .map(|r| serialize_restaurant(r, None))
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    responses(
        (status = 200, description = "Restaurant details with its pizzas", body = RestaurantResponse),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RestaurantResponse>, ApiError> {
    let restaurant_id = parse_restaurant_id(&id)?;

    let (restaurant, restaurant_pizzas) = state
        .db
        .run(move |conn| PizzaService::new(conn).get_restaurant(restaurant_id))
        .await?;

    Ok(Json(serialize_restaurant(
        &restaurant,
        Some(restaurant_pizzas.as_slice()),
    )))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}",
    responses(
        (status = 204, description = "Restaurant and its restaurant pizzas deleted"),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let restaurant_id = parse_restaurant_id(&id)?;

    state
        .db
        .run(move |conn| PizzaService::new(conn).delete_restaurant(restaurant_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
