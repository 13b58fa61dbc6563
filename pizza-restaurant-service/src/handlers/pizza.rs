use axum::{extract::State, response::Json, routing::get, Router};
use tracing::instrument;

use crate::error::{ApiError, ApiErrorResponse};
use crate::serializer::{serialize_pizza, PizzaResponse};
use crate::service::PizzaService;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/pizzas", get(list_pizzas))
}

#[utoipa::path(
    get,
    path = "/pizzas",
    responses(
        (status = 200, description = "List of pizzas", body = [PizzaResponse]),
        (status = 500, description = "Internal server error", body = ApiErrorResponse),
    ),
    tag = "pizzas"
)]
#[instrument(skip(state))]
pub async fn list_pizzas(
    State(state): State<AppState>,
) -> Result<Json<Vec<PizzaResponse>>, ApiError> {
    let pizzas = state
        .db
        .run(|conn| PizzaService::new(conn).list_pizzas())
        .await?;

    Ok(Json(pizzas.iter().map(serialize_pizza).collect()))
}
