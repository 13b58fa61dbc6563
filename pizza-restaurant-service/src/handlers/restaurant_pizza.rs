use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::Number;
use tracing::{instrument, warn};
use utoipa::ToSchema;

use crate::error::{ApiError, ApiErrorsResponse};
use crate::models::ValidationError;
use crate::serializer::{serialize_restaurant_pizza, RestaurantPizzaResponse};
use crate::service::{CreateRestaurantPizza, PizzaService};

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/restaurant_pizzas", post(create_restaurant_pizza))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRestaurantPizzaRequest {
    /// Pizza offered by the restaurant
    pub pizza_id: Option<i64>,
    /// Restaurant offering the pizza
    pub restaurant_id: Option<i64>,
    /// Price between 1 and 30. Whole-valued decimals such as `5.0` are accepted.
    #[schema(value_type = Option<f64>)]
    pub price: Option<Number>,
}

impl TryFrom<CreateRestaurantPizzaRequest> for CreateRestaurantPizza {
    type Error = ValidationError;

    fn try_from(request: CreateRestaurantPizzaRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            pizza_id: request.pizza_id,
            restaurant_id: request.restaurant_id,
            price: request.price.as_ref().map(whole_price).transpose()?,
        })
    }
}

/// Whole numbers beyond `i64` saturate; the range check rejects them later.
fn whole_price(price: &Number) -> Result<i64, ValidationError> {
    if let Some(price) = price.as_i64() {
        return Ok(price);
    }
    let price = price.as_f64().unwrap_or(f64::NAN);
    if price.fract() == 0.0 {
        Ok(price as i64)
    } else {
        Err(ValidationError::FractionalPrice(price))
    }
}

#[utoipa::path(
    post,
    path = "/restaurant_pizzas",
    request_body = CreateRestaurantPizzaRequest,
    responses(
        (status = 201, description = "Restaurant pizza created", body = RestaurantPizzaResponse),
        (status = 400, description = "Validation failed", body = ApiErrorsResponse),
        (status = 404, description = "Pizza or restaurant not found", body = ApiErrorsResponse),
    ),
    tag = "restaurant_pizzas"
)]
#[instrument(skip(state, payload))]
pub async fn create_restaurant_pizza(
    State(state): State<AppState>,
    payload: Result<Json<CreateRestaurantPizzaRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RestaurantPizzaResponse>), ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection, "rejected restaurant pizza payload");
        ApiError::Validation
    })?;

    let payload = CreateRestaurantPizza::try_from(request)
        .map_err(|e| ApiError::from_create(e.into()))?;

    let (restaurant_pizza, pizza, restaurant) = state
        .db
        .run(move |conn| PizzaService::new(conn).create_restaurant_pizza(payload))
        .await
        .map_err(ApiError::from_create)?;

    Ok((
        StatusCode::CREATED,
        Json(serialize_restaurant_pizza(
            &restaurant_pizza,
            Some((&pizza, &restaurant)),
        )),
    ))
}
