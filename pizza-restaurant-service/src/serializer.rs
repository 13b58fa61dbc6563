//! Conversion of stored rows into their JSON representations.
//!
//! Each entity has one function. Whether related rows are nested is decided by
//! the caller through an `Option` argument, so every representation is at most
//! one level deep and no cycle can form.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PizzaResponse {
    pub id: i32,
    pub name: String,
    /// Comma separated ingredient list
    pub ingredients: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RestaurantResponse {
    pub id: i32,
    pub name: String,
    pub address: String,
    /// Present on single-restaurant responses only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_pizzas: Option<Vec<RestaurantPizzaResponse>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RestaurantPizzaResponse {
    pub id: i32,
    pub price: i32,
    pub pizza_id: i32,
    pub restaurant_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pizza: Option<PizzaResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(no_recursion)]
    pub restaurant: Option<Box<RestaurantResponse>>,
}

pub fn serialize_pizza(pizza: &models::Pizza) -> PizzaResponse {
    PizzaResponse {
        id: pizza.id,
        name: pizza.name.clone(),
        ingredients: pizza.ingredients.clone(),
    }
}

/// `restaurant_pizzas` is `Some` when the nested list should be emitted. The
/// nested entries never carry their own `pizza` or `restaurant`.
pub fn serialize_restaurant(
    restaurant: &models::Restaurant,
    restaurant_pizzas: Option<&[models::RestaurantPizza]>,
) -> RestaurantResponse {
    RestaurantResponse {
        id: restaurant.id,
        name: restaurant.name.clone(),
        address: restaurant.address.clone(),
        restaurant_pizzas: restaurant_pizzas.map(|rows| {
            rows.iter()
                .map(|rp| serialize_restaurant_pizza(rp, None))
                .collect()
        }),
    }
}

pub fn serialize_restaurant_pizza(
    restaurant_pizza: &models::RestaurantPizza,
    related: Option<(&models::Pizza, &models::Restaurant)>,
) -> RestaurantPizzaResponse {
    let (pizza, restaurant) = match related {
        Some((pizza, restaurant)) => (
            Some(serialize_pizza(pizza)),
            Some(Box::new(serialize_restaurant(restaurant, None))),
        ),
        None => (None, None),
    };

    RestaurantPizzaResponse {
        id: restaurant_pizza.id,
        price: restaurant_pizza.price,
        pizza_id: restaurant_pizza.pizza_id,
        restaurant_id: restaurant_pizza.restaurant_id,
        pizza,
        restaurant,
    }
}
