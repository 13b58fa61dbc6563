use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use tracing::{debug, info};

use crate::error::{Entity, ServiceError};
use crate::models::{
    validate_price, NewRestaurantPizza, Pizza, Restaurant, RestaurantPizza, ValidationError,
};
use crate::schema::{pizzas, restaurant_pizzas, restaurants};

/// Fields of a restaurant-pizza as received from a client, before any
/// lookup or validation has happened.
///
/// Ids are kept as received; one that does not fit a row id simply resolves
/// to nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateRestaurantPizza {
    pub pizza_id: Option<i64>,
    pub restaurant_id: Option<i64>,
    pub price: Option<i64>,
}

fn row_id(id: Option<i64>) -> Option<i32> {
    id.and_then(|id| i32::try_from(id).ok())
}

pub struct PizzaService<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> PizzaService<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }

    pub fn list_restaurants(&mut self) -> Result<Vec<Restaurant>, ServiceError> {
        Ok(restaurants::table
            .order(restaurants::id)
            .select(Restaurant::as_select())
            .load(self.conn)?)
    }

    pub fn list_pizzas(&mut self) -> Result<Vec<Pizza>, ServiceError> {
        Ok(pizzas::table
            .order(pizzas::id)
            .select(Pizza::as_select())
            .load(self.conn)?)
    }

    pub fn get_restaurant(
        &mut self,
        restaurant_id: i32,
    ) -> Result<(Restaurant, Vec<RestaurantPizza>), ServiceError> {
        self.conn.transaction::<_, ServiceError, _>(|conn| {
            let restaurant = restaurants::table
                .find(restaurant_id)
                .select(Restaurant::as_select())
                .first(conn)
                .optional()?
                .ok_or_else(|| {
                    debug!(restaurant_id, "restaurant not found");
                    ServiceError::NotFound(Entity::Restaurant)
                })?;
            let restaurant_pizzas = RestaurantPizza::belonging_to(&restaurant)
                .order(restaurant_pizzas::id)
                .select(RestaurantPizza::as_select())
                .load(conn)?;
            Ok((restaurant, restaurant_pizzas))
        })
    }

    /// Removes the restaurant together with every restaurant-pizza that
    /// references it, in a single transaction.
    pub fn delete_restaurant(&mut self, restaurant_id: i32) -> Result<(), ServiceError> {
        self.conn.transaction::<_, ServiceError, _>(|conn| {
            let exists = restaurants::table
                .find(restaurant_id)
                .select(restaurants::id)
                .first::<i32>(conn)
                .optional()?;
            if exists.is_none() {
                return Err(ServiceError::NotFound(Entity::Restaurant));
            }

            let removed = diesel::delete(
                restaurant_pizzas::table.filter(restaurant_pizzas::restaurant_id.eq(restaurant_id)),
            )
            .execute(conn)?;
            diesel::delete(restaurants::table.find(restaurant_id)).execute(conn)?;

            info!(restaurant_id, removed, "deleted restaurant");
            Ok(())
        })
    }

    /// Validates and stores a new restaurant-pizza.
    ///
    /// Checks run in a fixed order: price, then pizza, then restaurant. The
    /// first failure wins.
    pub fn create_restaurant_pizza(
        &mut self,
        payload: CreateRestaurantPizza,
    ) -> Result<(RestaurantPizza, Pizza, Restaurant), ServiceError> {
        // Reject the price before touching the store.
        let price = validate_price(payload.price.ok_or(ValidationError::MissingPrice)?)?;

        self.conn.transaction::<_, ServiceError, _>(|conn| {
            let pizza = match row_id(payload.pizza_id) {
                Some(id) => pizzas::table
                    .find(id)
                    .select(Pizza::as_select())
                    .first(conn)
                    .optional()?,
                None => None,
            }
            .ok_or(ServiceError::NotFound(Entity::Pizza))?;

            let restaurant = match row_id(payload.restaurant_id) {
                Some(id) => restaurants::table
                    .find(id)
                    .select(Restaurant::as_select())
                    .first(conn)
                    .optional()?,
                None => None,
            }
            .ok_or(ServiceError::NotFound(Entity::Restaurant))?;

            let new_row = NewRestaurantPizza::new(restaurant.id, pizza.id, price);
            let restaurant_pizza = diesel::insert_into(restaurant_pizzas::table)
                .values(&new_row)
                .returning(RestaurantPizza::as_returning())
                .get_result(conn)?;

            info!(
                id = restaurant_pizza.id,
                restaurant_id = restaurant.id,
                pizza_id = pizza.id,
                price = restaurant_pizza.price,
                "created restaurant pizza"
            );
            Ok((restaurant_pizza, pizza, restaurant))
        })
    }
}
