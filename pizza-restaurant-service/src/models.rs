use diesel::prelude::*;

use crate::schema::{pizzas, restaurant_pizzas, restaurants};

pub const MIN_PRICE: i32 = 1;
pub const MAX_PRICE: i32 = 30;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub address: String,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct NewRestaurant<'a> {
    pub name: &'a str,
    pub address: &'a str,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = pizzas)]
pub struct Pizza {
    pub id: i32,
    pub name: String,
    pub ingredients: String,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = pizzas)]
pub struct NewPizza<'a> {
    pub name: &'a str,
    pub ingredients: &'a str,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq)]
#[diesel(belongs_to(Restaurant))]
#[diesel(belongs_to(Pizza))]
#[diesel(table_name = restaurant_pizzas)]
pub struct RestaurantPizza {
    pub id: i32,
    pub price: i32,
    pub restaurant_id: i32,
    pub pizza_id: i32,
}

/// A price that satisfies `MIN_PRICE <= price <= MAX_PRICE`.
///
/// Only [`validate_price`] builds one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price(i32);

impl Price {
    pub fn get(self) -> i32 {
        self.0
    }
}

/// A restaurant-pizza row ready to insert. Its price has already been
/// validated, so diesel never sees an out-of-range value.
#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = restaurant_pizzas)]
pub struct NewRestaurantPizza {
    price: i32,
    restaurant_id: i32,
    pizza_id: i32,
}

impl NewRestaurantPizza {
    pub fn new(restaurant_id: i32, pizza_id: i32, price: Price) -> Self {
        Self {
            price: price.get(),
            restaurant_id,
            pizza_id,
        }
    }

    pub fn price(&self) -> i32 {
        self.price
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("price must be between 1 and 30, got {0}")]
    PriceOutOfRange(i64),
    #[error("price must be a whole number, got {0}")]
    FractionalPrice(f64),
    #[error("price is required")]
    MissingPrice,
}

pub fn validate_price(price: i64) -> Result<Price, ValidationError> {
    match i32::try_from(price) {
        Ok(p) if (MIN_PRICE..=MAX_PRICE).contains(&p) => Ok(Price(p)),
        _ => Err(ValidationError::PriceOutOfRange(price)),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(1)]
    #[case(5)]
    #[case(29)]
    #[case(30)]
    fn test_validate_price_accepts_in_range(#[case] price: i64) {
        assert_eq!(validate_price(price).map(Price::get), Ok(price as i32));
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(31)]
    #[case(i64::from(i32::MAX) + 1)]
    #[case(i64::MIN)]
    fn test_validate_price_rejects_out_of_range(#[case] price: i64) {
        assert_eq!(
            validate_price(price),
            Err(ValidationError::PriceOutOfRange(price))
        );
    }

    #[test]
    fn test_every_allowed_price_builds_a_row() {
        for price in i64::from(MIN_PRICE)..=i64::from(MAX_PRICE) {
            let row = NewRestaurantPizza::new(1, 2, validate_price(price).unwrap());
            assert_eq!(i64::from(row.price()), price);
        }
    }
}
