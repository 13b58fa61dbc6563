pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod schema;
pub mod serializer;
pub mod service;

pub use config::Config;
pub use db::Database;
pub use handlers::{router, AppState};
