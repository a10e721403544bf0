// src/services/mod.rs

pub mod basket_service;
pub mod food_service;
pub mod order_service;
pub mod user_service;

pub use basket_service::BasketService;
pub use food_service::FoodService;
pub use order_service::OrderService;
pub use user_service::UserService;
