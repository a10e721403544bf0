// src/models/mod.rs

//! Data structures representing database entities and operation inputs/outputs.

pub mod basket;
pub mod food;
pub mod order;
pub mod user;

pub use basket::{BasketLine, DetailedBasket, DetailedBasketLine, MAX_LINE_QUANTITY};
pub use food::{Food, FoodChanges, NewFood};
pub use order::{
  CreateOrderRequest, CreatedOrder, DeliveryType, NewOrder, NewOrderItem, Order, OrderDetails, OrderItem,
  OrderStatus, Placement, UserOrders,
};
pub use user::{Role, User, UserContact, UserProfile};
