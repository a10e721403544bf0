// src/lib.rs

//! Amur: the domain core of a food-ordering backend.
//!
//! The crate owns everything below the HTTP boundary:
//!  - a food catalog with partial updates and upload cleanup,
//!  - a per-user basket keyed by `(user, food)` uniqueness,
//!  - the order workflow, which turns a basket into a priced, immutable order,
//!  - order status progression and admin deletion,
//!  - a user directory fed by the messenger bot's contact reports,
//!  - a static QR-token table registry for dine-in orders.
//!
//! Multi-stage operations run on a small async step [`pipeline`] engine.
//! Persistence goes through the traits in [`store`]; the SQLite implementations
//! live in [`store::sqlite`].

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod store;
pub mod tables;
pub mod workflows;

pub use crate::error::{Error, Result};
pub use crate::pipeline::{ContextData, Pipeline, PipelineControl, PipelineError, PipelineResult};
pub use crate::services::{BasketService, FoodService, OrderService, UserService};
pub use crate::tables::TableRegistry;
