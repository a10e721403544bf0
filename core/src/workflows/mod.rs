// src/workflows/mod.rs

//! Multi-step domain workflows built on [`crate::pipeline`].

pub mod contexts;
pub mod create_order_pipeline;

pub use contexts::{CreateOrderCtxData, OrderDeps};
pub use create_order_pipeline::build_create_order_pipeline;
