//! HTTP layer: middleware, handlers and route tables

pub mod middleware;
pub mod services;
