//! Shopping order service.
//!
//! Order commands (create, retrieve, update) are routed through
//! [`actors::OrderRouter`] instances to an [`domain::order::OrderService`],
//! and every command is answered with exactly one [`actors::ActionPerformed`].

pub mod actors;
pub mod config;
pub mod domain;
pub mod http;
pub mod metrics;
pub mod models;
pub mod telemetry;
