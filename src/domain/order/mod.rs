// ============================================================================
// Order Domain - Service Port and Bundled Implementation
// ============================================================================
//
// This module contains ALL Order-specific code:
// - Value objects (OrderStatus and its transition rules)
// - Errors (OrderServiceError)
// - Service port (OrderService trait)
// - In-memory service (InMemoryOrderService)
//
// The router in crate::actors depends only on the port.
//
// ============================================================================

pub mod value_objects;
pub mod errors;
pub mod service;
pub mod in_memory;

// Re-export for convenience
pub use value_objects::*;
pub use errors::*;
pub use service::*;
pub use in_memory::*;
