// ============================================================================
// Actors Module
// ============================================================================
//
// Actor-based request routing for the order service.
//
// Structure:
// - order_router - OrderRouter actor, its commands and the ActionPerformed reply
// - pool         - RouterPool, which runs and partitions several routers
//
// Note: Business rules live behind the OrderService port in crate::domain.
//       Routers only dispatch.
//
// ============================================================================

mod order_router;
mod pool;

pub use order_router::{ActionPerformed, OrderCommand, OrderOutcome, OrderRouter};
pub use pool::{DispatchError, RouterPool};
