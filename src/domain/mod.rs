// ============================================================================
// Domain Layer - Order Management
// ============================================================================
//
// The order service collaborator: its port, its errors and a process-local
// implementation. Nothing here knows about actors or HTTP.
//
// ============================================================================

pub mod order;
