// ============================================================================
// Order Service Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderServiceError {
    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Invalid order request: {0}")]
    Invalid(String),

    #[error("Order service unavailable: {0}")]
    Unavailable(String),
}
