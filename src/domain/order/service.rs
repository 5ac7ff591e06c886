use async_trait::async_trait;

use crate::models::{OrderRequest, OrderResponse};
use super::errors::OrderServiceError;

// ============================================================================
// Order Service Port
// ============================================================================
//
// Business rules, validation and persistence live behind this trait.
// Callers (the order router) forward payloads verbatim and never inspect
// the response.
//
// ============================================================================

pub type ServiceResult = Result<OrderResponse, OrderServiceError>;

#[async_trait]
pub trait OrderService: Send + Sync {
    async fn create_order(&self, request: OrderRequest) -> ServiceResult;

    async fn get_order_by_id(&self, id: &str) -> ServiceResult;

    async fn update_order(&self, id: &str, request: OrderRequest) -> ServiceResult;
}
