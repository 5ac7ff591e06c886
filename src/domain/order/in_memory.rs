use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{OrderRequest, OrderResponse};
use super::errors::OrderServiceError;
use super::service::{OrderService, ServiceResult};
use super::value_objects::OrderStatus;

// ============================================================================
// In-Memory Order Service
// ============================================================================
//
// Process-local store keyed by order id. Nothing survives a restart.
//
// ============================================================================

#[derive(Default)]
pub struct InMemoryOrderService {
    orders: RwLock<HashMap<String, OrderResponse>>,
}

impl InMemoryOrderService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }

    fn validate_item(item: &str) -> Result<(), OrderServiceError> {
        if item.trim().is_empty() {
            return Err(OrderServiceError::Invalid("item must not be blank".to_string()));
        }
        Ok(())
    }

    fn validate_qty(qty: u32) -> Result<(), OrderServiceError> {
        if qty == 0 {
            return Err(OrderServiceError::Invalid("qty must be greater than zero".to_string()));
        }
        Ok(())
    }

    /// Apply a partial update to `order`, enforcing status rules
    fn apply_update(order: &mut OrderResponse, request: OrderRequest) -> Result<(), OrderServiceError> {
        if request.is_empty() {
            return Err(OrderServiceError::Invalid("update carries no fields".to_string()));
        }

        if request.item.is_some() || request.qty.is_some() {
            if !order.status.allows_item_changes() {
                return Err(OrderServiceError::Invalid(format!(
                    "cannot modify contents of order in status {}",
                    order.status
                )));
            }
            if let Some(ref item) = request.item {
                Self::validate_item(item)?;
            }
            if let Some(qty) = request.qty {
                Self::validate_qty(qty)?;
            }
        }

        if let Some(next) = request.status {
            if !order.status.can_transition_to(next) {
                return Err(OrderServiceError::Invalid(format!(
                    "cannot move order from {} to {}",
                    order.status, next
                )));
            }
        }

        let before = order.clone();
        if let Some(item) = request.item {
            order.item = item;
        }
        if let Some(qty) = request.qty {
            order.qty = qty;
        }
        if let Some(status) = request.status {
            order.status = status;
        }

        // Unchanged orders keep their timestamp
        if *order != before {
            order.updated_at = Utc::now();
        }

        Ok(())
    }
}

#[async_trait]
impl OrderService for InMemoryOrderService {
    async fn create_order(&self, request: OrderRequest) -> ServiceResult {
        let item = request
            .item
            .ok_or_else(|| OrderServiceError::Invalid("item is required".to_string()))?;
        let qty = request
            .qty
            .ok_or_else(|| OrderServiceError::Invalid("qty is required".to_string()))?;
        Self::validate_item(&item)?;
        Self::validate_qty(qty)?;

        if let Some(status) = request.status {
            if status != OrderStatus::Created {
                return Err(OrderServiceError::Invalid(format!(
                    "new orders cannot start in status {}",
                    status
                )));
            }
        }

        let now = Utc::now();
        let order = OrderResponse {
            id: Uuid::new_v4().to_string(),
            item,
            qty,
            status: OrderStatus::Created,
            created_at: now,
            updated_at: now,
        };

        self.orders.write().await.insert(order.id.clone(), order.clone());

        tracing::debug!(order_id = %order.id, item = %order.item, qty = order.qty, "Stored new order");

        Ok(order)
    }

    async fn get_order_by_id(&self, id: &str) -> ServiceResult {
        self.orders
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| OrderServiceError::NotFound(id.to_string()))
    }

    async fn update_order(&self, id: &str, request: OrderRequest) -> ServiceResult {
        let mut orders = self.orders.write().await;
        let order = orders
            .get_mut(id)
            .ok_or_else(|| OrderServiceError::NotFound(id.to_string()))?;

        // Validate against a copy so a rejected update leaves the stored order untouched
        let mut updated = order.clone();
        Self::apply_update(&mut updated, request)?;
        *order = updated.clone();

        tracing::debug!(order_id = %id, status = %updated.status, "Updated order");

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_assigns_id_and_initial_status() {
        let service = InMemoryOrderService::new();
        let order = service.create_order(OrderRequest::new("pen", 2)).await.unwrap();

        assert!(Uuid::parse_str(&order.id).is_ok());
        assert_eq!(order.item, "pen");
        assert_eq!(order.qty, 2);
        assert_eq!(order.status, OrderStatus::Created);
        assert_eq!(order.created_at, order.updated_at);
        assert_eq!(service.len().await, 1);
    }

    #[tokio::test]
    async fn test_create_rejects_incomplete_requests() {
        let service = InMemoryOrderService::new();

        let missing_qty = OrderRequest { item: Some("pen".into()), ..Default::default() };
        assert!(matches!(
            service.create_order(missing_qty).await,
            Err(OrderServiceError::Invalid(_))
        ));

        assert!(matches!(
            service.create_order(OrderRequest::new("  ", 1)).await,
            Err(OrderServiceError::Invalid(_))
        ));

        assert!(matches!(
            service.create_order(OrderRequest::new("pen", 0)).await,
            Err(OrderServiceError::Invalid(_))
        ));

        let shipped = OrderRequest {
            status: Some(OrderStatus::Shipped),
            ..OrderRequest::new("pen", 1)
        };
        assert!(matches!(
            service.create_order(shipped).await,
            Err(OrderServiceError::Invalid(_))
        ));

        assert!(service.is_empty().await);
    }

    #[tokio::test]
    async fn test_get_unknown_order_is_not_found() {
        let service = InMemoryOrderService::new();
        assert_eq!(
            service.get_order_by_id("unknown-id").await,
            Err(OrderServiceError::NotFound("unknown-id".to_string()))
        );
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let service = InMemoryOrderService::new();
        let created = service.create_order(OrderRequest::new("pen", 2)).await.unwrap();

        let updated = service
            .update_order(&created.id, OrderRequest::with_qty(5))
            .await
            .unwrap();

        assert_eq!(updated.item, "pen");
        assert_eq!(updated.qty, 5);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(service.get_order_by_id(&created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_unknown_order_is_not_found() {
        let service = InMemoryOrderService::new();
        assert!(matches!(
            service.update_order("missing", OrderRequest::with_qty(1)).await,
            Err(OrderServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_rejected_update_leaves_order_untouched() {
        let service = InMemoryOrderService::new();
        let created = service.create_order(OrderRequest::new("pen", 2)).await.unwrap();

        service
            .update_order(&created.id, OrderRequest::with_status(OrderStatus::Confirmed))
            .await
            .unwrap();

        // Contents are frozen once confirmed
        let result = service
            .update_order(&created.id, OrderRequest::with_qty(9))
            .await;
        assert!(matches!(result, Err(OrderServiceError::Invalid(_))));

        let stored = service.get_order_by_id(&created.id).await.unwrap();
        assert_eq!(stored.qty, 2);
        assert_eq!(stored.status, OrderStatus::Confirmed);
    }

    #[tokio::test]
    async fn test_status_lifecycle() {
        let service = InMemoryOrderService::new();
        let id = service.create_order(OrderRequest::new("pen", 1)).await.unwrap().id;

        for status in [OrderStatus::Confirmed, OrderStatus::Shipped, OrderStatus::Delivered] {
            let order = service
                .update_order(&id, OrderRequest::with_status(status))
                .await
                .unwrap();
            assert_eq!(order.status, status);
        }

        assert!(matches!(
            service.update_order(&id, OrderRequest::with_status(OrderStatus::Cancelled)).await,
            Err(OrderServiceError::Invalid(_))
        ));
    }

    #[tokio::test]
    async fn test_terminal_orders_reject_repeated_status() {
        let service = InMemoryOrderService::new();

        let delivered = service.create_order(OrderRequest::new("pen", 1)).await.unwrap().id;
        for status in [OrderStatus::Confirmed, OrderStatus::Shipped, OrderStatus::Delivered] {
            service.update_order(&delivered, OrderRequest::with_status(status)).await.unwrap();
        }
        let before = service.get_order_by_id(&delivered).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        assert!(matches!(
            service.update_order(&delivered, OrderRequest::with_status(OrderStatus::Delivered)).await,
            Err(OrderServiceError::Invalid(_))
        ));
        assert_eq!(service.get_order_by_id(&delivered).await.unwrap(), before);

        let cancelled = service.create_order(OrderRequest::new("pen", 1)).await.unwrap().id;
        service
            .update_order(&cancelled, OrderRequest::with_status(OrderStatus::Cancelled))
            .await
            .unwrap();

        assert!(matches!(
            service.update_order(&cancelled, OrderRequest::with_status(OrderStatus::Cancelled)).await,
            Err(OrderServiceError::Invalid(_))
        ));
    }

    #[tokio::test]
    async fn test_same_status_on_open_order_keeps_timestamp() {
        let service = InMemoryOrderService::new();
        let created = service.create_order(OrderRequest::new("pen", 1)).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let unchanged = service
            .update_order(&created.id, OrderRequest::with_status(OrderStatus::Created))
            .await
            .unwrap();

        assert_eq!(unchanged, created);
    }

    #[tokio::test]
    async fn test_empty_update_is_invalid() {
        let service = InMemoryOrderService::new();
        let id = service.create_order(OrderRequest::new("pen", 1)).await.unwrap().id;

        assert!(matches!(
            service.update_order(&id, OrderRequest::default()).await,
            Err(OrderServiceError::Invalid(_))
        ));
    }
}
