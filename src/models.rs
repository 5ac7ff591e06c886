use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::domain::order::OrderStatus;

// ============================================================================
// Order Payloads
// ============================================================================
//
// The router forwards these without inspecting them. Field rules belong to
// the order service.
//
// ============================================================================

/// Inbound order payload, used for both creation and partial updates
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct OrderRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
}

impl OrderRequest {
    pub fn new(item: impl Into<String>, qty: u32) -> Self {
        Self {
            item: Some(item.into()),
            qty: Some(qty),
            status: None,
        }
    }

    pub fn with_qty(qty: u32) -> Self {
        Self {
            qty: Some(qty),
            ..Self::default()
        }
    }

    pub fn with_status(status: OrderStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.item.is_none() && self.qty.is_none() && self.status.is_none()
    }
}

/// Order as stored by the service
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderResponse {
    pub id: String,
    pub item: String,
    pub qty: u32,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
