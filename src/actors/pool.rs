use actix::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::config::RouterSettings;
use crate::domain::order::OrderService;
use crate::metrics::Metrics;
use crate::models::OrderRequest;
use super::order_router::{ActionPerformed, OrderCommand, OrderRouter};

// ============================================================================
// Router Pool - Runs several order routers side by side
// ============================================================================
//
// Responsibilities:
// - Starts the configured number of OrderRouter instances
// - Sends every command for a given order id to the same instance, so
//   commands for one order keep their relative order
// - Spreads creates (which carry no id yet) round-robin
//
// Pool Layout:
//   RouterPool
//   ├── OrderRouter (partition 0)
//   ├── OrderRouter (partition 1)
//   └── ...
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Order router unavailable: {0}")]
    RouterUnavailable(#[from] MailboxError),
}

#[derive(Clone)]
pub struct RouterPool {
    routers: Arc<Vec<Addr<OrderRouter>>>,
    next_create: Arc<AtomicUsize>,
}

impl RouterPool {
    /// Start the routers. Must be called from within a running actix system.
    pub fn start(
        service: Arc<dyn OrderService>,
        settings: &RouterSettings,
        metrics: Arc<Metrics>,
    ) -> Self {
        let instances = settings.instances.max(1);

        tracing::info!(instances, "Starting order router pool");

        let routers = (0..instances)
            .map(|partition| {
                OrderRouter::new(
                    partition,
                    service.clone(),
                    metrics.clone(),
                    settings.service_timeout,
                    settings.mailbox_capacity,
                )
                .start()
            })
            .collect::<Vec<_>>();

        metrics.set_router_instances(routers.len());

        Self {
            routers: Arc::new(routers),
            next_create: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn len(&self) -> usize {
        self.routers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routers.is_empty()
    }

    /// Partition that handles commands for `command`
    pub fn partition_for(&self, command: &OrderCommand) -> usize {
        match command.order_id() {
            Some(id) => partition_of(id, self.routers.len()),
            None => self.next_create.fetch_add(1, Ordering::Relaxed) % self.routers.len(),
        }
    }

    /// Send a command to its router and wait for the single reply.
    ///
    /// A full mailbox makes the caller wait for space. Only a closed mailbox
    /// or an expired delivery ends in `DispatchError`.
    pub async fn dispatch(&self, command: OrderCommand) -> Result<ActionPerformed, DispatchError> {
        let partition = self.partition_for(&command);
        let router = &self.routers[partition];

        router.send(command).await.map_err(|e| {
            tracing::error!(partition, error = %e, "Failed to deliver order command");
            DispatchError::from(e)
        })
    }

    pub async fn create(&self, request: OrderRequest) -> Result<ActionPerformed, DispatchError> {
        self.dispatch(OrderCommand::create(request)).await
    }

    pub async fn retrieve(&self, id: impl Into<String>) -> Result<ActionPerformed, DispatchError> {
        self.dispatch(OrderCommand::retrieve(id)).await
    }

    pub async fn update(
        &self,
        id: impl Into<String>,
        request: OrderRequest,
    ) -> Result<ActionPerformed, DispatchError> {
        self.dispatch(OrderCommand::update(id, request)).await
    }
}

fn partition_of(id: &str, partitions: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    (hasher.finish() % partitions as u64) as usize
}
