use actix::prelude::*;
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::domain::order::{OrderService, OrderServiceError, ServiceResult};
use crate::metrics::Metrics;
use crate::models::{OrderRequest, OrderResponse};

// ============================================================================
// Actor Messages
// ============================================================================

/// The closed set of commands an order router accepts.
///
/// The reply destination is the response channel actix attaches to
/// `Addr::send`, so every command is answered exactly once.
#[derive(Message, Debug, Clone, PartialEq)]
#[rtype(result = "ActionPerformed")]
pub enum OrderCommand {
    Create { request: OrderRequest },
    Retrieve { id: String },
    Update { id: String, request: OrderRequest },
}

impl OrderCommand {
    pub fn create(request: OrderRequest) -> Self {
        OrderCommand::Create { request }
    }

    pub fn retrieve(id: impl Into<String>) -> Self {
        OrderCommand::Retrieve { id: id.into() }
    }

    pub fn update(id: impl Into<String>, request: OrderRequest) -> Self {
        OrderCommand::Update { id: id.into(), request }
    }

    /// Metric and log label
    pub fn name(&self) -> &'static str {
        match self {
            OrderCommand::Create { .. } => "create",
            OrderCommand::Retrieve { .. } => "retrieve",
            OrderCommand::Update { .. } => "update",
        }
    }

    /// Order id the command targets, if it names one
    pub fn order_id(&self) -> Option<&str> {
        match self {
            OrderCommand::Create { .. } => None,
            OrderCommand::Retrieve { id } | OrderCommand::Update { id, .. } => Some(id),
        }
    }
}

/// Result of a single service call, as seen by the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum OrderOutcome {
    Completed { order: OrderResponse },
    NotFound { id: String },
    Rejected { reason: String },
    Failed { reason: String },
    TimedOut { after_ms: u64 },
}

impl OrderOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            OrderOutcome::Completed { .. } => "completed",
            OrderOutcome::NotFound { .. } => "not_found",
            OrderOutcome::Rejected { .. } => "rejected",
            OrderOutcome::Failed { .. } => "failed",
            OrderOutcome::TimedOut { .. } => "timed_out",
        }
    }
}

impl From<ServiceResult> for OrderOutcome {
    fn from(result: ServiceResult) -> Self {
        match result {
            Ok(order) => OrderOutcome::Completed { order },
            Err(OrderServiceError::NotFound(id)) => OrderOutcome::NotFound { id },
            Err(OrderServiceError::Invalid(reason)) => OrderOutcome::Rejected { reason },
            Err(OrderServiceError::Unavailable(reason)) => OrderOutcome::Failed { reason },
        }
    }
}

/// Completion value delivered to the reply destination of every command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionPerformed {
    #[serde(flatten)]
    pub outcome: OrderOutcome,
}

impl ActionPerformed {
    pub fn new(outcome: OrderOutcome) -> Self {
        Self { outcome }
    }

    pub fn order(&self) -> Option<&OrderResponse> {
        match &self.outcome {
            OrderOutcome::Completed { order } => Some(order),
            _ => None,
        }
    }

    pub fn into_order(self) -> Option<OrderResponse> {
        match self.outcome {
            OrderOutcome::Completed { order } => Some(order),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.outcome, OrderOutcome::NotFound { .. })
    }
}

// ============================================================================
// Order Router - Dispatches each command to exactly one service call
// ============================================================================

type ReplyFuture = Pin<Box<dyn Future<Output = ActionPerformed>>>;

pub struct OrderRouter {
    partition: usize,
    service: Arc<dyn OrderService>,
    metrics: Arc<Metrics>,
    service_timeout: Duration,
    mailbox_capacity: usize,
}

impl OrderRouter {
    pub fn new(
        partition: usize,
        service: Arc<dyn OrderService>,
        metrics: Arc<Metrics>,
        service_timeout: Duration,
        mailbox_capacity: usize,
    ) -> Self {
        Self {
            partition,
            service,
            metrics,
            service_timeout,
            mailbox_capacity,
        }
    }

    fn handle_create(&self, request: OrderRequest) -> ReplyFuture {
        let service = self.service.clone();
        let timeout = self.service_timeout;

        Box::pin(async move {
            call_service(timeout, service.create_order(request)).await
        })
    }

    fn handle_retrieve(&self, id: String) -> ReplyFuture {
        let service = self.service.clone();
        let timeout = self.service_timeout;

        Box::pin(async move {
            call_service(timeout, service.get_order_by_id(&id)).await
        })
    }

    fn handle_update(&self, id: String, request: OrderRequest) -> ReplyFuture {
        let service = self.service.clone();
        let timeout = self.service_timeout;

        Box::pin(async move {
            call_service(timeout, service.update_order(&id, request)).await
        })
    }
}

/// Await a single service call, bounded by `timeout`
async fn call_service<F>(timeout: Duration, call: F) -> ActionPerformed
where
    F: Future<Output = ServiceResult>,
{
    let outcome = match tokio::time::timeout(timeout, call).await {
        Ok(result) => OrderOutcome::from(result),
        Err(_) => OrderOutcome::TimedOut {
            after_ms: timeout.as_millis() as u64,
        },
    };

    ActionPerformed::new(outcome)
}

impl Actor for OrderRouter {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        ctx.set_mailbox_capacity(self.mailbox_capacity);
        tracing::info!(
            partition = self.partition,
            mailbox_capacity = self.mailbox_capacity,
            timeout_ms = self.service_timeout.as_millis() as u64,
            "OrderRouter started"
        );
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        tracing::info!(partition = self.partition, "OrderRouter stopped");
    }
}

// ============================================================================
// Message Handlers
// ============================================================================

impl Handler<OrderCommand> for OrderRouter {
    // AtomicResponse holds the mailbox until the reply is produced, so one
    // instance never has two service calls in flight.
    type Result = AtomicResponse<Self, ActionPerformed>;

    fn handle(&mut self, msg: OrderCommand, _: &mut Self::Context) -> Self::Result {
        let command = msg.name();
        let order_id = msg.order_id().map(str::to_owned);
        let started = Instant::now();

        tracing::debug!(
            partition = self.partition,
            command,
            order_id = ?order_id,
            "Handling order command"
        );

        let reply = match msg {
            OrderCommand::Create { request } => self.handle_create(request),
            OrderCommand::Retrieve { id } => self.handle_retrieve(id),
            OrderCommand::Update { id, request } => self.handle_update(id, request),
        };

        AtomicResponse::new(Box::pin(reply.into_actor(self).map(
            move |reply, act, _ctx| {
                let elapsed = started.elapsed();
                let outcome = reply.outcome.label();
                act.metrics.record_command(command, outcome, elapsed.as_secs_f64());

                match &reply.outcome {
                    OrderOutcome::Failed { reason } => tracing::error!(
                        partition = act.partition,
                        command,
                        order_id = ?order_id,
                        reason = %reason,
                        "Order service call failed"
                    ),
                    OrderOutcome::TimedOut { after_ms } => tracing::warn!(
                        partition = act.partition,
                        command,
                        order_id = ?order_id,
                        after_ms,
                        "Order service call timed out"
                    ),
                    _ => tracing::info!(
                        partition = act.partition,
                        command,
                        order_id = ?order_id,
                        outcome,
                        elapsed_ms = elapsed.as_millis() as u64,
                        "Order command handled"
                    ),
                }

                reply
            },
        )))
    }
}
