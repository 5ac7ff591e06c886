use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};

use crate::actors::{ActionPerformed, DispatchError, OrderOutcome, RouterPool};
use crate::models::OrderRequest;

pub async fn create_order(
    pool: web::Data<RouterPool>,
    body: web::Json<OrderRequest>,
) -> HttpResponse {
    to_response(pool.create(body.into_inner()).await, StatusCode::CREATED)
}

pub async fn retrieve_order(pool: web::Data<RouterPool>, path: web::Path<String>) -> HttpResponse {
    to_response(pool.retrieve(path.into_inner()).await, StatusCode::OK)
}

pub async fn update_order(
    pool: web::Data<RouterPool>,
    path: web::Path<String>,
    body: web::Json<OrderRequest>,
) -> HttpResponse {
    to_response(pool.update(path.into_inner(), body.into_inner()).await, StatusCode::OK)
}

/// Map a router reply onto an HTTP response
fn to_response(reply: Result<ActionPerformed, DispatchError>, success: StatusCode) -> HttpResponse {
    let reply = match reply {
        Ok(reply) => reply,
        Err(e) => return error_response(StatusCode::SERVICE_UNAVAILABLE, e.to_string()),
    };

    match reply.outcome {
        OrderOutcome::Completed { order } => HttpResponse::build(success).json(order),
        OrderOutcome::NotFound { id } => {
            error_response(StatusCode::NOT_FOUND, format!("Order not found: {}", id))
        }
        OrderOutcome::Rejected { reason } => error_response(StatusCode::BAD_REQUEST, reason),
        OrderOutcome::Failed { reason } => error_response(StatusCode::SERVICE_UNAVAILABLE, reason),
        OrderOutcome::TimedOut { after_ms } => error_response(
            StatusCode::GATEWAY_TIMEOUT,
            format!("Order service did not answer within {}ms", after_ms),
        ),
    }
}

pub(super) fn error_response(status: StatusCode, message: String) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({ "error": message }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix::MailboxError;

    fn status_of(outcome: OrderOutcome) -> StatusCode {
        to_response(Ok(ActionPerformed::new(outcome)), StatusCode::OK).status()
    }

    #[test]
    fn test_outcome_status_mapping() {
        assert_eq!(status_of(OrderOutcome::NotFound { id: "x".into() }), StatusCode::NOT_FOUND);
        assert_eq!(status_of(OrderOutcome::Rejected { reason: "bad".into() }), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(OrderOutcome::Failed { reason: "down".into() }),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(status_of(OrderOutcome::TimedOut { after_ms: 5 }), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn test_closed_mailbox_is_service_unavailable() {
        let response = to_response(
            Err(DispatchError::from(MailboxError::Closed)),
            StatusCode::OK,
        );
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
