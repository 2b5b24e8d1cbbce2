use crate::domain::{
    error::WebhookError,
    fulfillment::{Fulfilled, FulfillmentRequest, PAYMENT_CALLBACK_FUNCTION},
    id::{CustomerId, OrderId},
    payload::WebhookPayload,
    provider::{FunctionInvoker, OrderProvider, RecordStore},
};

/// The collaborators one delivery talks to.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub orders: &'a dyn OrderProvider,
    pub records: &'a dyn RecordStore,
    pub functions: &'a dyn FunctionInvoker,
}

/// Run one webhook delivery from raw body to fulfillment.
pub async fn process_webhook(
    deps: Collaborators<'_>,
    body: &[u8],
) -> Result<Fulfilled, WebhookError> {
    let payload = WebhookPayload::parse(body)?;
    let order_id = payload.order_id()?;

    let span = tracing::Span::current();
    span.record("order_id", tracing::field::display(&order_id));
    if let Some(event_type) = &payload.event_type {
        span.record("event_type", tracing::field::display(event_type));
    }
    if let Some(event_id) = &payload.event_id {
        span.record("event_id", tracing::field::display(event_id));
    }

    fulfill_order(deps, order_id).await
}

/// Everything after payload validation: order, customer, package, function.
pub async fn fulfill_order(
    deps: Collaborators<'_>,
    order_id: OrderId,
) -> Result<Fulfilled, WebhookError> {
    let order = deps
        .orders
        .retrieve_order(&order_id)
        .await
        .map_err(|e| WebhookError::OrderLookup(e.to_string()))?;

    // The order's customer is an instant profile created at payment time,
    // so the real one comes from the pending transaction.
    let customer_id = resolve_customer(deps.records, &order_id).await?;
    let package_id = order.package_id(&order_id)?;

    let request = FulfillmentRequest {
        customer_id,
        package_id,
    };
    let body = serde_json::to_value(&request)
        .map_err(|e| WebhookError::Fulfillment(e.to_string()))?;

    let result = deps
        .functions
        .invoke(PAYMENT_CALLBACK_FUNCTION, &body)
        .await
        .map_err(|e| WebhookError::Fulfillment(e.to_string()))?;

    if let Some(error) = result.error_message() {
        return Err(WebhookError::Fulfillment(error));
    }

    Ok(Fulfilled { order_id, request })
}

async fn resolve_customer(
    records: &dyn RecordStore,
    order_id: &OrderId,
) -> Result<CustomerId, WebhookError> {
    let rows = records
        .pending_transactions(order_id, 1)
        .await
        .map_err(|e| WebhookError::CustomerLookup(e.to_string()))?;

    let row = rows
        .into_iter()
        .next()
        .ok_or_else(|| WebhookError::CustomerNotFound(order_id.clone()))?;

    CustomerId::new(row.original_square_customer_id)
        .map_err(|e| WebhookError::CustomerLookup(e.to_string()))
}
