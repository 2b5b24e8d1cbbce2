use {super::id::OrderId, thiserror::Error};

/// Everything that can stop a webhook delivery short of fulfillment.
///
/// The `Display` text is what the caller sees in the response body.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("Payload is empty.")]
    EmptyPayload,

    #[error("Payload is invalid.")]
    InvalidPayload,

    #[error("Order not found: {0}")]
    OrderLookup(String),

    #[error("Error getting customer id from the pending transactions database: {0}")]
    CustomerLookup(String),

    #[error(
        "Error getting customer id from the pending transactions database: No customer id found for order id {0}"
    )]
    CustomerNotFound(OrderId),

    #[error("Error processing payment: {0}")]
    Fulfillment(String),

    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error("malformed order {order_id}: {reason}")]
    MalformedOrder { order_id: OrderId, reason: String },
}

impl WebhookError {
    /// Failures the handler checks for explicitly. The rest are treated as
    /// server faults regardless of the configured status convention.
    pub fn is_checked(&self) -> bool {
        !matches!(self, Self::MalformedBody(_) | Self::MalformedOrder { .. })
    }
}

/// Failure reported by one of the external collaborators.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The remote API answered, but with errors of its own.
    #[error("{0}")]
    Api(String),

    #[error("http: {0}")]
    Http(#[from] reqwest::Error),

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("decode: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("validation: {0}")]
    Validation(String),
}
