use {
    super::id::{CustomerId, OrderId, PackageId},
    serde::{Deserialize, Serialize},
    serde_json::Value,
};

/// Name of the edge function that grants a purchased package.
pub const PAYMENT_CALLBACK_FUNCTION: &str = "square-payment-callback";

/// Body sent to [`PAYMENT_CALLBACK_FUNCTION`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FulfillmentRequest {
    pub customer_id: CustomerId,
    pub package_id: PackageId,
}

/// Row of `pending_transactions`, written before checkout by the storefront.
#[derive(Debug, Clone, Deserialize, sqlx::FromRow)]
pub struct PendingTransaction {
    pub original_square_customer_id: String,
}

/// Outcome of a function invocation that reached the function host.
#[derive(Debug, Clone, Default)]
pub struct FunctionResult {
    pub data: Option<Value>,
    pub error: Option<Value>,
}

impl FunctionResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: Value) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    /// Error text if the function reported one. `null` counts as no error.
    pub fn error_message(&self) -> Option<String> {
        match &self.error {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        }
    }
}

/// What a completed fulfillment produced, for logging.
#[derive(Debug)]
pub struct Fulfilled {
    pub order_id: OrderId,
    pub request: FulfillmentRequest,
}
