use {
    super::{error::WebhookError, id::OrderId},
    serde::Deserialize,
    serde_json::Value,
};

/// Typed view of a Square `payment.*` notification.
///
/// Every level is optional so that a missing key surfaces in
/// [`WebhookPayload::order_id`] instead of as a decode failure.
#[derive(Debug, Default, Deserialize)]
pub struct WebhookPayload {
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub event_id: Option<String>,
    pub data: Option<PayloadData>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PayloadData {
    pub object: Option<PayloadObject>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PayloadObject {
    pub payment: Option<PayloadPayment>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PayloadPayment {
    pub order_id: Option<Value>,
}

impl WebhookPayload {
    /// Decode raw body bytes: UTF-8, then JSON, then the shape checks.
    pub fn parse(body: &[u8]) -> Result<Self, WebhookError> {
        let text =
            std::str::from_utf8(body).map_err(|e| WebhookError::MalformedBody(e.to_string()))?;
        let value: Value =
            serde_json::from_str(text).map_err(|e| WebhookError::MalformedBody(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, WebhookError> {
        if is_falsy(&value) {
            return Err(WebhookError::EmptyPayload);
        }
        // Wrong types at any level (e.g. `"data": 5`) are a shape problem,
        // same as a missing key.
        serde_json::from_value(value).map_err(|_| WebhookError::InvalidPayload)
    }

    /// `data.object.payment.order_id`, or `InvalidPayload` if any segment is
    /// absent or the id is not a non-empty string.
    pub fn order_id(&self) -> Result<OrderId, WebhookError> {
        let raw = self
            .data
            .as_ref()
            .and_then(|d| d.object.as_ref())
            .and_then(|o| o.payment.as_ref())
            .and_then(|p| p.order_id.as_ref())
            .and_then(Value::as_str)
            .ok_or(WebhookError::InvalidPayload)?;
        OrderId::new(raw).map_err(|_| WebhookError::InvalidPayload)
    }
}

/// Empty containers, empty strings, zero, `false` and `null` carry no event.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
