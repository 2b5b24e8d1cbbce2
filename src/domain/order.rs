use {
    super::{
        error::WebhookError,
        id::{OrderId, PackageId},
    },
    serde::Deserialize,
};

/// The parts of a Square order this service reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LineItem {
    pub catalog_object_id: Option<String>,
}

impl Order {
    /// Package bought with this order. Orders carry a single package, so
    /// only the first line item is consulted.
    pub fn package_id(&self, order_id: &OrderId) -> Result<PackageId, WebhookError> {
        let malformed = |reason: &str| WebhookError::MalformedOrder {
            order_id: order_id.clone(),
            reason: reason.to_string(),
        };

        let item = self
            .line_items
            .first()
            .ok_or_else(|| malformed("order has no line items"))?;
        let catalog_id = item
            .catalog_object_id
            .as_deref()
            .ok_or_else(|| malformed("first line item has no catalog_object_id"))?;
        PackageId::new(catalog_id).map_err(|e| malformed(&e.to_string()))
    }
}
