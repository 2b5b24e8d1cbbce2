use derive_more::Display;
use serde::{Deserialize, Serialize};

use super::error::ClientError;

fn non_empty(kind: &str, id: String) -> Result<String, ClientError> {
    if id.trim().is_empty() {
        return Err(ClientError::Validation(format!("{kind} must not be empty")));
    }
    Ok(id)
}

/// Square order identifier, as carried by `data.object.payment.order_id`.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Result<Self, ClientError> {
        non_empty("OrderId", id.into()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The customer id recorded before checkout, not the instant-profile one
/// Square attaches to the payment.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    pub fn new(id: impl Into<String>) -> Result<Self, ClientError> {
        non_empty("CustomerId", id.into()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Catalog object (item variation) id of the purchased package.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageId(String);

impl PackageId {
    pub fn new(id: impl Into<String>) -> Result<Self, ClientError> {
        non_empty("PackageId", id.into()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
