pub mod error;
pub mod fulfillment;
pub mod id;
pub mod order;
pub mod payload;
pub mod provider;
