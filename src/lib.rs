pub mod adapters;
pub mod config;
pub mod domain;
pub mod infra;
pub mod services;

use {
    config::ErrorStatus,
    domain::provider::{FunctionInvoker, OrderProvider, RecordStore},
    services::fulfillment_pipeline::Collaborators,
    std::sync::Arc,
};

/// Client handles shared by every request. Built once in `main`.
#[derive(Clone)]
pub struct AppState {
    pub orders: Arc<dyn OrderProvider>,
    pub records: Arc<dyn RecordStore>,
    pub functions: Arc<dyn FunctionInvoker>,
    pub error_status: ErrorStatus,
}

impl AppState {
    pub fn collaborators(&self) -> Collaborators<'_> {
        Collaborators {
            orders: &*self.orders,
            records: &*self.records,
            functions: &*self.functions,
        }
    }
}
