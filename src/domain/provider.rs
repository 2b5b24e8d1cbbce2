use {
    super::{
        error::ClientError,
        fulfillment::{FunctionResult, PendingTransaction},
        id::OrderId,
        order::Order,
    },
    std::{future::Future, pin::Pin},
};

pub type ClientFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ClientError>> + Send + 'a>>;

/// Payments provider: order lookup by id.
pub trait OrderProvider: Send + Sync {
    fn retrieve_order<'a>(&'a self, order_id: &'a OrderId) -> ClientFuture<'a, Order>;
}

/// Side-channel store of pending transactions.
pub trait RecordStore: Send + Sync {
    /// Rows of `pending_transactions` whose `square_order_id` equals
    /// `order_id`, at most `limit` of them.
    fn pending_transactions<'a>(
        &'a self,
        order_id: &'a OrderId,
        limit: u32,
    ) -> ClientFuture<'a, Vec<PendingTransaction>>;
}

/// Remote function host.
pub trait FunctionInvoker: Send + Sync {
    /// `Err` means the call itself failed; a function that ran and reported
    /// a problem comes back as `Ok` with [`FunctionResult::error`] set.
    fn invoke<'a>(
        &'a self,
        function: &'a str,
        body: &'a serde_json::Value,
    ) -> ClientFuture<'a, FunctionResult>;
}
