use {
    crate::domain::{
        error::ClientError,
        fulfillment::PendingTransaction,
        id::OrderId,
        provider::{ClientFuture, RecordStore},
    },
    sqlx::PgPool,
};

/// Reads `pending_transactions` straight from the project's Postgres
/// database instead of going through PostgREST.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub async fn find_pending_transactions(
    pool: &PgPool,
    order_id: &OrderId,
    limit: u32,
) -> Result<Vec<PendingTransaction>, ClientError> {
    let rows = sqlx::query_as::<_, PendingTransaction>(
        r#"
        SELECT original_square_customer_id
        FROM pending_transactions
        WHERE square_order_id = $1
        LIMIT $2
        "#,
    )
    .bind(order_id.as_str())
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

impl RecordStore for PgRecordStore {
    fn pending_transactions<'a>(
        &'a self,
        order_id: &'a OrderId,
        limit: u32,
    ) -> ClientFuture<'a, Vec<PendingTransaction>> {
        Box::pin(find_pending_transactions(&self.pool, order_id, limit))
    }
}
