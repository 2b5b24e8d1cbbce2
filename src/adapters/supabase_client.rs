use {
    crate::domain::{
        error::ClientError,
        fulfillment::{FunctionResult, PendingTransaction},
        id::OrderId,
        provider::{ClientFuture, FunctionInvoker, RecordStore},
    },
    serde_json::Value,
};

const PENDING_TRANSACTIONS: &str = "pending_transactions";

/// Supabase project client: PostgREST for table reads, Edge Functions for
/// invocations. Both authenticate with the service-role key.
pub struct SupabaseClient {
    http: reqwest::Client,
    url: String,
    service_role_key: String,
}

impl SupabaseClient {
    pub fn new(
        http: reqwest::Client,
        url: impl Into<String>,
        service_role_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            url: url.into().trim_end_matches('/').to_string(),
            service_role_key: service_role_key.into(),
        }
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
    }

    async fn select_pending(
        &self,
        order_id: &OrderId,
        limit: u32,
    ) -> Result<Vec<PendingTransaction>, ClientError> {
        let request = self
            .http
            .get(format!("{}/rest/v1/{PENDING_TRANSACTIONS}", self.url))
            .query(&[
                ("select", "original_square_customer_id".to_string()),
                ("square_order_id", format!("eq.{}", order_id.as_str())),
                ("limit", limit.to_string()),
            ]);
        let response = self.authorized(request).send().await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::Api(postgrest_message(&text).unwrap_or_else(
                || format!("status {status}: {text}"),
            )));
        }

        Ok(serde_json::from_str(&text)?)
    }

    async fn invoke_inner(
        &self,
        function: &str,
        body: &Value,
    ) -> Result<FunctionResult, ClientError> {
        let request = self
            .http
            .post(format!("{}/functions/v1/{function}", self.url))
            .json(body);
        let response = self.authorized(request).send().await?;

        let status = response.status();
        let text = response.text().await?;
        let payload = serde_json::from_str(&text).unwrap_or(Value::String(text));

        if status.is_success() {
            Ok(FunctionResult::ok(payload))
        } else {
            tracing::debug!(%status, function, "function returned an error status");
            Ok(FunctionResult::failed(payload))
        }
    }
}

/// PostgREST reports failures as `{"message": ..., "code": ...}`.
fn postgrest_message(text: &str) -> Option<String> {
    let value: Value = serde_json::from_str(text).ok()?;
    let message = value.get("message")?.as_str()?;
    Some(match value.get("code").and_then(Value::as_str) {
        Some(code) => format!("{code}: {message}"),
        None => message.to_string(),
    })
}

impl RecordStore for SupabaseClient {
    fn pending_transactions<'a>(
        &'a self,
        order_id: &'a OrderId,
        limit: u32,
    ) -> ClientFuture<'a, Vec<PendingTransaction>> {
        Box::pin(self.select_pending(order_id, limit))
    }
}

impl FunctionInvoker for SupabaseClient {
    fn invoke<'a>(
        &'a self,
        function: &'a str,
        body: &'a Value,
    ) -> ClientFuture<'a, FunctionResult> {
        Box::pin(self.invoke_inner(function, body))
    }
}
