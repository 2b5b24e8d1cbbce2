use {
    crate::domain::{
        error::ClientError,
        id::OrderId,
        order::Order,
        provider::{ClientFuture, OrderProvider},
    },
    serde::Deserialize,
    std::fmt,
};

/// One entry of a Square `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct SquareApiError {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub code: String,
    pub detail: Option<String>,
    pub field: Option<String>,
}

impl fmt::Display for SquareApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.code)?;
        if let Some(field) = &self.field {
            write!(f, " ({field})")?;
        }
        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct RetrieveOrderResponse {
    order: Option<Order>,
    #[serde(default)]
    errors: Vec<SquareApiError>,
}

pub struct SquareClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
    square_version: String,
}

impl SquareClient {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        access_token: impl Into<String>,
        square_version: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            square_version: square_version.into(),
        }
    }

    /// `{base}/v2/orders/{order_id}` with the id percent-encoded as a single
    /// path segment.
    fn order_url(&self, order_id: &OrderId) -> Result<reqwest::Url, ClientError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| ClientError::Validation(format!("invalid Square base url: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| ClientError::Validation("Square base url cannot take a path".into()))?
            .pop_if_empty()
            .extend(["v2", "orders", order_id.as_str()]);
        Ok(url)
    }

    async fn retrieve_order_inner(&self, order_id: &OrderId) -> Result<Order, ClientError> {
        let response = self
            .http
            .get(self.order_url(order_id)?)
            .bearer_auth(&self.access_token)
            .header("Square-Version", &self.square_version)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let body: RetrieveOrderResponse = serde_json::from_str(&text).map_err(|e| {
            ClientError::Api(format!("unreadable response (status {status}): {e}"))
        })?;

        if !body.errors.is_empty() {
            return Err(ClientError::Api(format_errors(&body.errors)));
        }
        if !status.is_success() {
            return Err(ClientError::Api(format!("status {status}")));
        }

        body.order
            .ok_or_else(|| ClientError::Api("response has no order".into()))
    }
}

fn format_errors(errors: &[SquareApiError]) -> String {
    let joined = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{joined}]")
}

impl OrderProvider for SquareClient {
    fn retrieve_order<'a>(&'a self, order_id: &'a OrderId) -> ClientFuture<'a, Order> {
        Box::pin(self.retrieve_order_inner(order_id))
    }
}
