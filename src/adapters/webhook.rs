use {
    crate::{
        AppState,
        adapters::api_errors::ApiError,
        services::fulfillment_pipeline::process_webhook,
    },
    axum::{
        Router,
        body::Bytes,
        extract::{DefaultBodyLimit, State},
        routing::{any, post},
    },
    tower::ServiceBuilder,
    tower_http::trace::TraceLayer,
    uuid::Uuid,
};

pub const ACCESS_DENIED: &str = "Access denied.";
pub const PAYMENT_PROCESSED: &str = "Payment processed successfully.";

/// Path Square is configured to deliver payment notifications to.
pub const WEBHOOK_PATH: &str = "/payment";

pub async fn index() -> &'static str {
    ACCESS_DENIED
}

/// POST only; other methods are routed to [`index`] before the body is read.
/// Square has no browser session, so there is no CSRF check here. There is
/// no signature check either.
#[tracing::instrument(
    name = "webhook",
    skip_all,
    fields(
        delivery_id = %Uuid::now_v7(),
        order_id = tracing::field::Empty,
        event_id = tracing::field::Empty,
        event_type = tracing::field::Empty
    )
)]
pub async fn payment_webhook(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<&'static str, ApiError> {
    let fulfilled = process_webhook(state.collaborators(), &body)
        .await
        .map_err(|e| ApiError::new(e, state.error_status))?;

    tracing::info!(
        customer_id = %fulfilled.request.customer_id,
        package_id = %fulfilled.request.package_id,
        "payment fulfilled"
    );
    Ok(PAYMENT_PROCESSED)
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", any(index))
        .route(WEBHOOK_PATH, post(payment_webhook).fallback(index))
        .route(
            &format!("{WEBHOOK_PATH}/"),
            post(payment_webhook).fallback(index),
        )
        .fallback(index)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(64 * 1024)),
        )
        .with_state(state)
}
