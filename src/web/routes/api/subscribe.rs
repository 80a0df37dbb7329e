use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{error, info, warn, Span};

use crate::{
    web::{
        types::{DeserSubscription, RelayResult, ValidSubscription},
        Error, WebResult,
    },
    AppState,
};

pub const SUBSCRIBED_MSG: &str = "Subscribed successfully";

/// Validates the email and upserts the subscriber into the configured list.
///
/// Every failure ends up as a `web::Error`, the response mapper renders it as
/// `{ "success": false, "error": ... }` with the matching status code.
#[tracing::instrument(
    name = "Relaying subscription",
    skip_all,
    fields(
        subscriber_email = tracing::field::Empty,
        weak_area = tracing::field::Empty
    )
)]
pub async fn subscribe(
    State(app_state): State<AppState>,
    payload: Result<Json<DeserSubscription>, JsonRejection>,
) -> WebResult<Json<RelayResult>> {
    info!("{:<12} - API HIT", "subscribe");

    let Json(subscription) = payload.inspect_err(|er| warn!("Rejected request body: {er}"))?;
    let span = Span::current();
    span.record("subscriber_email", tracing::field::debug(&subscription.email));
    span.record("weak_area", tracing::field::debug(&subscription.weak_area));
    info!("Received subscription request");

    let subscription: ValidSubscription = subscription
        .try_into()
        .inspect_err(|_| info!("Invalid email provided"))?;

    let resp = app_state
        .list_client
        .upsert_member(&subscription)
        .await
        .inspect_err(|er| error!("Server error while subscribing: {er}"))?;

    if resp.is_rejected() {
        error!("PROVIDER ERROR: {} {}", resp.status, resp.body);
        return Err(Error::ProviderRejected {
            status: resp.status,
            message: resp.error_message().map(str::to_string),
        });
    }

    info!("Successfully subscribed/updated: {}", subscription.email.as_ref());
    Ok(Json(RelayResult::success(SUBSCRIBED_MSG)))
}
