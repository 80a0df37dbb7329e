use std::time::Duration;

use axum::{
    body::Body,
    http::{HeaderName, Request, Response},
    middleware, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{MakeSpan, OnRequest, OnResponse, TraceLayer},
};
use tracing::{field, Span};

use crate::{
    web::{midware, routes::routes, REQUEST_ID_HEADER},
    App, Result,
};

/// Serves the relay on the listener bound by `App::build_from_config` until the process stops.
///
/// Requests pass the layers top to bottom and responses come back bottom to top, so the
/// response mapper sees the failure JSON before the request id is copied onto the response.
/// CORS wraps the whole router: preflights are answered before any of the other layers run.
pub async fn serve(app: App) -> Result<()> {
    let App {
        app_state,
        listener,
    } = app;
    let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let app = Router::new()
        .merge(routes(app_state))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(relay_trace_layer())
                .layer(middleware::map_response(midware::response_mapper))
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(CorsLayer::permissive());

    axum::serve(listener, app).await?;

    Ok(())
}

/// One span per relayed request, carrying its id and route. `status` is filled in once the
/// response is known so that every event logged inside the handler can be matched to its outcome.
fn relay_trace_layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    impl MakeSpan<Body> + Clone,
    impl OnRequest<Body> + Clone,
    impl OnResponse<Body> + Clone,
> {
    TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            let req_id = req
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|id| id.to_str().ok())
                .unwrap_or_default();

            tracing::info_span!(
                "relay",
                req_id,
                method = %req.method(),
                route = req.uri().path(),
                status = field::Empty,
            )
        })
        .on_request(|req: &Request<Body>, _span: &Span| {
            tracing::debug!("{:<12} - {} {}", "REQUEST", req.method(), req.uri())
        })
        .on_response(|res: &Response<Body>, latency: Duration, span: &Span| {
            let status = res.status();
            span.record("status", status.as_u16());

            // Provider rejections come back as 4xx, only our own failures are errors.
            if status.is_server_error() {
                tracing::error!("{:<12} - {status} after {latency:?}", "RESPONSE")
            } else if status.is_client_error() {
                tracing::warn!("{:<12} - {status} after {latency:?}", "RESPONSE")
            } else {
                tracing::info!("{:<12} - {status} after {latency:?}", "RESPONSE")
            }
        })
}
