//! Request ID generation and received-header capture.
//!
//! Requests arriving through the tunnel without an `x-request-id` get a
//! UUID v4 before the rest of the stack sees them; the ID is echoed back on
//! the response so a client can correlate it with the origin's logs.
//!
//! Because the ID is written into the request, the headers exactly as the
//! client sent them are snapshotted first into [`ReceivedHeaders`].

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use uuid::Uuid;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Request headers as received, before any middleware touched them.
#[derive(Debug, Clone)]
pub struct ReceivedHeaders(pub HeaderMap);

/// Middleware storing [`ReceivedHeaders`]; must sit outside the request ID
/// layer.
pub async fn capture_received_headers(mut request: Request, next: Next) -> Response {
    let received = ReceivedHeaders(request.headers().clone());
    request.extensions_mut().insert(received);
    next.run(request).await
}

/// Layer that assigns a request ID when the client did not send one.
pub fn set_request_id_layer() -> SetRequestIdLayer<UuidRequestId> {
    SetRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID), UuidRequestId)
}

/// Layer that copies the request ID onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID))
}
