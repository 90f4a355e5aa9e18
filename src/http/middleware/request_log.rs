//! Request logging middleware.
//! Emits one REQ record per request once the response status is known.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::format::CallSite;
use crate::level::LogLevel;
use crate::logger::Logger;

/// State for [`request_log_middleware`].
#[derive(Clone)]
pub struct RequestLogState {
    pub logger: Arc<Logger>,
    /// Attributed to every request record; the place the layer was built.
    pub callsite: CallSite,
}

impl RequestLogState {
    #[track_caller]
    pub fn new(logger: Arc<Logger>) -> Self {
        Self {
            logger,
            callsite: CallSite::caller(),
        }
    }
}

pub async fn request_log_middleware(
    State(state): State<RequestLogState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    state.logger.log_at(
        LogLevel::Request,
        state.callsite,
        format_args!("{} {} {}", response.status().as_u16(), method, path),
    );
    response
}
