//! Error page middleware.
//!
//! Error responses carry `ErrorDetails` as an extension. Requests from a
//! browser page get them re-rendered as the `error` view; API callers keep
//! the JSON error body.

use axum::{
    extract::Request,
    http::{header::ACCEPT, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::views::ErrorView;
use crate::errors::ErrorDetails;

const XHR_HEADER: &str = "x-requested-with";
const XHR_VALUE: &str = "XMLHttpRequest";

/// Whether the caller is script code rather than a page load
pub fn is_api_request(headers: &HeaderMap) -> bool {
    let wants_json = headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));

    let is_xhr = headers
        .get(XHR_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case(XHR_VALUE));

    wants_json || is_xhr
}

pub async fn error_page_middleware(request: Request, next: Next) -> Response {
    let api_request = is_api_request(request.headers());
    let response = next.run(request).await;

    if api_request {
        return response;
    }

    let Some(details) = response.extensions().get::<ErrorDetails>().cloned() else {
        return response;
    };

    tracing::debug!(status = %details.status, "rendering error page");
    let mut page = ErrorView::from_details(&details).into_page().into_response();
    page.extensions_mut().insert(details);
    page
}
