//! Error page and fallback handlers.

use axum::{extract::Query, http::StatusCode};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::views::{ErrorView, ERROR_VIEW};
use crate::errors::AppError;
use crate::types::Page;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ErrorQuery {
    /// HTTP status the page describes; defaults to 500
    pub status: Option<u16>,
}

/// Error page for a status code
#[utoipa::path(
    get,
    path = "/error",
    tag = "Pages",
    params(ErrorQuery),
    responses(
        (status = 200, description = "Error page model", body = ErrorView)
    )
)]
pub async fn error_page(Query(query): Query<ErrorQuery>) -> Page<ErrorView> {
    let status = query
        .status
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    Page::new(ERROR_VIEW, ErrorView::for_status(status))
}

/// Unknown routes
pub async fn fallback() -> AppError {
    AppError::not_found("Page")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_status_defaults_to_server_error() {
        let page = error_page(Query(ErrorQuery { status: None })).await;
        assert_eq!(page.model.status_code, 500);
        assert_eq!(page.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn status_query_selects_message() {
        let page = error_page(Query(ErrorQuery { status: Some(403) })).await;
        assert_eq!(
            page.model.error_message,
            "You do not have permission to access this page"
        );
    }
}
