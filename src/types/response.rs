use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// A page rendered as its view name plus the model that fills it.
///
/// Serialized as `{"view": "...", "model": {...}}`.
#[derive(Debug)]
pub struct Page<T: Serialize> {
    pub view: &'static str,
    pub model: T,
    pub status: StatusCode,
}

#[derive(Serialize)]
struct PageBody<'a, T: Serialize> {
    view: &'static str,
    model: &'a T,
}

impl<T: Serialize> Page<T> {
    pub fn new(view: &'static str, model: T) -> Self {
        Self {
            view,
            model,
            status: StatusCode::OK,
        }
    }

    /// Same page with a non-200 status (form errors, error pages)
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl<T: Serialize> IntoResponse for Page<T> {
    fn into_response(self) -> Response {
        let body = PageBody {
            view: self.view,
            model: &self.model,
        };
        (self.status, Json(body)).into_response()
    }
}
