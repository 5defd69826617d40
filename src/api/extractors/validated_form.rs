//! Form extractor that keeps validation failures for re-rendering.

use axum::{
    async_trait,
    extract::{rejection::FormRejection, FromRequest, Request},
    Form,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::AppError;

/// A decoded form plus the messages of every failed validation rule.
///
/// Unlike a hard rejection, invalid input still reaches the handler so the
/// page can be shown again with the submitted values and the errors.
/// Only a body that cannot be decoded at all is rejected.
///
/// ```rust,ignore
/// async fn create(FormSubmission { form, errors }: FormSubmission<ContentForm>) {
///     if !errors.is_empty() {
///         // re-render with `errors`
///     }
/// }
/// ```
pub struct FormSubmission<T> {
    pub form: T,
    pub errors: Vec<String>,
}

impl<T> FormSubmission<T> {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for FormSubmission<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Form<T>: FromRequest<S, Rejection = FormRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(form) = Form::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        let errors = match form.validate() {
            Ok(()) => Vec::new(),
            Err(e) => validation_messages(&e),
        };

        Ok(FormSubmission { form, errors })
    }
}

/// Flatten validation errors into user-facing messages, sorted by field
pub fn validation_messages(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut messages: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    // Two rules on one field may share a message
    messages.dedup();
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct NoteForm {
        #[validate(length(min = 1, message = "Title is required"))]
        title: String,
        #[validate(length(max = 5))]
        body: String,
    }

    fn form_request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn valid_form_has_no_errors() {
        let submission = FormSubmission::<NoteForm>::from_request(form_request("title=a&body=b"), &())
            .await
            .unwrap();

        assert!(submission.is_valid());
        assert_eq!(submission.form.title, "a");
    }

    #[tokio::test]
    async fn invalid_form_still_reaches_the_handler() {
        let submission =
            FormSubmission::<NoteForm>::from_request(form_request("title=&body=toolong"), &())
                .await
                .unwrap();

        assert_eq!(
            submission.errors,
            vec!["body is invalid".to_string(), "Title is required".to_string()]
        );
    }

    #[tokio::test]
    async fn undecodable_body_is_rejected() {
        let result = FormSubmission::<NoteForm>::from_request(form_request("title=a"), &()).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
