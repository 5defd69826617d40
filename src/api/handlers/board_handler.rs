//! Timeline and post handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use validator::Validate;

use super::parse_id;
use crate::api::extractors::FormSubmission;
use crate::api::middleware::CurrentUser;
use crate::api::views::{BoardView, EditPostView, BOARD_VIEW, EDIT_POST_VIEW};
use crate::api::AppState;
use crate::config::{BOARD_PATH, LOGIN_PATH, MAX_POST_CONTENT_LENGTH};
use crate::domain::Post;
use crate::errors::{AppError, AppResult};
use crate::services::{parallel, NOT_POST_OWNER_EDIT_MESSAGE};
use crate::types::Page;

/// Post form. `text` is the current field name; `content` is still accepted.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ContentForm {
    #[validate(length(max = 400, message = "Post content must be at most 400 characters"))]
    pub text: Option<String>,
    #[validate(length(max = 400, message = "Post content must be at most 400 characters"))]
    pub content: Option<String>,
}

impl ContentForm {
    /// `text` when it has something in it, otherwise `content`
    pub fn text(&self) -> String {
        self.text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .or(self.content.as_deref())
            .unwrap_or_default()
            .to_string()
    }
}

pub fn board_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(board).post(create_post))
        .route("/edit/:id", get(edit_page).post(update_post))
        .route("/delete/:id", post(delete_post))
}

async fn board_view(state: &AppState, user: &CurrentUser) -> AppResult<BoardView> {
    let (profile, timeline) = parallel::join2(
        state.profile_service.get_user_profile(user.id),
        state.post_service.get_timeline(user.id),
    )
    .await?;

    Ok(BoardView::new(
        profile.into(),
        timeline.into_iter().map(Into::into).collect(),
    ))
}

pub async fn board(State(state): State<AppState>, user: CurrentUser) -> Response {
    match board_view(&state, &user).await {
        Ok(view) => {
            tracing::debug!(user = %user.username, posts = view.timeline.len(), "board rendered");
            Page::new(BOARD_VIEW, view).into_response()
        }
        Err(e) => {
            tracing::error!(user = %user.username, error = ?e, "failed to render board");
            Redirect::to(LOGIN_PATH).into_response()
        }
    }
}

pub async fn create_post(
    State(state): State<AppState>,
    user: CurrentUser,
    FormSubmission { form, errors }: FormSubmission<ContentForm>,
) -> Response {
    let text = form.text();
    let errors = if errors.is_empty() {
        match state.post_service.create_post(user.id, &text).await {
            Ok(post) => {
                tracing::info!(user = %user.username, post_id = %post.id, "post created");
                return Redirect::to(BOARD_PATH).into_response();
            }
            Err(e) if e.is_client_error() => vec![e.user_message()],
            Err(e) => {
                tracing::error!(user = %user.username, error = ?e, "failed to create post");
                return Redirect::to(BOARD_PATH).into_response();
            }
        }
    } else {
        errors
    };

    tracing::debug!(user = %user.username, "post form rejected");
    match board_view(&state, &user).await {
        Ok(mut view) => {
            view.draft = Some(text);
            view.errors = errors;
            Page::new(BOARD_VIEW, view)
                .with_status(StatusCode::BAD_REQUEST)
                .into_response()
        }
        Err(e) => {
            tracing::error!(user = %user.username, error = ?e, "failed to render board");
            Redirect::to(BOARD_PATH).into_response()
        }
    }
}

pub async fn edit_page(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Response {
    let post = match load_own_post(&state, &id, &user).await {
        Ok(post) => post,
        Err(e) => {
            tracing::warn!(user = %user.username, post_id = %id, error = %e, "edit page refused");
            return Redirect::to(BOARD_PATH).into_response();
        }
    };

    let draft = post.content.as_str().to_string();
    Page::new(
        EDIT_POST_VIEW,
        EditPostView {
            post: post.into(),
            draft,
            errors: Vec::new(),
            max_length: MAX_POST_CONTENT_LENGTH,
        },
    )
    .into_response()
}

pub async fn update_post(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    FormSubmission { form, errors }: FormSubmission<ContentForm>,
) -> Response {
    let text = form.text();
    let errors = if errors.is_empty() {
        let result = match parse_id(&id, "Post") {
            Ok(post_id) => state.post_service.update_post(post_id, &text, user.id).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(post) => {
                tracing::info!(user = %user.username, post_id = %post.id, "post updated");
                return Redirect::to(BOARD_PATH).into_response();
            }
            Err(e @ AppError::Validation(_)) => vec![e.user_message()],
            Err(e) => {
                tracing::warn!(user = %user.username, post_id = %id, error = %e, "post update refused");
                return Redirect::to(BOARD_PATH).into_response();
            }
        }
    } else {
        errors
    };

    match load_own_post(&state, &id, &user).await {
        Ok(post) => Page::new(
            EDIT_POST_VIEW,
            EditPostView {
                post: post.into(),
                draft: text,
                errors,
                max_length: MAX_POST_CONTENT_LENGTH,
            },
        )
        .with_status(StatusCode::BAD_REQUEST)
        .into_response(),
        Err(_) => Redirect::to(BOARD_PATH).into_response(),
    }
}

pub async fn delete_post(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Redirect {
    let result = match parse_id(&id, "Post") {
        Ok(post_id) => state.post_service.delete_post(post_id, user.id).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => tracing::info!(user = %user.username, post_id = %id, "post deleted"),
        Err(e) => tracing::warn!(user = %user.username, post_id = %id, error = %e, "post delete refused"),
    }

    Redirect::to(BOARD_PATH)
}

/// The post behind `id`, provided the caller wrote it
async fn load_own_post(
    state: &AppState,
    id: &str,
    user: &CurrentUser,
) -> AppResult<Post> {
    let post_id = parse_id(id, "Post")?;
    let post = state.post_service.get_post(post_id).await?;
    if !post.is_owned_by(user.id) {
        return Err(AppError::not_owner(NOT_POST_OWNER_EDIT_MESSAGE));
    }
    Ok(post)
}
