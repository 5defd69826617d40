//! Follow handlers: list pages plus the script endpoints behind the follow button.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Redirect, Response},
    routing::{get, post},
    Router,
};
use uuid::Uuid;

use super::parse_id;
use crate::api::middleware::CurrentUser;
use crate::api::views::{
    FollowOverviewView, UserListView, FOLLOWERS_VIEW, FOLLOWING_VIEW, FOLLOW_VIEW,
};
use crate::api::AppState;
use crate::config::BOARD_PATH;
use crate::domain::{User, UserResponse};
use crate::errors::{AppError, AppResult};
use crate::services::parallel;
use crate::types::Page;

const AUTHENTICATION_REQUIRED: &str = "authentication required";
const UNEXPECTED_FAILURE: &str = "an unexpected error occurred";

pub fn follow_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(overview))
        .route("/following", get(following))
        .route("/followers", get(followers))
        .route("/:user_id", post(follow))
        .route("/unfollow/:user_id", post(unfollow))
        .route("/status/:user_id", get(status))
}

fn user_list(users: Vec<User>) -> Vec<UserResponse> {
    users.into_iter().map(Into::into).collect()
}

pub async fn overview(State(state): State<AppState>, user: CurrentUser) -> Response {
    let lists = parallel::join2(
        state.follow_service.get_following_users(user.id),
        state.follow_service.get_follower_users(user.id),
    )
    .await;

    match lists {
        Ok((following, followers)) => Page::new(
            FOLLOW_VIEW,
            FollowOverviewView {
                following: user_list(following),
                followers: user_list(followers),
            },
        )
        .into_response(),
        Err(e) => {
            tracing::error!(user = %user.username, error = ?e, "failed to load follow lists");
            Redirect::to(BOARD_PATH).into_response()
        }
    }
}

pub async fn following(State(state): State<AppState>, user: CurrentUser) -> Response {
    list_page(FOLLOWING_VIEW, &user, state.follow_service.get_following_users(user.id).await)
}

pub async fn followers(State(state): State<AppState>, user: CurrentUser) -> Response {
    list_page(FOLLOWERS_VIEW, &user, state.follow_service.get_follower_users(user.id).await)
}

fn list_page(view: &'static str, user: &CurrentUser, users: AppResult<Vec<User>>) -> Response {
    match users {
        Ok(users) => Page::new(
            view,
            UserListView {
                current_user_id: user.id,
                users: user_list(users),
            },
        )
        .into_response(),
        Err(e) => {
            tracing::error!(user = %user.username, view, error = ?e, "failed to load user list");
            Redirect::to(BOARD_PATH).into_response()
        }
    }
}

/// Follow a user
#[utoipa::path(
    post,
    path = "/follow/{user_id}",
    tag = "Follow",
    params(("user_id" = Uuid, Path, description = "User to follow")),
    responses(
        (status = 200, description = "Now following", body = String),
        (status = 400, description = "Business rule violated", body = String),
        (status = 401, description = "No session", body = String),
        (status = 500, description = "Unexpected failure", body = String)
    )
)]
pub async fn follow(
    State(state): State<AppState>,
    user: Option<CurrentUser>,
    Path(user_id): Path<String>,
) -> (StatusCode, String) {
    let Some(user) = user else {
        return (StatusCode::UNAUTHORIZED, AUTHENTICATION_REQUIRED.to_string());
    };

    let result = match parse_id(&user_id, "User") {
        Ok(target) => state.follow_service.follow(user.id, target).await,
        Err(e) => Err(e),
    };

    text_outcome(&user, &user_id, "followed", result)
}

/// Unfollow a user
#[utoipa::path(
    post,
    path = "/follow/unfollow/{user_id}",
    tag = "Follow",
    params(("user_id" = Uuid, Path, description = "User to unfollow")),
    responses(
        (status = 200, description = "No longer following", body = String),
        (status = 400, description = "Business rule violated", body = String),
        (status = 401, description = "No session", body = String),
        (status = 500, description = "Unexpected failure", body = String)
    )
)]
pub async fn unfollow(
    State(state): State<AppState>,
    user: Option<CurrentUser>,
    Path(user_id): Path<String>,
) -> (StatusCode, String) {
    let Some(user) = user else {
        return (StatusCode::UNAUTHORIZED, AUTHENTICATION_REQUIRED.to_string());
    };

    let result = match parse_id(&user_id, "User") {
        Ok(target) => state.follow_service.unfollow(user.id, target).await,
        Err(e) => Err(e),
    };

    text_outcome(&user, &user_id, "unfollowed", result)
}

fn text_outcome(
    user: &CurrentUser,
    target: &str,
    done: &str,
    result: AppResult<()>,
) -> (StatusCode, String) {
    match result {
        Ok(()) => (StatusCode::OK, done.to_string()),
        Err(e) if e.is_client_error() => {
            tracing::warn!(user = %user.username, target = %target, error = %e, "follow change refused");
            (StatusCode::BAD_REQUEST, e.user_message())
        }
        Err(e) => {
            tracing::error!(user = %user.username, target = %target, error = ?e, "follow change failed");
            (StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED_FAILURE.to_string())
        }
    }
}

/// Whether the signed-in user follows `user_id`
#[utoipa::path(
    get,
    path = "/follow/status/{user_id}",
    tag = "Follow",
    params(("user_id" = Uuid, Path, description = "User to check")),
    responses(
        (status = 200, description = "Follow status", body = bool),
        (status = 401, description = "No session"),
        (status = 500, description = "Unexpected failure")
    )
)]
pub async fn status(
    State(state): State<AppState>,
    user: Option<CurrentUser>,
    Path(user_id): Path<String>,
) -> Response {
    let Some(user) = user else {
        return StatusCode::UNAUTHORIZED.into_response();
    };

    let result = match parse_id(&user_id, "User") {
        Ok(target) => state.follow_service.is_following(user.id, target).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(following) => Json(following).into_response(),
        Err(AppError::NotFound(_)) => Json(false).into_response(),
        Err(e) => {
            tracing::error!(user = %user.username, target = %user_id, error = ?e, "follow status failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
