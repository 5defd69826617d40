//! Profile pages and profile editing.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::{display_name_not_blank, parse_id};
use crate::api::extractors::FormSubmission;
use crate::api::middleware::CurrentUser;
use crate::api::views::{
    ProfileEditView, ProfileFormValues, ProfileView, PROFILE_EDIT_VIEW, PROFILE_VIEW,
};
use crate::api::AppState;
use crate::config::{BOARD_PATH, PROFILE_PATH};
use crate::errors::AppResult;
use crate::services::parallel;
use crate::types::Page;

/// Profile form
#[derive(Debug, Deserialize, Validate)]
pub struct ProfileForm {
    #[validate(
        length(min = 1, max = 50, message = "Display name must be 1 to 50 characters"),
        custom(function = "display_name_not_blank")
    )]
    pub display_name: String,
    #[validate(length(max = 200, message = "Bio must be at most 200 characters"))]
    pub bio: Option<String>,
}

impl ProfileForm {
    fn values(&self) -> ProfileFormValues {
        ProfileFormValues {
            display_name: self.display_name.clone(),
            bio: self.bio.clone().unwrap_or_default(),
        }
    }
}

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(own_profile))
        .route("/edit", get(edit_page).post(update_profile))
        .route("/:id", get(user_profile))
}

async fn profile_view(state: &AppState, viewer: &CurrentUser, id: Uuid) -> AppResult<ProfileView> {
    let user = state.profile_service.get_user_profile(id).await?;
    let (posts, following_count, follower_count) = parallel::join3(
        state.profile_service.get_user_posts(id),
        state.profile_service.get_following_count(id),
        state.profile_service.get_follower_count(id),
    )
    .await?;

    let is_self = viewer.id == id;
    let is_following = if is_self {
        false
    } else {
        state.follow_service.is_following(viewer.id, id).await?
    };

    Ok(ProfileView {
        user: user.into(),
        posts: posts.into_iter().map(Into::into).collect(),
        following_count,
        follower_count,
        is_self,
        is_following,
    })
}

fn profile_page(viewer: &CurrentUser, result: AppResult<ProfileView>) -> Response {
    match result {
        Ok(view) => Page::new(PROFILE_VIEW, view).into_response(),
        Err(e) => {
            tracing::warn!(user = %viewer.username, error = %e, "profile page unavailable");
            Redirect::to(BOARD_PATH).into_response()
        }
    }
}

pub async fn own_profile(State(state): State<AppState>, user: CurrentUser) -> Response {
    let view = profile_view(&state, &user, user.id).await;
    profile_page(&user, view)
}

pub async fn user_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Response {
    let view = match parse_id(&id, "User") {
        Ok(id) => profile_view(&state, &user, id).await,
        Err(e) => Err(e),
    };
    profile_page(&user, view)
}

pub async fn edit_page(State(state): State<AppState>, user: CurrentUser) -> Response {
    match state.profile_service.get_user_profile(user.id).await {
        Ok(profile) => Page::new(
            PROFILE_EDIT_VIEW,
            ProfileEditView {
                form: ProfileFormValues {
                    display_name: profile.display_name.raw().unwrap_or_default().to_string(),
                    bio: profile.bio.unwrap_or_default(),
                },
                errors: Vec::new(),
            },
        )
        .into_response(),
        Err(e) => {
            tracing::error!(user = %user.username, error = ?e, "failed to load profile form");
            Redirect::to(PROFILE_PATH).into_response()
        }
    }
}

pub async fn update_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    FormSubmission { form, errors }: FormSubmission<ProfileForm>,
) -> Response {
    let values = form.values();
    if !errors.is_empty() {
        return Page::new(PROFILE_EDIT_VIEW, ProfileEditView { form: values, errors })
            .with_status(StatusCode::BAD_REQUEST)
            .into_response();
    }

    match state
        .profile_service
        .update_profile(user.id, Some(form.display_name), form.bio)
        .await
    {
        Ok(_) => {
            tracing::info!(user = %user.username, "profile updated");
            Redirect::to(PROFILE_PATH).into_response()
        }
        Err(e) if e.is_client_error() => Page::new(
            PROFILE_EDIT_VIEW,
            ProfileEditView {
                form: values,
                errors: vec![e.user_message()],
            },
        )
        .with_status(StatusCode::BAD_REQUEST)
        .into_response(),
        Err(e) => {
            tracing::error!(user = %user.username, error = ?e, "profile update failed");
            Redirect::to(PROFILE_PATH).into_response()
        }
    }
}
