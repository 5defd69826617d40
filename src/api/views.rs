//! View models: the data each page is rendered from.

use axum::http::StatusCode;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::MAX_POST_CONTENT_LENGTH;
use crate::domain::{PostResponse, TimelineEntryResponse, UserResponse};
use crate::errors::ErrorDetails;
use crate::types::Page;

pub const LOGIN_VIEW: &str = "user/login";
pub const SIGNUP_VIEW: &str = "user/signup";
pub const SIGNUP_COMPLETE_VIEW: &str = "user/signup-complete";
pub const BOARD_VIEW: &str = "board/index";
pub const EDIT_POST_VIEW: &str = "board/edit";
pub const FOLLOW_VIEW: &str = "follow/index";
pub const FOLLOWING_VIEW: &str = "follow/following";
pub const FOLLOWERS_VIEW: &str = "follow/followers";
pub const SEARCH_VIEW: &str = "search/index";
pub const PROFILE_VIEW: &str = "profile/index";
pub const PROFILE_EDIT_VIEW: &str = "profile/edit";
pub const ERROR_VIEW: &str = "error";

#[derive(Debug, Serialize)]
pub struct LoginView {
    pub error: Option<String>,
    pub signed_out: bool,
}

/// Signup form values echoed back on error. Passwords are never echoed.
#[derive(Debug, Default, Serialize)]
pub struct SignupFormValues {
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub bio: String,
}

#[derive(Debug, Serialize)]
pub struct SignupView {
    pub form: SignupFormValues,
    pub errors: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SignupCompleteView {
    pub username: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BoardView {
    pub current_user: UserResponse,
    pub timeline: Vec<TimelineEntryResponse>,
    pub draft: Option<String>,
    pub errors: Vec<String>,
    pub max_length: usize,
}

impl BoardView {
    pub fn new(current_user: UserResponse, timeline: Vec<TimelineEntryResponse>) -> Self {
        Self {
            current_user,
            timeline,
            draft: None,
            errors: Vec::new(),
            max_length: MAX_POST_CONTENT_LENGTH,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EditPostView {
    pub post: PostResponse,
    pub draft: String,
    pub errors: Vec<String>,
    pub max_length: usize,
}

#[derive(Debug, Serialize)]
pub struct FollowOverviewView {
    pub following: Vec<UserResponse>,
    pub followers: Vec<UserResponse>,
}

#[derive(Debug, Serialize)]
pub struct UserListView {
    pub current_user_id: Uuid,
    pub users: Vec<UserResponse>,
}

#[derive(Debug, Serialize)]
pub struct SearchResult {
    pub user: UserResponse,
    pub following: bool,
}

#[derive(Debug, Serialize)]
pub struct SearchView {
    pub keyword: Option<String>,
    pub search_performed: bool,
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub user: UserResponse,
    pub posts: Vec<PostResponse>,
    pub following_count: u64,
    pub follower_count: u64,
    pub is_self: bool,
    pub is_following: bool,
}

#[derive(Debug, Default, Serialize)]
pub struct ProfileFormValues {
    pub display_name: String,
    pub bio: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileEditView {
    pub form: ProfileFormValues,
    pub errors: Vec<String>,
}

/// Error page model
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorView {
    #[schema(example = 404)]
    pub status_code: u16,
    #[schema(example = "The page you are looking for could not be found")]
    pub error_message: String,
    #[schema(example = "Please check that the URL is correct")]
    pub error_description: String,
}

impl ErrorView {
    /// Standard wording for a bare status code
    pub fn for_status(status: StatusCode) -> Self {
        let (message, description) = match status {
            StatusCode::NOT_FOUND => (
                "The page you are looking for could not be found",
                "Please check that the URL is correct",
            ),
            StatusCode::FORBIDDEN => (
                "You do not have permission to access this page",
                "Please sign in with an account that has access",
            ),
            StatusCode::INTERNAL_SERVER_ERROR => (
                "A server error occurred",
                "Please wait a moment and try again",
            ),
            _ => ("An error occurred", "Please try the operation again"),
        };

        Self {
            status_code: status.as_u16(),
            error_message: message.to_string(),
            error_description: description.to_string(),
        }
    }

    /// Page for an error response. Client errors keep their own message.
    pub fn from_details(details: &ErrorDetails) -> Self {
        let mut view = Self::for_status(details.status);
        if details.status.is_client_error() && details.status != StatusCode::NOT_FOUND {
            view.error_message = details.message.clone();
        }
        view
    }

    pub fn into_page(self) -> Page<ErrorView> {
        let status = StatusCode::from_u16(self.status_code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Page::new(ERROR_VIEW, self).with_status(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_specific_messages() {
        assert_eq!(
            ErrorView::for_status(StatusCode::NOT_FOUND).error_message,
            "The page you are looking for could not be found"
        );
        assert_eq!(
            ErrorView::for_status(StatusCode::INTERNAL_SERVER_ERROR).error_message,
            "A server error occurred"
        );
        assert_eq!(
            ErrorView::for_status(StatusCode::FORBIDDEN).error_message,
            "You do not have permission to access this page"
        );
        assert_eq!(
            ErrorView::for_status(StatusCode::IM_A_TEAPOT).error_message,
            "An error occurred"
        );
    }

    #[test]
    fn business_errors_keep_their_message() {
        let view = ErrorView::from_details(&ErrorDetails {
            status: StatusCode::BAD_REQUEST,
            message: "You cannot follow yourself".to_string(),
        });

        assert_eq!(view.status_code, 400);
        assert_eq!(view.error_message, "You cannot follow yourself");
    }

    #[test]
    fn server_errors_use_generic_wording() {
        let view = ErrorView::from_details(&ErrorDetails {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "A database error occurred".to_string(),
        });

        assert_eq!(view.error_message, "A server error occurred");
    }
}
