//! Login, signup and logout handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use validator::Validate;

use super::display_name_not_blank;
use crate::api::extractors::FormSubmission;
use crate::api::middleware::{removal_cookie, session_cookie, CurrentUser};
use crate::api::views::{
    LoginView, SignupCompleteView, SignupFormValues, SignupView, LOGIN_VIEW, SIGNUP_COMPLETE_VIEW,
    SIGNUP_VIEW,
};
use crate::api::AppState;
use crate::config::{BOARD_PATH, LOGIN_PATH, SIGNUP_COMPLETE_PATH};
use crate::services::{SignupRequest, PASSWORD_MISMATCH_MESSAGE};
use crate::types::Page;

static USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]*$").expect("valid username pattern"));

const LOGIN_FAILED_MESSAGE: &str = "Invalid username or password";
const SIGNUP_FAILED_MESSAGE: &str = "Registration failed. Please try again later";

/// Signup form
#[derive(Debug, Deserialize, Validate)]
pub struct SignupForm {
    #[validate(
        length(min = 1, max = 50, message = "Username must be 1 to 50 characters"),
        regex(
            path = *USERNAME_PATTERN,
            message = "Username may only contain letters, digits and underscores"
        )
    )]
    pub username: String,
    #[validate(length(min = 6, max = 64, message = "Password must be 6 to 64 characters"))]
    pub password: String,
    #[validate(length(
        min = 6,
        max = 64,
        message = "Password confirmation must be 6 to 64 characters"
    ))]
    pub password_confirm: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(
        length(min = 1, max = 50, message = "Display name must be 1 to 50 characters"),
        custom(function = "display_name_not_blank")
    )]
    pub display_name: String,
    #[validate(length(max = 200, message = "Bio must be at most 200 characters"))]
    pub bio: Option<String>,
}

impl SignupForm {
    fn values(&self) -> SignupFormValues {
        SignupFormValues {
            username: self.username.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            bio: self.bio.clone().unwrap_or_default(),
        }
    }
}

impl From<SignupForm> for SignupRequest {
    fn from(form: SignupForm) -> Self {
        Self {
            username: form.username,
            password: form.password,
            password_confirm: form.password_confirm,
            email: form.email,
            display_name: Some(form.display_name),
            bio: form.bio,
        }
    }
}

/// Login form
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Flags shown on the login page
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    pub error: Option<String>,
    pub logout: Option<String>,
}

/// Create login, signup and logout routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(login_page).post(login))
        .route("/login", post(login))
        .route("/signup", get(signup_page).post(signup))
        .route("/signup-complete", get(signup_complete))
        .route("/logout", post(logout))
}

pub async fn login_page(Query(query): Query<LoginQuery>) -> Page<LoginView> {
    Page::new(
        LOGIN_VIEW,
        LoginView {
            error: query.error.map(|_| LOGIN_FAILED_MESSAGE.to_string()),
            signed_out: query.logout.is_some(),
        },
    )
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    match state.auth_service.login(&form.username, &form.password).await {
        Ok(signed_in) => {
            tracing::info!(user = %signed_in.user.username, "signed in");
            let cookie = session_cookie(signed_in.session.token, state.session_cookie_secure);
            (jar.add(cookie), Redirect::to(BOARD_PATH)).into_response()
        }
        Err(e) => {
            tracing::warn!(user = %form.username, error = %e, "login failed");
            Redirect::to(&format!("{}?error", LOGIN_PATH)).into_response()
        }
    }
}

pub async fn signup_page() -> Page<SignupView> {
    Page::new(
        SIGNUP_VIEW,
        SignupView {
            form: SignupFormValues::default(),
            errors: Vec::new(),
        },
    )
}

pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    FormSubmission { form, mut errors }: FormSubmission<SignupForm>,
) -> Response {
    if form.password != form.password_confirm {
        errors.push(PASSWORD_MISMATCH_MESSAGE.to_string());
    }

    let values = form.values();
    if !errors.is_empty() {
        tracing::debug!(user = %form.username, "signup form rejected");
        return signup_error_page(values, errors, StatusCode::BAD_REQUEST);
    }

    match state.auth_service.signup(form.into()).await {
        Ok(signed_in) => {
            let cookie = session_cookie(signed_in.session.token, state.session_cookie_secure);
            (jar.add(cookie), Redirect::to(SIGNUP_COMPLETE_PATH)).into_response()
        }
        Err(e) if e.is_client_error() => {
            tracing::warn!(user = %values.username, error = %e, "signup rejected");
            signup_error_page(values, vec![e.user_message()], e.status())
        }
        Err(e) => {
            tracing::error!(user = %values.username, error = ?e, "signup failed");
            signup_error_page(
                values,
                vec![SIGNUP_FAILED_MESSAGE.to_string()],
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        }
    }
}

fn signup_error_page(form: SignupFormValues, errors: Vec<String>, status: StatusCode) -> Response {
    Page::new(SIGNUP_VIEW, SignupView { form, errors })
        .with_status(status)
        .into_response()
}

pub async fn signup_complete(
    current_user: Option<CurrentUser>,
) -> Page<SignupCompleteView> {
    Page::new(
        SIGNUP_COMPLETE_VIEW,
        SignupCompleteView {
            username: current_user.map(|user| user.username),
        },
    )
}

pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    (
        jar.remove(removal_cookie()),
        Redirect::to(&format!("{}?logout", LOGIN_PATH)),
    )
}
