//! User search handler.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::api::middleware::CurrentUser;
use crate::api::views::{SearchResult, SearchView, SEARCH_VIEW};
use crate::api::AppState;
use crate::config::BOARD_PATH;
use crate::domain::User;
use crate::errors::AppResult;
use crate::services::parallel;
use crate::types::Page;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub keyword: Option<String>,
}

pub fn search_routes() -> Router<AppState> {
    Router::new().route("/", get(search))
}

pub async fn search(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<SearchQuery>,
) -> Response {
    match search_view(&state, &user, query.keyword).await {
        Ok(view) => {
            tracing::debug!(user = %user.username, results = view.results.len(), "search rendered");
            Page::new(SEARCH_VIEW, view).into_response()
        }
        Err(e) => {
            tracing::error!(user = %user.username, error = ?e, "user search failed");
            Redirect::to(BOARD_PATH).into_response()
        }
    }
}

async fn search_view(
    state: &AppState,
    user: &CurrentUser,
    keyword: Option<String>,
) -> AppResult<SearchView> {
    let keyword = keyword.filter(|k| !k.trim().is_empty());
    let others: Vec<User> = state
        .profile_service
        .search_users(keyword.as_deref())
        .await?
        .into_iter()
        .filter(|found| found.id != user.id)
        .collect();

    let checks = others
        .iter()
        .map(|found| state.follow_service.is_following(user.id, found.id))
        .collect();
    let flags = parallel::join_all(checks).await?;

    let results = others
        .into_iter()
        .zip(flags)
        .map(|(found, following)| SearchResult {
            user: found.into(),
            following,
        })
        .collect();

    Ok(SearchView {
        search_performed: keyword.is_some(),
        keyword,
        results,
    })
}
