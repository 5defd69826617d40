//! Post service - timeline, posting and author-only edits.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::Config;
use crate::domain::{Content, NewPost, Post, PostWithAuthor};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

pub const NOT_POST_OWNER_EDIT_MESSAGE: &str = "You can only edit your own posts";
pub const NOT_POST_OWNER_DELETE_MESSAGE: &str = "You can only delete your own posts";

/// Which posts the timeline shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimelineScope {
    /// Every post in the system
    #[default]
    Everyone,
    /// Posts by followed users plus the viewer's own
    FollowedAndSelf,
}

impl From<&Config> for TimelineScope {
    fn from(config: &Config) -> Self {
        if config.timeline_following_only {
            TimelineScope::FollowedAndSelf
        } else {
            TimelineScope::Everyone
        }
    }
}

#[async_trait]
pub trait PostService: Send + Sync {
    /// Timeline for `user_id`, newest first. Posts whose author no longer
    /// resolves are left out.
    async fn get_timeline(&self, user_id: Uuid) -> AppResult<Vec<PostWithAuthor>>;

    async fn create_post(&self, author_id: Uuid, content: &str) -> AppResult<Post>;

    /// Rewrite a post. Only its author may do so.
    async fn update_post(&self, post_id: Uuid, content: &str, caller_id: Uuid) -> AppResult<Post>;

    /// Delete a post. Only its author may do so.
    async fn delete_post(&self, post_id: Uuid, caller_id: Uuid) -> AppResult<()>;

    async fn get_post(&self, post_id: Uuid) -> AppResult<Post>;
}

pub struct PostManager<U: UnitOfWork> {
    uow: Arc<U>,
    scope: TimelineScope,
}

impl<U: UnitOfWork> PostManager<U> {
    pub fn new(uow: Arc<U>, scope: TimelineScope) -> Self {
        Self { uow, scope }
    }
}

#[async_trait]
impl<U: UnitOfWork> PostService for PostManager<U> {
    async fn get_timeline(&self, user_id: Uuid) -> AppResult<Vec<PostWithAuthor>> {
        let rows = match self.scope {
            TimelineScope::Everyone => self.uow.posts().find_all_with_author().await?,
            TimelineScope::FollowedAndSelf => {
                let mut author_ids: Vec<Uuid> = self
                    .uow
                    .follows()
                    .find_by_follower_id(user_id)
                    .await?
                    .into_iter()
                    .map(|follow| follow.following_id)
                    .collect();
                author_ids.push(user_id);

                self.uow
                    .posts()
                    .find_by_user_ids_with_author(&author_ids)
                    .await?
            }
        };

        Ok(rows
            .into_iter()
            .filter_map(|(post, author)| author.map(|author| PostWithAuthor { post, author }))
            .collect())
    }

    async fn create_post(&self, author_id: Uuid, content: &str) -> AppResult<Post> {
        let content = Content::parse(content)?;
        let post = self
            .uow
            .posts()
            .create(NewPost { author_id, content })
            .await?;

        tracing::info!(post_id = %post.id, author_id = %author_id, "post created");
        Ok(post)
    }

    async fn update_post(&self, post_id: Uuid, content: &str, caller_id: Uuid) -> AppResult<Post> {
        let content = content.to_string();
        let post = self
            .uow
            .transaction(move |ctx| async move {
                let mut post = ctx.posts().find_by_id(post_id).await?.ok_or_not_found("Post")?;
                if !post.is_owned_by(caller_id) {
                    return Err(AppError::not_owner(NOT_POST_OWNER_EDIT_MESSAGE));
                }

                post.rewrite(Content::parse(&content)?);
                ctx.posts().update(&post).await
            })
            .await?;

        tracing::info!(post_id = %post_id, "post updated");
        Ok(post)
    }

    async fn delete_post(&self, post_id: Uuid, caller_id: Uuid) -> AppResult<()> {
        self.uow
            .transaction(move |ctx| async move {
                let post = ctx.posts().find_by_id(post_id).await?.ok_or_not_found("Post")?;
                if !post.is_owned_by(caller_id) {
                    return Err(AppError::not_owner(NOT_POST_OWNER_DELETE_MESSAGE));
                }

                ctx.posts().delete_by_id(post.id).await
            })
            .await?;

        tracing::info!(post_id = %post_id, "post deleted");
        Ok(())
    }

    async fn get_post(&self, post_id: Uuid) -> AppResult<Post> {
        self.uow
            .posts()
            .find_by_id(post_id)
            .await?
            .ok_or_not_found("Post")
    }
}
