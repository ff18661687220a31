// src/application/queries/comments.rs
use std::sync::Arc;

use crate::{
    application::{dto::CommentDto, error::ApplicationResult},
    domain::{comment::CommentRepository, post::PostId},
};

pub struct CommentQueryService {
    repo: Arc<dyn CommentRepository>,
}

impl CommentQueryService {
    pub fn new(repo: Arc<dyn CommentRepository>) -> Self {
        Self { repo }
    }

    /// Comments of the post, oldest first.
    pub async fn list_for_post(&self, post_id: i64) -> ApplicationResult<Vec<CommentDto>> {
        let post_id = PostId::new(post_id)?;
        let comments = self.repo.list_for_post(post_id).await?;
        Ok(comments.into_iter().map(CommentDto::from).collect())
    }

    pub async fn count_for_post(&self, post_id: i64) -> ApplicationResult<u64> {
        let post_id = PostId::new(post_id)?;
        Ok(self.repo.count_for_post(post_id).await?)
    }
}
