// src/application/commands/comments.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::CommentDto,
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
        services::settings::BlogSettingsService,
    },
    domain::{
        comment::{CommentRepository, NewComment},
        post::PostId,
    },
};

pub struct AddCommentCommand {
    pub post_id: i64,
    pub name: String,
    pub email: String,
    pub body: String,
}

pub struct CommentCommandService {
    repo: Arc<dyn CommentRepository>,
    settings: Arc<BlogSettingsService>,
    clock: Arc<dyn Clock>,
}

impl CommentCommandService {
    pub fn new(
        repo: Arc<dyn CommentRepository>,
        settings: Arc<BlogSettingsService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            settings,
            clock,
        }
    }

    pub async fn add_comment(&self, command: AddCommentCommand) -> ApplicationResult<CommentDto> {
        if !self.settings.comments_allowed().await? {
            return Err(ApplicationError::forbidden("comments are disabled"));
        }
        let post_id = PostId::new(command.post_id)?;
        let comment = NewComment::new(
            post_id,
            command.name,
            command.email,
            command.body,
            self.clock.now(),
        )?;
        let created = self.repo.insert(comment).await?;
        tracing::info!(post_id = %post_id, "comment added");
        Ok(created.into())
    }
}
