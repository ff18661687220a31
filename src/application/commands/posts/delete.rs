// src/application/commands/posts/delete.rs
use super::PostCommandService;
use crate::{application::error::ApplicationResult, domain::post::PostId};

pub struct DeletePostCommand {
    pub id: i64,
}

impl PostCommandService {
    /// Comments and categorizations go with the post; categories stay.
    pub async fn delete_post(&self, command: DeletePostCommand) -> ApplicationResult<()> {
        let id = PostId::new(command.id)?;
        self.write_repo.delete(id).await?;
        tracing::info!(post_id = %id, "post deleted");
        Ok(())
    }
}
