// src/application/commands/posts/views.rs
use super::PostCommandService;
use crate::{application::error::ApplicationResult, domain::post::PostId};

impl PostCommandService {
    /// Counts one read of the post; feeds the popularity listing.
    pub async fn record_view(&self, id: i64) -> ApplicationResult<()> {
        let id = PostId::new(id)?;
        self.write_repo.increment_access_count(id).await?;
        tracing::debug!(post_id = %id, "post view recorded");
        Ok(())
    }
}
