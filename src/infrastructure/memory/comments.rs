use super::InMemoryBlogStore;
use crate::domain::comment::{Comment, CommentId, CommentRepository, NewComment, missing_post};
use crate::domain::errors::DomainResult;
use crate::domain::post::PostId;
use async_trait::async_trait;

#[async_trait]
impl CommentRepository for InMemoryBlogStore {
    async fn insert(&self, comment: NewComment) -> DomainResult<Comment> {
        self.write(|state| {
            if !state.posts.contains_key(&comment.blog_post_id.0) {
                return Err(missing_post(comment.blog_post_id));
            }
            state.last_comment_id += 1;
            let stored = Comment {
                id: CommentId(state.last_comment_id),
                blog_post_id: comment.blog_post_id,
                name: comment.name,
                email: comment.email,
                body: comment.body,
                created_at: comment.created_at,
            };
            state.comments.insert(stored.id.0, stored.clone());
            Ok(stored)
        })
    }

    async fn list_for_post(&self, post_id: PostId) -> DomainResult<Vec<Comment>> {
        self.read(|state| {
            let mut comments: Vec<Comment> = state
                .comments
                .values()
                .filter(|comment| comment.blog_post_id == post_id)
                .cloned()
                .collect();
            comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.0.cmp(&b.id.0)));
            Ok(comments)
        })
    }

    async fn count_for_post(&self, post_id: PostId) -> DomainResult<u64> {
        self.read(|state| {
            Ok(state
                .comments
                .values()
                .filter(|comment| comment.blog_post_id == post_id)
                .count() as u64)
        })
    }
}
