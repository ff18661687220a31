// src/application/services/facade.rs
use std::collections::HashMap;
use std::sync::Arc;

use crate::application::{
    dto::PostDto,
    error::ApplicationResult,
    ports::{identity::AuthorDirectory, time::Clock},
};
use crate::domain::post::Post;
use crate::domain::user::{Author, AuthorIdentity, UserId};

/// Assembles post views: base attributes, the loaded translation, SEO
/// metadata and the author, resolved once per post.
pub struct ContentFacade {
    authors: Option<Arc<dyn AuthorDirectory>>,
    clock: Arc<dyn Clock>,
}

impl ContentFacade {
    pub fn new(authors: Option<Arc<dyn AuthorDirectory>>, clock: Arc<dyn Clock>) -> Self {
        Self { authors, clock }
    }

    pub async fn author_of(&self, post: &Post) -> ApplicationResult<Author> {
        let identity = match (&self.authors, post.user_id) {
            (Some(directory), Some(user_id)) => directory.find_author(user_id).await?,
            _ => None,
        };
        Ok(Author::resolve(identity, post.username.clone()))
    }

    pub async fn post_view(&self, post: Post) -> ApplicationResult<PostDto> {
        let author = self.author_of(&post).await?;
        Ok(PostDto::assemble(post, &author, self.clock.now()))
    }

    /// Like [`Self::post_view`] for a listing; each distinct user is looked up
    /// once.
    pub async fn post_views(&self, posts: Vec<Post>) -> ApplicationResult<Vec<PostDto>> {
        let now = self.clock.now();
        let mut identities: HashMap<UserId, Option<AuthorIdentity>> = HashMap::new();
        let mut views = Vec::with_capacity(posts.len());

        for post in posts {
            let identity = match (&self.authors, post.user_id) {
                (Some(directory), Some(user_id)) => {
                    if let Some(cached) = identities.get(&user_id) {
                        cached.clone()
                    } else {
                        let found = directory.find_author(user_id).await?;
                        identities.insert(user_id, found.clone());
                        found
                    }
                }
                _ => None,
            };
            let author = Author::resolve(identity, post.username.clone());
            views.push(PostDto::assemble(post, &author, now));
        }

        Ok(views)
    }
}
