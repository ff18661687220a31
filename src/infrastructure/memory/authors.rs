use crate::application::{ApplicationError, ApplicationResult, ports::identity::AuthorDirectory};
use crate::domain::user::{AuthorIdentity, UserId, Username};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Author directory backed by a map, for tests and the in-memory backend.
#[derive(Debug, Default)]
pub struct InMemoryAuthorDirectory {
    authors: Mutex<HashMap<UserId, AuthorIdentity>>,
}

impl InMemoryAuthorDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, id: UserId, username: Username) -> ApplicationResult<()> {
        let mut guard = self
            .authors
            .lock()
            .map_err(|_| ApplicationError::infrastructure("author directory lock poisoned"))?;
        guard.insert(id, AuthorIdentity { id, username });
        Ok(())
    }
}

#[async_trait]
impl AuthorDirectory for InMemoryAuthorDirectory {
    async fn find_author(&self, id: UserId) -> ApplicationResult<Option<AuthorIdentity>> {
        let guard = self
            .authors
            .lock()
            .map_err(|_| ApplicationError::infrastructure("author directory lock poisoned"))?;
        Ok(guard.get(&id).cloned())
    }
}
