//! Process-local storage with the same semantics as the Postgres backend,
//! including its uniqueness constraints and cascades. Used by tests and by
//! `DATABASE_URL=memory://`.
mod authors;
mod categories;
mod comments;
mod posts;
mod settings;
mod state;
mod translations;

pub use authors::InMemoryAuthorDirectory;

use crate::domain::errors::{DomainError, DomainResult};
use state::State;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct InMemoryBlogStore {
    state: Mutex<State>,
}

impl InMemoryBlogStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&State) -> DomainResult<T>) -> DomainResult<T> {
        let guard = self
            .state
            .lock()
            .map_err(|_| DomainError::Persistence("in-memory store lock poisoned".into()))?;
        f(&guard)
    }

    /// Runs `f` against a copy of the state and keeps the copy only when `f`
    /// succeeds, so a failed write leaves nothing behind.
    fn write<T>(&self, f: impl FnOnce(&mut State) -> DomainResult<T>) -> DomainResult<T> {
        let mut guard = self
            .state
            .lock()
            .map_err(|_| DomainError::Persistence("in-memory store lock poisoned".into()))?;
        let mut draft = guard.clone();
        let value = f(&mut draft)?;
        *guard = draft;
        Ok(value)
    }
}
