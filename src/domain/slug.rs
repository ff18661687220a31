// src/domain/slug.rs
use crate::application::ports::util::SlugGenerator;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::locale::Locale;
use crate::domain::translation::{TranslatedFields, TranslationStore};
use std::{fmt, marker::PhantomData, sync::Arc};

/// URL-safe identifier derived from a title; unique per locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid("slug", "can't be blank"));
        }
        if trimmed.contains(['/', '?', '#', ' ']) {
            return Err(DomainError::invalid("slug", "must be URL-safe"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// The candidate used after `attempt` collisions: `base`, `base-1`, `base-2`, ...
    pub fn candidate(base: &str, attempt: u64) -> DomainResult<Self> {
        if attempt == 0 {
            Self::new(base)
        } else {
            Self::new(format!("{base}-{attempt}"))
        }
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

/// Produces slugs that are unique within one locale of a translation table.
pub struct SlugService<F: TranslatedFields> {
    translations: Arc<dyn TranslationStore<F>>,
    generator: Arc<dyn SlugGenerator>,
    fallback: &'static str,
    _fields: PhantomData<fn() -> F>,
}

impl<F: TranslatedFields> SlugService<F> {
    /// `fallback` is used as the base when the source text slugifies to
    /// nothing (e.g. a title made only of punctuation).
    pub fn new(
        translations: Arc<dyn TranslationStore<F>>,
        generator: Arc<dyn SlugGenerator>,
        fallback: &'static str,
    ) -> Self {
        Self {
            translations,
            generator,
            fallback,
            _fields: PhantomData,
        }
    }

    pub fn base_for(&self, source: &str) -> String {
        let base = self.generator.slugify(source);
        if base.is_empty() {
            self.fallback.to_string()
        } else {
            base
        }
    }

    /// Slug for `source` in `locale`. A candidate already held by `owner_id`
    /// itself, or by nobody in the locale, is accepted.
    pub async fn slug_for(
        &self,
        source: &str,
        locale: &Locale,
        owner_id: Option<i64>,
    ) -> DomainResult<Slug> {
        let base = self.base_for(source);
        let mut attempt = 0u64;

        loop {
            let candidate = Slug::candidate(&base, attempt)?;
            let holders = self
                .translations
                .ids_by_translated_field("slug", candidate.as_str(), Some(locale))
                .await?;
            if holders.iter().all(|id| Some(*id) == owner_id) {
                return Ok(candidate);
            }
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_are_suffixed_with_a_counter() {
        assert_eq!(Slug::candidate("hello", 0).unwrap().as_str(), "hello");
        assert_eq!(Slug::candidate("hello", 2).unwrap().as_str(), "hello-2");
    }

    #[test]
    fn rejects_unsafe_values() {
        assert!(Slug::new("a/b").is_err());
        assert!(Slug::new("   ").is_err());
    }
}
