// src/application/ports/locale.rs
use crate::domain::locale::Locale;

/// Boundary adapter for the caller's ambient locale. Services never read it
/// themselves; callers pass `current()` into each query explicitly.
pub trait LocaleContext: Send + Sync {
    fn current(&self) -> Locale;
    fn default_locale(&self) -> Locale;
}
