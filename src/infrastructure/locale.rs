use crate::application::ports::locale::LocaleContext;
use crate::domain::locale::Locale;

/// Locale context for a process that serves one locale at a time, such as
/// the maintenance binary or a test.
#[derive(Debug, Clone)]
pub struct FixedLocaleContext {
    current: Locale,
    default_locale: Locale,
}

impl FixedLocaleContext {
    pub fn new(default_locale: Locale) -> Self {
        Self {
            current: default_locale.clone(),
            default_locale,
        }
    }

    /// Same default, different active locale.
    pub fn with_current(&self, current: Locale) -> Self {
        Self {
            current,
            default_locale: self.default_locale.clone(),
        }
    }
}

impl LocaleContext for FixedLocaleContext {
    fn current(&self) -> Locale {
        self.current.clone()
    }

    fn default_locale(&self) -> Locale {
        self.default_locale.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switching_the_active_locale_keeps_the_default() {
        let english = FixedLocaleContext::new(Locale::new("en").unwrap());
        let french = english.with_current(Locale::new("fr").unwrap());

        assert_eq!(english.current().as_str(), "en");
        assert_eq!(french.current().as_str(), "fr");
        assert_eq!(french.default_locale().as_str(), "en");
    }
}
