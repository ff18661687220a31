// src/domain/post/translation.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::locale::Locale;
use crate::domain::post::seo::SeoMeta;
use crate::domain::post::value_objects::{PostBody, PostTitle};
use crate::domain::slug::Slug;
use crate::domain::translation::TranslatedFields;

/// One row of `blog_post_translations`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTranslation {
    pub locale: Locale,
    pub title: PostTitle,
    pub body: PostBody,
    pub custom_url: Option<String>,
    pub custom_teaser: Option<String>,
    pub slug: Slug,
    pub seo: SeoMeta,
}

impl PostTranslation {
    pub fn new(locale: Locale, title: PostTitle, body: PostBody, slug: Slug) -> Self {
        Self {
            locale,
            title,
            body,
            custom_url: None,
            custom_teaser: None,
            slug,
            seo: SeoMeta::default(),
        }
    }
}

fn required<G>(get: &mut G, column: &'static str) -> DomainResult<String>
where
    G: FnMut(&'static str) -> DomainResult<Option<String>>,
{
    get(column)?.ok_or_else(|| {
        DomainError::Persistence(format!("post translation column {column} is null"))
    })
}

impl TranslatedFields for PostTranslation {
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "body",
        "custom_url",
        "custom_teaser",
        "slug",
        "meta_title",
        "meta_description",
    ];

    fn locale(&self) -> &Locale {
        &self.locale
    }

    fn column(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(self.title.as_str()),
            "body" => Some(self.body.as_str()),
            "custom_url" => self.custom_url.as_deref(),
            "custom_teaser" => self.custom_teaser.as_deref(),
            "slug" => Some(self.slug.as_str()),
            other => self.seo.get(other),
        }
    }

    fn from_columns<G>(locale: Locale, mut get: G) -> DomainResult<Self>
    where
        G: FnMut(&'static str) -> DomainResult<Option<String>>,
    {
        let title = PostTitle::new(required(&mut get, "title")?)?;
        let body = PostBody::new(required(&mut get, "body")?)?;
        let custom_url = get("custom_url")?;
        let custom_teaser = get("custom_teaser")?;
        let slug = Slug::new(required(&mut get, "slug")?)?;
        let seo = SeoMeta::from_columns(&mut get)?;
        Ok(Self {
            locale,
            title,
            body,
            custom_url,
            custom_teaser,
            slug,
            seo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn sample() -> PostTranslation {
        PostTranslation::new(
            Locale::new("fr").unwrap(),
            PostTitle::new("Bonjour").unwrap(),
            PostBody::new("Corps").unwrap(),
            Slug::new("bonjour").unwrap(),
        )
    }

    #[test]
    fn every_seo_field_is_a_translated_column() {
        for field in SeoMeta::FIELDS {
            assert!(PostTranslation::has_column(field), "{field} missing");
        }
    }

    #[test]
    fn seo_setters_write_into_the_embedded_block() {
        let mut translation = sample();
        translation.set_meta_description(Some("Résumé".into()));
        translation.set_meta_title(Some("   ".into()));

        assert_eq!(translation.meta_description(), Some("Résumé"));
        assert_eq!(translation.column("meta_description"), Some("Résumé"));
        assert_eq!(translation.meta_title(), None);
    }

    #[test]
    fn rebuilds_from_columns() {
        let original = sample();
        let values: HashMap<&str, Option<String>> = PostTranslation::COLUMNS
            .iter()
            .map(|c| (*c, original.column(c).map(str::to_owned)))
            .collect();

        let rebuilt = PostTranslation::from_columns(original.locale.clone(), |c| {
            Ok(values.get(c).cloned().flatten())
        })
        .unwrap();

        assert_eq!(rebuilt, original);
    }
}
