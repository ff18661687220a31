// src/domain/post/seo.rs
//! SEO metadata embedded in every post translation. The field list is fixed
//! here; accessors on `PostTranslation` and `Post` are generated from it.
use crate::domain::errors::DomainResult;
use crate::domain::post::entity::Post;
use crate::domain::post::translation::PostTranslation;

macro_rules! seo_meta {
    ($($field:ident => $setter:ident),+ $(,)?) => {
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct SeoMeta {
            $(pub $field: Option<String>,)+
        }

        impl SeoMeta {
            pub const FIELDS: &'static [&'static str] = &[$(stringify!($field)),+];

            pub fn get(&self, name: &str) -> Option<&str> {
                match name {
                    $(stringify!($field) => self.$field.as_deref(),)+
                    _ => None,
                }
            }

            pub(crate) fn from_columns<G>(get: &mut G) -> DomainResult<Self>
            where
                G: FnMut(&'static str) -> DomainResult<Option<String>>,
            {
                Ok(Self {
                    $($field: get(stringify!($field))?,)+
                })
            }
        }

        impl PostTranslation {
            $(
                pub fn $field(&self) -> Option<&str> {
                    self.seo.$field.as_deref()
                }

                pub fn $setter(&mut self, value: Option<String>) {
                    self.seo.$field = value.filter(|v| !v.trim().is_empty());
                }
            )+
        }

        impl Post {
            $(
                /// Reads through to the active-locale translation.
                pub fn $field(&self) -> Option<&str> {
                    self.translation.as_ref().and_then(|t| t.seo.$field.as_deref())
                }

                /// Writes into the active-locale translation; `false` when the
                /// post has no translation loaded.
                pub fn $setter(&mut self, value: Option<String>) -> bool {
                    match self.translation.as_mut() {
                        Some(translation) => {
                            translation.$setter(value);
                            true
                        }
                        None => false,
                    }
                }
            )+
        }
    };
}

seo_meta! {
    meta_title => set_meta_title,
    meta_description => set_meta_description,
}
