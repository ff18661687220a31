use crate::domain::category::{Category, CategoryTranslation};
use crate::domain::comment::Comment;
use crate::domain::locale::Locale;
use crate::domain::post::{Post, PostTranslation};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Debug, Clone, Default)]
pub struct State {
    /// Base rows; `translation` is always `None` here.
    pub(super) posts: BTreeMap<i64, Post>,
    pub(super) post_translations: BTreeMap<(i64, Locale), PostTranslation>,
    pub(super) categories: BTreeMap<i64, Category>,
    pub(super) category_translations: BTreeMap<(i64, Locale), CategoryTranslation>,
    /// `(blog_post_id, blog_category_id)`
    pub(super) categorizations: BTreeSet<(i64, i64)>,
    pub(super) comments: BTreeMap<i64, Comment>,
    pub(super) settings: HashMap<(String, String), Value>,
    pub(super) last_post_id: i64,
    pub(super) last_category_id: i64,
    pub(super) last_comment_id: i64,
}
