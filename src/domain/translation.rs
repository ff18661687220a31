// src/domain/translation.rs
//! Locale-keyed satellite rows for translatable attributes, and the routing
//! of query predicates between the base table and the translation table.
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::locale::Locale;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// The translated columns of one (owner, locale) row.
///
/// `COLUMNS` lists the satellite table columns other than the owner id and
/// `locale`, in the order used for reads and writes.
pub trait TranslatedFields: Clone + Send + Sync + 'static {
    const COLUMNS: &'static [&'static str];

    fn locale(&self) -> &Locale;

    /// Value of a column; `None` both for NULL and for unknown columns.
    fn column(&self, name: &str) -> Option<&str>;

    fn from_columns<G>(locale: Locale, get: G) -> DomainResult<Self>
    where
        G: FnMut(&'static str) -> DomainResult<Option<String>>;

    fn has_column(name: &str) -> bool {
        Self::COLUMNS.contains(&name)
    }
}

/// Contract of a translation table. Lookups are strict: a locale without a
/// row yields `None`, never another locale's content.
#[async_trait]
pub trait TranslationStore<F: TranslatedFields>: Send + Sync {
    async fn get_translation(&self, owner_id: i64, locale: &Locale) -> DomainResult<Option<F>>;

    /// Replaces the whole row for `(owner_id, fields.locale())`.
    async fn upsert_translation(&self, owner_id: i64, fields: &F) -> DomainResult<()>;

    /// Owner ids whose `field` equals `value`, in ascending id order.
    async fn ids_by_translated_field(
        &self,
        field: &str,
        value: &str,
        locale: Option<&Locale>,
    ) -> DomainResult<Vec<i64>>;
}

pub fn ensure_translated_column<F: TranslatedFields>(field: &str) -> DomainResult<()> {
    if F::has_column(field) {
        Ok(())
    } else {
        Err(DomainError::invalid(
            field,
            "is not a translated attribute",
        ))
    }
}

/// Translations touched during one edit session. Every buffered locale is
/// written in full when the owning record is saved.
#[derive(Debug, Clone)]
pub struct TranslationBuffer<F> {
    rows: BTreeMap<Locale, F>,
}

impl<F> Default for TranslationBuffer<F> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }
}

impl<F: TranslatedFields> TranslationBuffer<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffers `fields`, replacing anything already buffered for its locale.
    pub fn put(&mut self, fields: F) {
        self.rows.insert(fields.locale().clone(), fields);
    }

    pub fn get(&self, locale: &Locale) -> Option<&F> {
        self.rows.get(locale)
    }

    pub fn iter(&self) -> impl Iterator<Item = &F> {
        self.rows.values()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// An attribute that can appear in a query predicate.
pub trait QueryField: Copy + Eq + std::fmt::Debug + Send + Sync {
    fn column(self) -> &'static str;

    /// Whether the attribute lives in the translation table.
    fn is_translated(self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Comparison {
    pub fn sql(self) -> &'static str {
        match self {
            Comparison::Eq => " = ",
            Comparison::Lt => " < ",
            Comparison::Le => " <= ",
            Comparison::Gt => " > ",
            Comparison::Ge => " >= ",
        }
    }

    pub fn holds<T: PartialOrd>(self, left: &T, right: &T) -> bool {
        match self {
            Comparison::Eq => left == right,
            Comparison::Lt => left < right,
            Comparison::Le => left <= right,
            Comparison::Gt => left > right,
            Comparison::Ge => left >= right,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Text(String),
    Time(DateTime<Utc>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition<K> {
    pub field: K,
    pub comparison: Comparison,
    pub value: FieldValue,
}

impl<K: QueryField> Condition<K> {
    pub fn new(field: K, comparison: Comparison, value: FieldValue) -> Self {
        Self {
            field,
            comparison,
            value,
        }
    }

    pub fn eq(field: K, value: FieldValue) -> Self {
        Self::new(field, Comparison::Eq, value)
    }
}

/// Conditions split by the table they must be evaluated against.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedConditions<K> {
    pub base: Vec<Condition<K>>,
    pub translated: Vec<Condition<K>>,
}

impl<K> RoutedConditions<K> {
    pub fn has_translated(&self) -> bool {
        !self.translated.is_empty()
    }
}

pub fn route_conditions<K: QueryField>(conditions: &[Condition<K>]) -> RoutedConditions<K> {
    let (translated, base): (Vec<_>, Vec<_>) = conditions
        .iter()
        .cloned()
        .partition(|condition| condition.field.is_translated());
    RoutedConditions { base, translated }
}
