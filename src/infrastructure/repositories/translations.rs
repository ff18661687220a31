//! Generic access to a `*_translations` satellite table.
use super::map_sqlx;
use crate::domain::errors::DomainResult;
use crate::domain::locale::Locale;
use crate::domain::translation::{TranslatedFields, TranslationStore, ensure_translated_column};
use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder, Row, postgres::PgRow};
use std::marker::PhantomData;

/// Where a translation table lives and which column points at its owner.
#[derive(Debug, Clone, Copy)]
pub struct TranslationTable {
    pub table: &'static str,
    pub owner_column: &'static str,
}

pub const POST_TRANSLATIONS: TranslationTable = TranslationTable {
    table: "blog_post_translations",
    owner_column: "blog_post_id",
};

pub const CATEGORY_TRANSLATIONS: TranslationTable = TranslationTable {
    table: "blog_category_translations",
    owner_column: "blog_category_id",
};

/// Pushes `t.col, t.col, ...` for the translated columns plus the locale,
/// aliased as `t_locale` so a LEFT JOIN miss can be told apart.
pub(super) fn push_select_columns<F: TranslatedFields>(
    builder: &mut QueryBuilder<'_, Postgres>,
    alias: &str,
) {
    builder.push(format!("{alias}.locale AS t_locale"));
    for column in F::COLUMNS {
        builder.push(format!(", {alias}.{column}"));
    }
}

/// Decodes the translation selected by [`push_select_columns`]; `None` when
/// the joined row is absent.
pub(super) fn decode_translation<F: TranslatedFields>(row: &PgRow) -> DomainResult<Option<F>> {
    let locale: Option<String> = row.try_get("t_locale").map_err(map_sqlx)?;
    let Some(locale) = locale else {
        return Ok(None);
    };
    let locale = Locale::new(locale)?;
    let fields = F::from_columns(locale, |column| {
        row.try_get::<Option<String>, _>(column).map_err(map_sqlx)
    })?;
    Ok(Some(fields))
}

/// Builds the upsert for `(owner_id, fields.locale())`, replacing every
/// translated column of an existing row.
fn upsert_query<F: TranslatedFields>(
    table: TranslationTable,
    owner_id: i64,
    fields: &F,
) -> QueryBuilder<'static, Postgres> {
    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new(format!("INSERT INTO {} ({}, locale", table.table, table.owner_column));
    for column in F::COLUMNS {
        builder.push(format!(", {column}"));
    }
    builder.push(") VALUES (");
    builder.push_bind(owner_id);
    builder.push(", ");
    builder.push_bind(fields.locale().as_str().to_string());
    for column in F::COLUMNS {
        builder.push(", ");
        builder.push_bind(fields.column(column).map(str::to_string));
    }
    builder.push(format!(
        ") ON CONFLICT ({}, locale) DO UPDATE SET updated_at = now()",
        table.owner_column
    ));
    for column in F::COLUMNS {
        builder.push(format!(", {column} = EXCLUDED.{column}"));
    }
    builder
}

pub(super) async fn upsert_row<'e, E, F>(
    executor: E,
    table: TranslationTable,
    owner_id: i64,
    fields: &F,
) -> DomainResult<()>
where
    E: PgExecutor<'e>,
    F: TranslatedFields,
{
    upsert_query(table, owner_id, fields)
        .build()
        .execute(executor)
        .await
        .map_err(map_sqlx)?;
    Ok(())
}

pub struct PostgresTranslationStore<F> {
    pool: PgPool,
    table: TranslationTable,
    _fields: PhantomData<fn() -> F>,
}

impl<F> PostgresTranslationStore<F> {
    pub fn new(pool: PgPool, table: TranslationTable) -> Self {
        Self {
            pool,
            table,
            _fields: PhantomData,
        }
    }
}

#[async_trait]
impl<F: TranslatedFields> TranslationStore<F> for PostgresTranslationStore<F> {
    async fn get_translation(&self, owner_id: i64, locale: &Locale) -> DomainResult<Option<F>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        push_select_columns::<F>(&mut builder, "t");
        builder.push(format!(
            " FROM {} t WHERE t.{} = ",
            self.table.table, self.table.owner_column
        ));
        builder.push_bind(owner_id);
        builder.push(" AND t.locale = ");
        builder.push_bind(locale.as_str().to_string());

        let row = builder
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;
        match row {
            Some(row) => decode_translation::<F>(&row),
            None => Ok(None),
        }
    }

    async fn upsert_translation(&self, owner_id: i64, fields: &F) -> DomainResult<()> {
        upsert_row(&self.pool, self.table, owner_id, fields).await
    }

    async fn ids_by_translated_field(
        &self,
        field: &str,
        value: &str,
        locale: Option<&Locale>,
    ) -> DomainResult<Vec<i64>> {
        ensure_translated_column::<F>(field)?;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT DISTINCT {owner} FROM {table} WHERE {field} = ",
            owner = self.table.owner_column,
            table = self.table.table,
        ));
        builder.push_bind(value.to_string());
        if let Some(locale) = locale {
            builder.push(" AND locale = ");
            builder.push_bind(locale.as_str().to_string());
        }
        builder.push(format!(" ORDER BY {}", self.table.owner_column));

        let ids = builder
            .build_query_scalar::<i64>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        tracing::debug!(table = self.table.table, field, matches = ids.len(), "translated field lookup");
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::{CategoryTitle, CategoryTranslation};
    use crate::domain::slug::Slug;

    #[test]
    fn upsert_replaces_every_translated_column_on_conflict() {
        let fields = CategoryTranslation {
            locale: Locale::new("fr").unwrap(),
            title: CategoryTitle::new("Nouvelles").unwrap(),
            slug: Slug::new("nouvelles").unwrap(),
        };
        let builder = upsert_query(CATEGORY_TRANSLATIONS, 7, &fields);

        assert_eq!(
            builder.sql(),
            "INSERT INTO blog_category_translations (blog_category_id, locale, title, slug) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (blog_category_id, locale) DO UPDATE SET updated_at = now(), \
             title = EXCLUDED.title, slug = EXCLUDED.slug"
        );
    }

    #[test]
    fn selected_columns_carry_the_locale_marker() {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        push_select_columns::<CategoryTranslation>(&mut builder, "ct");
        assert_eq!(builder.sql(), "SELECT ct.locale AS t_locale, ct.title, ct.slug");
    }
}
