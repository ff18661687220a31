// src/infrastructure/repositories/postgres_category.rs
use super::map_sqlx;
use super::translations::{
    CATEGORY_TRANSLATIONS, decode_translation, push_select_columns, upsert_row,
};
use crate::domain::category::{
    Category, CategoryId, CategoryReadRepository, CategoryTranslation, CategoryUpdate,
    CategoryWriteRepository, NewCategory,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::locale::Locale;
use crate::domain::post::PostId;
use crate::domain::slug::Slug;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, Row, postgres::PgRow};

#[derive(Clone)]
pub struct PostgresCategoryWriteRepository {
    pool: PgPool,
}

impl PostgresCategoryWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresCategoryReadRepository {
    pool: PgPool,
}

impl PostgresCategoryReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn select(locale: &Locale, inner: bool) -> QueryBuilder<'static, Postgres> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT c.id, c.created_at, c.updated_at, ");
        push_select_columns::<CategoryTranslation>(&mut builder, "t");
        builder.push(if inner {
            " FROM blog_categories c INNER JOIN"
        } else {
            " FROM blog_categories c LEFT JOIN"
        });
        builder.push(" blog_category_translations t ON t.blog_category_id = c.id AND t.locale = ");
        builder.push_bind(locale.as_str().to_string());
        builder
    }

    async fn fetch_all(&self, mut builder: QueryBuilder<'_, Postgres>) -> DomainResult<Vec<Category>> {
        builder.push(" ORDER BY c.id");
        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        rows.iter().map(decode_category).collect()
    }
}

fn decode_category(row: &PgRow) -> DomainResult<Category> {
    let id: i64 = row.try_get("id").map_err(map_sqlx)?;
    Ok(Category {
        id: CategoryId::new(id)?,
        translation: decode_translation::<CategoryTranslation>(row)?,
        created_at: row.try_get("created_at").map_err(map_sqlx)?,
        updated_at: row.try_get("updated_at").map_err(map_sqlx)?,
    })
}

#[async_trait]
impl CategoryWriteRepository for PostgresCategoryWriteRepository {
    async fn insert(&self, category: NewCategory) -> DomainResult<CategoryId> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO blog_categories (created_at, updated_at) VALUES ($1, $1) RETURNING id",
        )
        .bind(category.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        for translation in category.translations.iter() {
            upsert_row(&mut *tx, CATEGORY_TRANSLATIONS, id, translation).await?;
        }
        tx.commit().await.map_err(map_sqlx)?;
        CategoryId::new(id)
    }

    async fn update(&self, update: CategoryUpdate) -> DomainResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        let result = sqlx::query("UPDATE blog_categories SET updated_at = $1 WHERE id = $2")
            .bind(update.updated_at)
            .bind(i64::from(update.id))
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("category not found".into()));
        }

        for translation in update.translations.iter() {
            upsert_row(&mut *tx, CATEGORY_TRANSLATIONS, i64::from(update.id), translation).await?;
        }
        tx.commit().await.map_err(map_sqlx)?;
        Ok(())
    }

    async fn delete(&self, id: CategoryId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM blog_categories WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("category not found".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryReadRepository for PostgresCategoryReadRepository {
    async fn find_by_id(&self, id: CategoryId, locale: &Locale) -> DomainResult<Option<Category>> {
        let mut builder = Self::select(locale, false);
        builder.push(" WHERE c.id = ");
        builder.push_bind(i64::from(id));
        let row = builder
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;
        row.as_ref().map(decode_category).transpose()
    }

    async fn find_by_slug(&self, slug: &Slug, locale: &Locale) -> DomainResult<Option<Category>> {
        let mut builder = Self::select(locale, true);
        builder.push(" WHERE t.slug = ");
        builder.push_bind(slug.as_str().to_string());
        let row = builder
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;
        row.as_ref().map(decode_category).transpose()
    }

    async fn list(&self, locale: &Locale, translated_only: bool) -> DomainResult<Vec<Category>> {
        self.fetch_all(Self::select(locale, translated_only)).await
    }

    async fn list_for_post(&self, post_id: PostId, locale: &Locale) -> DomainResult<Vec<Category>> {
        let mut builder = Self::select(locale, false);
        builder.push(
            " WHERE EXISTS (SELECT 1 FROM blog_categorizations g \
             WHERE g.blog_category_id = c.id AND g.blog_post_id = ",
        );
        builder.push_bind(i64::from(post_id));
        builder.push(")");
        self.fetch_all(builder).await
    }
}
