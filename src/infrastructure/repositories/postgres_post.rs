// src/infrastructure/repositories/postgres_post.rs
use super::map_sqlx;
use super::translations::{POST_TRANSLATIONS, decode_translation, push_select_columns, upsert_row};
use crate::domain::category::CategoryId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::locale::Locale;
use crate::domain::post::{
    CategoryScope, LocaleJoin, NewPost, Post, PostId, PostOrder, PostQuery, PostReadRepository,
    PostTranslation, PostUpdate, PostWriteRepository, SourceUrl, Tag,
};
use crate::domain::translation::{Condition, FieldValue, QueryField, route_conditions};
use crate::domain::user::{UserId, Username};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder, Row, postgres::PgRow};

const BASE_COLUMNS: &str = "p.id, p.draft, p.published_at, p.access_count, p.user_id, p.username, \
     p.source_url, p.tags, p.created_at, p.updated_at";

#[derive(Clone)]
pub struct PostgresPostWriteRepository {
    pool: PgPool,
}

impl PostgresPostWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresPostReadRepository {
    pool: PgPool,
}

impl PostgresPostReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn decode_post(row: &PgRow) -> DomainResult<Post> {
    let id: i64 = row.try_get("id").map_err(map_sqlx)?;
    let user_id: Option<i64> = row.try_get("user_id").map_err(map_sqlx)?;
    let username: Option<String> = row.try_get("username").map_err(map_sqlx)?;
    let source_url: Option<String> = row.try_get("source_url").map_err(map_sqlx)?;
    let tags: Vec<String> = row.try_get("tags").map_err(map_sqlx)?;

    Ok(Post {
        id: PostId::new(id)?,
        draft: row.try_get("draft").map_err(map_sqlx)?,
        published_at: row.try_get("published_at").map_err(map_sqlx)?,
        access_count: row.try_get("access_count").map_err(map_sqlx)?,
        user_id: user_id.map(UserId::new).transpose()?,
        username: username.map(Username::new).transpose()?,
        source_url: match source_url {
            Some(raw) => SourceUrl::parse(&raw)?,
            None => None,
        },
        tags: tags.into_iter().map(Tag::new).collect::<DomainResult<_>>()?,
        translation: decode_translation::<PostTranslation>(row)?,
        created_at: row.try_get("created_at").map_err(map_sqlx)?,
        updated_at: row.try_get("updated_at").map_err(map_sqlx)?,
    })
}

fn push_value(builder: &mut QueryBuilder<'_, Postgres>, value: &FieldValue) {
    match value {
        FieldValue::Bool(v) => builder.push_bind(*v),
        FieldValue::Int(v) => builder.push_bind(*v),
        FieldValue::Text(v) => builder.push_bind(v.clone()),
        FieldValue::Time(v) => builder.push_bind(*v),
    };
}

fn push_condition<K: QueryField>(
    builder: &mut QueryBuilder<'_, Postgres>,
    alias: &str,
    condition: &Condition<K>,
) {
    builder.push(format!(
        " AND {alias}.{}{}",
        condition.field.column(),
        condition.comparison.sql()
    ));
    push_value(builder, &condition.value);
}

impl PostgresPostReadRepository {
    /// FROM, locale join and WHERE clause shared by listing and counting.
    /// Translated predicates go to `t`, everything else to `p`.
    fn push_from_where(builder: &mut QueryBuilder<'_, Postgres>, query: &PostQuery) {
        let join = match query.join {
            LocaleJoin::Inner => "INNER JOIN",
            LocaleJoin::Left => "LEFT JOIN",
        };
        builder.push(format!(
            " FROM blog_posts p {join} blog_post_translations t ON t.blog_post_id = p.id AND t.locale = "
        ));
        builder.push_bind(query.locale.as_str().to_string());
        builder.push(" WHERE TRUE");

        let routed = route_conditions(&query.conditions);
        for condition in &routed.base {
            push_condition(builder, "p", condition);
        }
        for condition in &routed.translated {
            push_condition(builder, "t", condition);
        }

        match query.category {
            CategoryScope::Any => {}
            CategoryScope::In(category) => {
                builder.push(
                    " AND EXISTS (SELECT 1 FROM blog_categorizations c \
                     WHERE c.blog_post_id = p.id AND c.blog_category_id = ",
                );
                builder.push_bind(i64::from(category));
                builder.push(")");
            }
            CategoryScope::Uncategorized => {
                builder.push(
                    " AND NOT EXISTS (SELECT 1 FROM blog_categorizations c \
                     WHERE c.blog_post_id = p.id)",
                );
            }
        }

        if let Some(tag) = &query.tag {
            builder.push(" AND ");
            builder.push_bind(tag.as_str().to_string());
            builder.push(" = ANY(p.tags)");
        }
    }

    fn push_order(builder: &mut QueryBuilder<'_, Postgres>, order: PostOrder) {
        builder.push(match order {
            PostOrder::NewestFirst => " ORDER BY p.published_at DESC, p.id ASC",
            PostOrder::OldestFirst => " ORDER BY p.published_at ASC, p.id ASC",
            PostOrder::MostViewed => " ORDER BY p.access_count DESC, p.id ASC",
        });
    }

    fn select(query: &PostQuery) -> QueryBuilder<'static, Postgres> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        builder.push(BASE_COLUMNS);
        builder.push(", ");
        push_select_columns::<PostTranslation>(&mut builder, "t");
        Self::push_from_where(&mut builder, query);
        builder
    }
}

#[async_trait]
impl PostReadRepository for PostgresPostReadRepository {
    async fn find_by_id(&self, id: PostId, locale: &Locale) -> DomainResult<Option<Post>> {
        let mut builder = Self::select(&PostQuery::new(locale.clone()));
        builder.push(" AND p.id = ");
        builder.push_bind(i64::from(id));

        let row = builder
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;
        row.as_ref().map(decode_post).transpose()
    }

    async fn find(&self, query: &PostQuery) -> DomainResult<Vec<Post>> {
        let mut builder = Self::select(query);
        Self::push_order(&mut builder, query.order);
        if let Some(limit) = query.limit {
            builder.push(" LIMIT ");
            builder.push_bind(i64::from(limit));
        }
        if query.offset > 0 {
            builder.push(" OFFSET ");
            builder.push_bind(i64::from(query.offset));
        }

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        tracing::debug!(locale = %query.locale, rows = rows.len(), "post query");
        rows.iter().map(decode_post).collect()
    }

    async fn count(&self, query: &PostQuery) -> DomainResult<u64> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*)");
        Self::push_from_where(&mut builder, query);

        let total: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(u64::try_from(total).unwrap_or_default())
    }

    async fn category_ids(&self, id: PostId) -> DomainResult<Vec<CategoryId>> {
        let ids: Vec<i64> = sqlx::query_scalar(
            "SELECT blog_category_id FROM blog_categorizations
             WHERE blog_post_id = $1 ORDER BY blog_category_id",
        )
        .bind(i64::from(id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;
        ids.into_iter().map(CategoryId::new).collect()
    }
}

async fn replace_categorizations(
    conn: &mut PgConnection,
    post_id: i64,
    category_ids: &[CategoryId],
) -> DomainResult<()> {
    sqlx::query("DELETE FROM blog_categorizations WHERE blog_post_id = $1")
        .bind(post_id)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;

    for category in category_ids {
        sqlx::query(
            "INSERT INTO blog_categorizations (blog_post_id, blog_category_id)
             VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(post_id)
        .bind(i64::from(*category))
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;
    }
    Ok(())
}

fn tag_strings(tags: &[Tag]) -> Vec<String> {
    tags.iter().map(|tag| tag.as_str().to_string()).collect()
}

#[async_trait]
impl PostWriteRepository for PostgresPostWriteRepository {
    async fn insert(&self, post: NewPost) -> DomainResult<PostId> {
        let NewPost {
            draft,
            published_at,
            user_id,
            username,
            source_url,
            tags,
            translations,
            category_ids,
            created_at,
        } = post;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO blog_posts
                (draft, published_at, access_count, user_id, username, source_url, tags, created_at, updated_at)
             VALUES ($1, $2, 0, $3, $4, $5, $6, $7, $7)
             RETURNING id",
        )
        .bind(draft)
        .bind(published_at)
        .bind(user_id.map(i64::from))
        .bind(username.map(Username::into_inner))
        .bind(source_url.map(SourceUrl::into_inner))
        .bind(tag_strings(&tags))
        .bind(created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        for translation in translations.iter() {
            upsert_row(&mut *tx, POST_TRANSLATIONS, id, translation).await?;
        }
        replace_categorizations(&mut *tx, id, &category_ids).await?;

        tx.commit().await.map_err(map_sqlx)?;
        PostId::new(id)
    }

    async fn update(&self, update: PostUpdate) -> DomainResult<()> {
        let PostUpdate {
            id,
            draft,
            published_at,
            username,
            source_url,
            tags,
            translations,
            category_ids,
            updated_at,
        } = update;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE blog_posts SET updated_at = ");
        builder.push_bind(updated_at);
        if let Some(draft) = draft {
            builder.push(", draft = ");
            builder.push_bind(draft);
        }
        if let Some(published_at) = published_at {
            builder.push(", published_at = ");
            builder.push_bind::<DateTime<Utc>>(published_at);
        }
        if let Some(username) = username {
            builder.push(", username = ");
            builder.push_bind(username.map(Username::into_inner));
        }
        if let Some(source_url) = source_url {
            builder.push(", source_url = ");
            builder.push_bind(source_url.map(SourceUrl::into_inner));
        }
        if let Some(tags) = tags {
            builder.push(", tags = ");
            builder.push_bind(tag_strings(&tags));
        }
        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));

        let result = builder
            .build()
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("post not found".into()));
        }

        for translation in translations.iter() {
            upsert_row(&mut *tx, POST_TRANSLATIONS, i64::from(id), translation).await?;
        }
        if let Some(category_ids) = category_ids {
            replace_categorizations(&mut *tx, i64::from(id), &category_ids).await?;
        }

        tx.commit().await.map_err(map_sqlx)?;
        tracing::debug!(post_id = %id, "post row updated");
        Ok(())
    }

    async fn delete(&self, id: PostId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("post not found".into()));
        }
        Ok(())
    }

    async fn increment_access_count(&self, id: PostId) -> DomainResult<()> {
        let result =
            sqlx::query("UPDATE blog_posts SET access_count = access_count + 1 WHERE id = $1")
                .bind(i64::from(id))
                .execute(&self.pool)
                .await
                .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("post not found".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::post::PostField;
    use chrono::TimeZone;

    fn en() -> Locale {
        Locale::new("en").unwrap()
    }

    #[test]
    fn live_slug_lookup_mixes_base_and_translated_predicates() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let query = PostQuery::new(en())
            .filter(Condition::eq(PostField::Slug, FieldValue::Text("hello".into())))
            .live(now)
            .uncategorized();
        let sql = PostgresPostReadRepository::select(&query).into_sql();

        assert!(sql.starts_with("SELECT p.id, p.draft,"));
        assert!(sql.contains("p.updated_at, t.locale AS t_locale, t.title, t.body,"));
        assert!(sql.ends_with(
            " FROM blog_posts p INNER JOIN blog_post_translations t \
             ON t.blog_post_id = p.id AND t.locale = $1 \
             WHERE TRUE AND p.draft = $2 AND p.published_at <= $3 AND t.slug = $4 \
             AND NOT EXISTS (SELECT 1 FROM blog_categorizations c WHERE c.blog_post_id = p.id)"
        ));
    }

    #[test]
    fn admin_listing_left_joins_and_orders_by_id_on_ties() {
        let query = PostQuery::new(en()).order(PostOrder::MostViewed);
        let mut builder = PostgresPostReadRepository::select(&query);
        PostgresPostReadRepository::push_order(&mut builder, query.order);
        let sql = builder.into_sql();

        assert!(sql.contains(" FROM blog_posts p LEFT JOIN blog_post_translations t "));
        assert!(sql.ends_with(" WHERE TRUE ORDER BY p.access_count DESC, p.id ASC"));
    }

    #[test]
    fn category_and_tag_filters_bind_after_the_locale() {
        let query = PostQuery::new(en())
            .translated()
            .in_category(CategoryId::new(3).unwrap())
            .tagged(Tag::new("rust").unwrap());
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*)");
        PostgresPostReadRepository::push_from_where(&mut builder, &query);

        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM blog_posts p INNER JOIN blog_post_translations t \
             ON t.blog_post_id = p.id AND t.locale = $1 WHERE TRUE \
             AND EXISTS (SELECT 1 FROM blog_categorizations c \
             WHERE c.blog_post_id = p.id AND c.blog_category_id = $2) \
             AND $3 = ANY(p.tags)"
        );
    }
}
