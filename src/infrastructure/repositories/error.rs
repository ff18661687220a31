use crate::domain::errors::DomainError;

const CNT_POST_TITLE: &str = "blog_post_translations_title_excl";
const CNT_POST_SLUG: &str = "blog_post_translations_locale_slug_key";
const CNT_POST_LOCALE: &str = "blog_post_translations_owner_locale_key";
const CNT_CATEGORY_TITLE: &str = "blog_category_translations_title_excl";
const CNT_CATEGORY_SLUG: &str = "blog_category_translations_locale_slug_key";
const CNT_CATEGORY_LOCALE: &str = "blog_category_translations_owner_locale_key";
const CNT_CATEGORIZATION_CATEGORY: &str = "blog_categorizations_blog_category_id_fkey";
const CNT_CATEGORIZATION_POST: &str = "blog_categorizations_blog_post_id_fkey";
const CNT_COMMENT_POST: &str = "blog_comments_blog_post_id_fkey";
const CNT_POST_USER: &str = "blog_posts_user_id_fkey";

/// Translates storage failures into domain errors. Violations of the
/// uniqueness constraints that back a validation rule surface as field
/// failures, so a lost race reads the same as a rejected save.
pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_POST_TITLE | CNT_CATEGORY_TITLE => {
                        DomainError::invalid("title", "has already been taken")
                    }
                    CNT_POST_SLUG | CNT_CATEGORY_SLUG => {
                        DomainError::invalid("slug", "has already been taken")
                    }
                    CNT_POST_LOCALE | CNT_CATEGORY_LOCALE => {
                        DomainError::Conflict("translation for locale already exists".into())
                    }
                    CNT_CATEGORIZATION_CATEGORY => {
                        DomainError::invalid("category_ids", "references a missing category")
                    }
                    CNT_CATEGORIZATION_POST | CNT_COMMENT_POST => {
                        DomainError::NotFound("post not found".into())
                    }
                    CNT_POST_USER => DomainError::invalid("user_id", "references a missing user"),
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23P01" => {
                        return DomainError::Conflict("exclusion constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::invalid("record", "check constraint violated");
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
