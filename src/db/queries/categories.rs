use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteConnection, SqlitePool};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryUpdate {
    pub title: Option<String>,
}

impl CategoryUpdate {
    pub fn apply(self, category: &mut Category) {
        if let Some(title) = self.title {
            category.title = title;
        }
    }
}

pub async fn get_all_categories(pool: &SqlitePool) -> sqlx::Result<Vec<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
SELECT id, title
FROM categories
ORDER BY title
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_category(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
SELECT id, title FROM categories WHERE categories.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn create_category(pool: &SqlitePool, title: &str) -> sqlx::Result<i64> {
    let id = sqlx::query(
        r#"
INSERT INTO categories (title) VALUES (?1)
        "#,
    )
    .bind(title)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn update_category(pool: &SqlitePool, category: &Category) -> sqlx::Result<()> {
    sqlx::query(
        r#"
UPDATE categories SET title = ?1 WHERE categories.id = ?2
        "#,
    )
    .bind(&category.title)
    .bind(category.id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Returns `false` when there was nothing to delete.
pub async fn delete_category(pool: &SqlitePool, id: i64) -> sqlx::Result<bool> {
    let deleted = sqlx::query(
        r#"
DELETE FROM categories WHERE categories.id = ?1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?
    .rows_affected();
    Ok(deleted > 0)
}

pub async fn import_categories(
    conn: &mut SqliteConnection,
    categories: &[Category],
) -> sqlx::Result<()> {
    for category in categories {
        sqlx::query(
            r#"
INSERT INTO categories (id, title) VALUES (?1, ?2)
ON CONFLICT (id) DO UPDATE SET title = excluded.title
            "#,
        )
        .bind(category.id)
        .bind(&category.title)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn categories_are_listed_by_title() {
        let pool = test_pool().await;
        create_category(&pool, "Science").await.unwrap();
        create_category(&pool, "Art").await.unwrap();

        let titles: Vec<String> = get_all_categories(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(titles, vec!["Art", "Science"]);
    }

    #[tokio::test]
    async fn delete_reports_missing_rows() {
        let pool = test_pool().await;
        let id = create_category(&pool, "Science").await.unwrap();

        assert!(delete_category(&pool, id).await.unwrap());
        assert!(!delete_category(&pool, id).await.unwrap());
        assert_eq!(get_category(&pool, id).await.unwrap(), None);
    }
}
