use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteConnection, SqlitePool};

use crate::db::contains_ignoring_case;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Quiz {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewQuiz {
    pub title: String,
    pub description: Option<String>,
}

/// Partial quiz update. `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default)]
pub struct QuizUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
}

impl QuizUpdate {
    pub fn apply(self, quiz: &mut Quiz) {
        if let Some(title) = self.title {
            quiz.title = title;
        }
        if let Some(description) = self.description {
            quiz.description = description;
        }
    }
}

pub async fn get_all_quizzes(pool: &SqlitePool) -> sqlx::Result<Vec<Quiz>> {
    sqlx::query_as::<_, Quiz>(
        r#"
SELECT id, title, description
FROM quizzes
ORDER BY title
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_quiz(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Quiz>> {
    sqlx::query_as::<_, Quiz>(
        r#"
SELECT id, title, description FROM quizzes WHERE quizzes.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Case-insensitive substring match on the title, ordered by title.
pub async fn get_quizzes_by_title(pool: &SqlitePool, title: &str) -> sqlx::Result<Vec<Quiz>> {
    let mut quizzes = get_all_quizzes(pool).await?;
    quizzes.retain(|quiz| contains_ignoring_case(&quiz.title, title));
    Ok(quizzes)
}

pub async fn create_quiz(pool: &SqlitePool, quiz: &NewQuiz) -> sqlx::Result<i64> {
    let id = sqlx::query(
        r#"
INSERT INTO quizzes (title, description) VALUES (?1, ?2)
        "#,
    )
    .bind(&quiz.title)
    .bind(&quiz.description)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn update_quiz(pool: &SqlitePool, quiz: &Quiz) -> sqlx::Result<()> {
    sqlx::query(
        r#"
UPDATE quizzes SET title = ?1, description = ?2 WHERE quizzes.id = ?3
        "#,
    )
    .bind(&quiz.title)
    .bind(&quiz.description)
    .bind(quiz.id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Questions of the quiz go away with it.
pub async fn delete_quiz(pool: &SqlitePool, id: i64) -> sqlx::Result<bool> {
    let deleted = sqlx::query(
        r#"
DELETE FROM quizzes WHERE quizzes.id = ?1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?
    .rows_affected();
    Ok(deleted > 0)
}

pub async fn import_quizzes(conn: &mut SqliteConnection, quizzes: &[Quiz]) -> sqlx::Result<()> {
    for quiz in quizzes {
        sqlx::query(
            r#"
INSERT INTO quizzes (id, title, description) VALUES (?1, ?2, ?3)
ON CONFLICT (id) DO UPDATE SET title = excluded.title, description = excluded.description
            "#,
        )
        .bind(quiz.id)
        .bind(&quiz.title)
        .bind(&quiz.description)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}
