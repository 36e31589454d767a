pub mod queries;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Error;

pub use queries::categories::{Category, CategoryUpdate};
pub use queries::questions::{Difficulty, NewQuestion, Question, QuestionUpdate};
pub use queries::quizzes::{NewQuiz, Quiz, QuizUpdate};

pub async fn establish_connection(path: &str) -> Result<SqlitePool, Error> {
    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
        .create_if_missing(true)
        .foreign_keys(true);
    SqlitePool::connect_with(options).await
}

/// Pool over a private in-memory database. A single connection is kept alive
/// for the whole lifetime of the pool, otherwise the data would vanish.
pub async fn establish_in_memory_connection() -> Result<SqlitePool, Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Substring match with Unicode case folding. SQLite `LIKE` only folds ASCII,
/// so searches filter fetched rows with this instead.
pub(crate) fn contains_ignoring_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = establish_in_memory_connection().await.unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_folding_covers_cyrillic() {
        assert!(contains_ignoring_case("Питон для начинающих", "ПИТОН"));
        assert!(contains_ignoring_case("Python Basics", "py"));
        assert!(contains_ignoring_case("100% Rust", "100%"));
        assert!(!contains_ignoring_case("1000 Rust", "100%"));
        assert!(!contains_ignoring_case("Java Intro", "питон"));
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let pool = test_pool().await;
        run_migrations(&pool).await.unwrap();
    }
}
