use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteConnection, SqlitePool};
use thiserror::Error;

use crate::db::contains_ignoring_case;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Error)]
#[error("unknown difficulty {0:?}, expected one of easy, medium, hard")]
pub struct UnknownDifficulty(String);

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Difficulty {
    type Error = UnknownDifficulty;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(UnknownDifficulty(value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    #[sqlx(rename = "quiz_id")]
    pub quiz: i64,
    #[sqlx(rename = "category_id")]
    pub category: Option<i64>,
    pub description: Option<String>,
    pub text: String,
    /// JSON encoded list of answer candidates.
    pub options: String,
    pub correct_answer: String,
    pub explanation: Option<String>,
    #[sqlx(try_from = "String")]
    pub difficulty: Difficulty,
}

/// Everything a question needs except the quiz it belongs to.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub category: Option<i64>,
    pub description: Option<String>,
    pub text: String,
    pub options: String,
    pub correct_answer: String,
    pub explanation: Option<String>,
    pub difficulty: Difficulty,
}

/// Partial question update. Nested options distinguish "leave as is" (`None`)
/// from "clear" (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct QuestionUpdate {
    pub quiz: Option<i64>,
    pub category: Option<Option<i64>>,
    pub description: Option<Option<String>>,
    pub text: Option<String>,
    pub options: Option<String>,
    pub correct_answer: Option<String>,
    pub explanation: Option<Option<String>>,
    pub difficulty: Option<Difficulty>,
}

impl QuestionUpdate {
    pub fn apply(self, question: &mut Question) {
        if let Some(quiz) = self.quiz {
            question.quiz = quiz;
        }
        if let Some(category) = self.category {
            question.category = category;
        }
        if let Some(description) = self.description {
            question.description = description;
        }
        if let Some(text) = self.text {
            question.text = text;
        }
        if let Some(options) = self.options {
            question.options = options;
        }
        if let Some(correct_answer) = self.correct_answer {
            question.correct_answer = correct_answer;
        }
        if let Some(explanation) = self.explanation {
            question.explanation = explanation;
        }
        if let Some(difficulty) = self.difficulty {
            question.difficulty = difficulty;
        }
    }
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, quiz_id, category_id, description, text, options, correct_answer, explanation, difficulty
FROM questions
ORDER BY CASE difficulty WHEN 'easy' THEN 0 WHEN 'medium' THEN 1 ELSE 2 END, id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_question(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, quiz_id, category_id, description, text, options, correct_answer, explanation, difficulty
FROM questions
WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Case-insensitive substring match on the question text, in listing order.
pub async fn get_questions_by_text(pool: &SqlitePool, text: &str) -> sqlx::Result<Vec<Question>> {
    let mut questions = get_all_questions(pool).await?;
    questions.retain(|question| contains_ignoring_case(&question.text, text));
    Ok(questions)
}

pub async fn get_questions_for_quiz(pool: &SqlitePool, quiz_id: i64) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, quiz_id, category_id, description, text, options, correct_answer, explanation, difficulty
FROM questions
WHERE questions.quiz_id = ?1
ORDER BY CASE difficulty WHEN 'easy' THEN 0 WHEN 'medium' THEN 1 ELSE 2 END, id
        "#,
    )
    .bind(quiz_id)
    .fetch_all(pool)
    .await
}

pub async fn create_question(
    pool: &SqlitePool,
    quiz_id: i64,
    question: &NewQuestion,
) -> sqlx::Result<i64> {
    let id = sqlx::query(
        r#"
INSERT INTO questions (quiz_id, category_id, description, text, options, correct_answer, explanation, difficulty)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
    )
    .bind(quiz_id)
    .bind(question.category)
    .bind(&question.description)
    .bind(&question.text)
    .bind(&question.options)
    .bind(&question.correct_answer)
    .bind(&question.explanation)
    .bind(question.difficulty.as_str())
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn update_question(pool: &SqlitePool, question: &Question) -> sqlx::Result<()> {
    sqlx::query(
        r#"
UPDATE questions
SET quiz_id = ?1, category_id = ?2, description = ?3, text = ?4, options = ?5,
    correct_answer = ?6, explanation = ?7, difficulty = ?8
WHERE questions.id = ?9
        "#,
    )
    .bind(question.quiz)
    .bind(question.category)
    .bind(&question.description)
    .bind(&question.text)
    .bind(&question.options)
    .bind(&question.correct_answer)
    .bind(&question.explanation)
    .bind(question.difficulty.as_str())
    .bind(question.id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<bool> {
    let deleted = sqlx::query(
        r#"
DELETE FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?
    .rows_affected();
    Ok(deleted > 0)
}

pub async fn import_questions(
    conn: &mut SqliteConnection,
    questions: &[Question],
) -> sqlx::Result<()> {
    for question in questions {
        sqlx::query(
            r#"
INSERT INTO questions (id, quiz_id, category_id, description, text, options, correct_answer, explanation, difficulty)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
ON CONFLICT (id) DO UPDATE SET
    quiz_id = excluded.quiz_id,
    category_id = excluded.category_id,
    description = excluded.description,
    text = excluded.text,
    options = excluded.options,
    correct_answer = excluded.correct_answer,
    explanation = excluded.explanation,
    difficulty = excluded.difficulty
            "#,
        )
        .bind(question.id)
        .bind(question.quiz)
        .bind(question.category)
        .bind(&question.description)
        .bind(&question.text)
        .bind(&question.options)
        .bind(&question.correct_answer)
        .bind(&question.explanation)
        .bind(question.difficulty.as_str())
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::queries::categories::{create_category, delete_category};
    use crate::db::queries::quizzes::{create_quiz, delete_quiz, NewQuiz};
    use crate::db::test_pool;

    fn new_question(text: &str, difficulty: Difficulty) -> NewQuestion {
        NewQuestion {
            category: None,
            description: None,
            text: text.to_owned(),
            options: r#"["A","B"]"#.to_owned(),
            correct_answer: "A".to_owned(),
            explanation: None,
            difficulty,
        }
    }

    async fn quiz(pool: &SqlitePool) -> i64 {
        create_quiz(
            pool,
            &NewQuiz {
                title: "Quiz".to_owned(),
                description: None,
            },
        )
        .await
        .unwrap()
    }

    #[test]
    fn difficulty_parses_only_known_values() {
        assert_eq!(
            Difficulty::try_from("medium".to_owned()).unwrap(),
            Difficulty::Medium
        );
        assert!(Difficulty::try_from("Medium".to_owned()).is_err());
        assert!(Difficulty::try_from("extreme".to_owned()).is_err());
    }

    #[tokio::test]
    async fn questions_are_ordered_by_difficulty() {
        let pool = test_pool().await;
        let quiz_id = quiz(&pool).await;
        for (text, difficulty) in [
            ("hard one", Difficulty::Hard),
            ("easy one", Difficulty::Easy),
            ("medium one", Difficulty::Medium),
        ] {
            create_question(&pool, quiz_id, &new_question(text, difficulty))
                .await
                .unwrap();
        }

        let difficulties: Vec<Difficulty> = get_all_questions(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|q| q.difficulty)
            .collect();
        assert_eq!(
            difficulties,
            vec![Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
        );
    }

    #[tokio::test]
    async fn foreign_keys_cascade_and_clear() {
        let pool = test_pool().await;
        let quiz_id = quiz(&pool).await;
        let category_id = create_category(&pool, "Science").await.unwrap();
        let mut question = new_question("Q", Difficulty::Easy);
        question.category = Some(category_id);
        let id = create_question(&pool, quiz_id, &question).await.unwrap();

        delete_category(&pool, category_id).await.unwrap();
        let stored = get_question(&pool, id).await.unwrap().unwrap();
        assert_eq!(stored.category, None);

        delete_quiz(&pool, quiz_id).await.unwrap();
        assert_eq!(get_question(&pool, id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn check_constraint_rejects_unknown_difficulty() {
        let pool = test_pool().await;
        let quiz_id = quiz(&pool).await;
        let result = sqlx::query(
            "INSERT INTO questions (quiz_id, text, options, correct_answer, difficulty) VALUES (?1, 'Q', '[1,2]', '1', 'extreme')",
        )
        .bind(quiz_id)
        .execute(&pool)
        .await;
        assert!(result.is_err());
    }
}
