use std::sync::Arc;

use sqlx::SqlitePool;

use crate::constants::{
    MAX_QUESTION_DESCRIPTION_LENGTH, MAX_QUESTION_EXPLANATION_LENGTH, MAX_QUESTION_TEXT_LENGTH,
};
use crate::db::queries::questions;
use crate::db::{NewQuestion, Question, QuestionUpdate};
use crate::error::{Entity, Error, Result};
use crate::services::RandomSource;
use crate::validators::{
    decode_answer_options, validate_optional_text, validate_required_text, ValidationError,
};

#[derive(Clone)]
pub struct QuestionService {
    pool: SqlitePool,
    random: Arc<dyn RandomSource>,
}

fn validate_fields(
    text: &str,
    description: Option<&str>,
    explanation: Option<&str>,
    correct_answer: &str,
    options: &str,
) -> std::result::Result<(), ValidationError> {
    validate_required_text("text", text, MAX_QUESTION_TEXT_LENGTH)?;
    validate_optional_text("description", description, MAX_QUESTION_DESCRIPTION_LENGTH)?;
    validate_optional_text("explanation", explanation, MAX_QUESTION_EXPLANATION_LENGTH)?;
    validate_required_text("correct_answer", correct_answer, usize::MAX)?;
    decode_answer_options(options)?;
    Ok(())
}

/// Field checks shared by update and import.
pub(crate) fn validate_question(question: &Question) -> std::result::Result<(), ValidationError> {
    validate_fields(
        &question.text,
        question.description.as_deref(),
        question.explanation.as_deref(),
        &question.correct_answer,
        &question.options,
    )
}

fn validate_new_question(question: &NewQuestion) -> std::result::Result<(), ValidationError> {
    validate_fields(
        &question.text,
        question.description.as_deref(),
        question.explanation.as_deref(),
        &question.correct_answer,
        &question.options,
    )
}

impl QuestionService {
    pub fn new(pool: SqlitePool, random: Arc<dyn RandomSource>) -> Self {
        Self { pool, random }
    }

    pub async fn list(&self) -> Result<Vec<Question>> {
        Ok(questions::get_all_questions(&self.pool).await?)
    }

    pub async fn get(&self, id: i64) -> Result<Question> {
        questions::get_question(&self.pool, id)
            .await?
            .ok_or_else(|| Error::not_found(Entity::Question, id))
    }

    pub async fn search_by_text(&self, text: &str) -> Result<Vec<Question>> {
        Ok(questions::get_questions_by_text(&self.pool, text).await?)
    }

    pub async fn list_for_quiz(&self, quiz_id: i64) -> Result<Vec<Question>> {
        Ok(questions::get_questions_for_quiz(&self.pool, quiz_id).await?)
    }

    /// Attaches a new question to `quiz_id`. Options are validated before
    /// anything is written.
    #[tracing::instrument(skip(self, question), fields(text = %question.text))]
    pub async fn create(&self, quiz_id: i64, question: NewQuestion) -> Result<Question> {
        validate_new_question(&question)?;
        let id = questions::create_question(&self.pool, quiz_id, &question)
            .await
            .map_err(|err| Error::from_write(err, Entity::Question, None))?;
        tracing::info!(id, "Question created");
        self.get(id).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: i64, update: QuestionUpdate) -> Result<Question> {
        let mut question = self.get(id).await?;
        update.apply(&mut question);
        validate_question(&question)?;
        questions::update_question(&self.pool, &question)
            .await
            .map_err(|err| Error::from_write(err, Entity::Question, None))?;
        Ok(question)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<bool> {
        Ok(questions::delete_question(&self.pool, id).await?)
    }

    /// Compares answers with surrounding whitespace ignored.
    pub async fn check_answer(&self, id: i64, answer: &str) -> Result<bool> {
        let question = self.get(id).await?;
        Ok(question.correct_answer.trim() == answer.trim())
    }

    /// Picks one question of the quiz, each with equal probability.
    #[tracing::instrument(skip(self))]
    pub async fn random_question_from_quiz(&self, quiz_id: i64) -> Result<Question> {
        let mut candidates = self.list_for_quiz(quiz_id).await?;
        if candidates.is_empty() {
            return Err(Error::EmptyQuiz(quiz_id));
        }
        let index = self.random.pick_index(candidates.len());
        tracing::debug!(index, total = candidates.len(), "Picked random question");
        Ok(candidates.swap_remove(index))
    }
}
