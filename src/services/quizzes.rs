use sqlx::SqlitePool;

use crate::constants::{MAX_QUIZ_DESCRIPTION_LENGTH, MAX_QUIZ_TITLE_LENGTH};
use crate::db::queries::quizzes;
use crate::db::{NewQuiz, Quiz, QuizUpdate};
use crate::error::{Entity, Error, Result};
use crate::validators::{validate_optional_text, validate_required_text, ValidationError};

#[derive(Clone)]
pub struct QuizService {
    pool: SqlitePool,
}

pub(crate) fn validate_quiz(title: &str, description: Option<&str>) -> std::result::Result<(), ValidationError> {
    validate_required_text("title", title, MAX_QUIZ_TITLE_LENGTH)?;
    validate_optional_text("description", description, MAX_QUIZ_DESCRIPTION_LENGTH)
}

impl QuizService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Quiz>> {
        Ok(quizzes::get_all_quizzes(&self.pool).await?)
    }

    pub async fn get(&self, id: i64) -> Result<Quiz> {
        quizzes::get_quiz(&self.pool, id)
            .await?
            .ok_or_else(|| Error::not_found(Entity::Quiz, id))
    }

    pub async fn search_by_title(&self, title: &str) -> Result<Vec<Quiz>> {
        Ok(quizzes::get_quizzes_by_title(&self.pool, title).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn create(&self, quiz: NewQuiz) -> Result<Quiz> {
        validate_quiz(&quiz.title, quiz.description.as_deref())?;
        let id = quizzes::create_quiz(&self.pool, &quiz)
            .await
            .map_err(|err| Error::from_write(err, Entity::Quiz, Some(&quiz.title)))?;
        tracing::info!(id, "Quiz created");
        self.get(id).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: i64, update: QuizUpdate) -> Result<Quiz> {
        let mut quiz = self.get(id).await?;
        update.apply(&mut quiz);
        validate_quiz(&quiz.title, quiz.description.as_deref())?;
        quizzes::update_quiz(&self.pool, &quiz)
            .await
            .map_err(|err| Error::from_write(err, Entity::Quiz, Some(&quiz.title)))?;
        Ok(quiz)
    }

    /// Deletes the quiz together with all of its questions.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let deleted = quizzes::delete_quiz(&self.pool, id).await?;
        if deleted {
            tracing::info!(id, "Quiz deleted with its questions");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn new_quiz(title: &str) -> NewQuiz {
        NewQuiz {
            title: title.to_owned(),
            description: None,
        }
    }

    #[tokio::test]
    async fn search_by_title_is_case_insensitive() {
        let service = QuizService::new(test_pool().await);
        for title in ["Python Basics", "Python Advanced", "Java Intro"] {
            service.create(new_quiz(title)).await.unwrap();
        }

        for needle in ["Py", "py", "PYTHON"] {
            let titles: Vec<String> = service
                .search_by_title(needle)
                .await
                .unwrap()
                .into_iter()
                .map(|q| q.title)
                .collect();
            assert_eq!(titles, vec!["Python Advanced", "Python Basics"]);
        }
        assert!(service.search_by_title("Rust").await.unwrap().is_empty());

        service.create(new_quiz("Питон для начинающих")).await.unwrap();
        for needle in ["питон", "ПИТОН", "Начинающих"] {
            let found = service.search_by_title(needle).await.unwrap();
            assert_eq!(found.len(), 1, "{needle}");
            assert_eq!(found[0].title, "Питон для начинающих");
        }
    }

    #[tokio::test]
    async fn list_is_ordered_by_title() {
        let service = QuizService::new(test_pool().await);
        service.create(new_quiz("B")).await.unwrap();
        service.create(new_quiz("A")).await.unwrap();

        let titles: Vec<String> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|q| q.title)
            .collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn duplicate_and_oversized_quizzes_are_rejected() {
        let service = QuizService::new(test_pool().await);
        service.create(new_quiz("Math")).await.unwrap();

        assert!(matches!(
            service.create(new_quiz("Math")).await,
            Err(Error::Validation(ValidationError::Duplicate {
                entity: Entity::Quiz,
                ..
            }))
        ));
        assert!(matches!(
            service
                .create(NewQuiz {
                    title: "Long".to_owned(),
                    description: Some("x".repeat(MAX_QUIZ_DESCRIPTION_LENGTH + 1)),
                })
                .await,
            Err(Error::Validation(ValidationError::TooLong {
                field: "description",
                ..
            }))
        ));
    }

    #[tokio::test]
    async fn update_merges_fields() {
        let service = QuizService::new(test_pool().await);
        let quiz = service
            .create(NewQuiz {
                title: "Old".to_owned(),
                description: Some("About numbers".to_owned()),
            })
            .await
            .unwrap();

        let renamed = service
            .update(
                quiz.id,
                QuizUpdate {
                    title: Some("New".to_owned()),
                    description: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.title, "New");
        assert_eq!(renamed.description.as_deref(), Some("About numbers"));

        let cleared = service
            .update(
                quiz.id,
                QuizUpdate {
                    title: None,
                    description: Some(None),
                },
            )
            .await
            .unwrap();
        assert_eq!(cleared.description, None);

        assert!(matches!(
            service.update(quiz.id + 1, QuizUpdate::default()).await,
            Err(Error::NotFound {
                entity: Entity::Quiz,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn delete_is_a_no_op_for_missing_quizzes() {
        let service = QuizService::new(test_pool().await);
        let quiz = service.create(new_quiz("Gone")).await.unwrap();
        assert!(service.delete(quiz.id).await.unwrap());
        assert!(!service.delete(quiz.id).await.unwrap());
        assert!(matches!(
            service.get(quiz.id).await,
            Err(Error::NotFound { .. })
        ));
    }
}
