use std::fmt;

use thiserror::Error;

use crate::validators::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Category,
    Quiz,
    Question,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Category => "category",
            Entity::Quiz => "quiz",
            Entity::Question => "question",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{entity} {id} not found")]
    NotFound { entity: Entity, id: i64 },

    #[error("quiz {0} has no questions")]
    EmptyQuiz(i64),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn not_found(entity: Entity, id: i64) -> Self {
        Error::NotFound { entity, id }
    }

    /// Turns SQLite constraint violations into validation errors, leaving every
    /// other database failure untouched.
    pub(crate) fn from_write(err: sqlx::Error, entity: Entity, title: Option<&str>) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return ValidationError::Duplicate {
                    entity,
                    title: title.unwrap_or_default().to_owned(),
                }
                .into();
            }
            if db_err.is_foreign_key_violation() {
                return ValidationError::UnknownReference.into();
            }
        }
        Error::Database(err)
    }
}
