use std::fs::File;
use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::queries::categories::{get_all_categories, import_categories};
use crate::db::queries::questions::{get_all_questions, import_questions};
use crate::db::queries::quizzes::{get_all_quizzes, import_quizzes};
use crate::db::{Category, Question, Quiz};
use crate::services::{validate_category_title, validate_question, validate_quiz};

const CATEGORIES_FILE: &str = "categories.csv";
const QUIZZES_FILE: &str = "quizzes.csv";
const QUESTIONS_FILE: &str = "questions.csv";

fn write_to(path: &Path, data: &[impl Serialize]) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("Cannot create {}", path.display()))?;
    let mut wtr = csv::Writer::from_writer(file);
    for line in data {
        wtr.serialize(line)?;
    }
    wtr.flush()?;
    Ok(())
}

fn read_from<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    let mut rdr = csv::Reader::from_reader(file);
    rdr.deserialize()
        .collect::<Result<Vec<T>, _>>()
        .with_context(|| format!("Malformed record in {}", path.display()))
}

/// Dumps every table into `dir` as CSV, one file per entity.
#[tracing::instrument(skip(pool))]
pub async fn export_data(pool: &SqlitePool, dir: &Path) -> anyhow::Result<()> {
    let categories = get_all_categories(pool).await?;
    let quizzes = get_all_quizzes(pool).await?;
    let questions = get_all_questions(pool).await?;
    if !dir.exists() {
        std::fs::create_dir_all(dir)?
    }
    write_to(&dir.join(CATEGORIES_FILE), &categories)?;
    write_to(&dir.join(QUIZZES_FILE), &quizzes)?;
    write_to(&dir.join(QUESTIONS_FILE), &questions)?;
    tracing::info!(
        categories = categories.len(),
        quizzes = quizzes.len(),
        questions = questions.len(),
        "Export finished"
    );
    Ok(())
}

/// Upserts the files written by [`export_data`]. Nothing is written unless
/// every row passes validation and is stored.
#[tracing::instrument(skip(pool))]
pub async fn import_data(pool: &SqlitePool, dir: &Path) -> anyhow::Result<()> {
    let categories: Vec<Category> = read_from(&dir.join(CATEGORIES_FILE))?;
    let quizzes: Vec<Quiz> = read_from(&dir.join(QUIZZES_FILE))?;
    let questions: Vec<Question> = read_from(&dir.join(QUESTIONS_FILE))?;
    for category in &categories {
        validate_category_title(&category.title)
            .with_context(|| format!("Category {} cannot be imported", category.id))?;
    }
    for quiz in &quizzes {
        validate_quiz(&quiz.title, quiz.description.as_deref())
            .with_context(|| format!("Quiz {} cannot be imported", quiz.id))?;
    }
    for question in &questions {
        validate_question(question)
            .with_context(|| format!("Question {} cannot be imported", question.id))?;
    }

    let mut tx = pool.begin().await?;
    import_categories(&mut *tx, &categories).await?;
    import_quizzes(&mut *tx, &quizzes).await?;
    import_questions(&mut *tx, &questions).await?;
    tx.commit().await?;
    tracing::info!(
        categories = categories.len(),
        quizzes = quizzes.len(),
        questions = questions.len(),
        "Import finished"
    );
    Ok(())
}
