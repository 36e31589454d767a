use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{
    db::{NewQuiz, Question, Quiz, QuizUpdate},
    error::{Entity, Error},
    server::{app::AppState, deserializers::double_option},
    services::{QuestionService, QuizService},
    telemetry::RANDOM_QUESTIONS_SERVED,
};

use super::{ApiResponse, Payload};

#[derive(Deserialize)]
struct NewQuizPayload {
    title: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Deserialize)]
struct QuizChanges {
    #[serde(default)]
    title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    description: Option<Option<String>>,
}

impl From<NewQuizPayload> for NewQuiz {
    fn from(payload: NewQuizPayload) -> Self {
        NewQuiz {
            title: payload.title,
            description: payload.description,
        }
    }
}

impl From<QuizChanges> for QuizUpdate {
    fn from(changes: QuizChanges) -> Self {
        QuizUpdate {
            title: changes.title,
            description: changes.description,
        }
    }
}

async fn get_quizzes(State(service): State<QuizService>) -> ApiResponse<Json<Vec<Quiz>>> {
    Ok(Json(service.list().await?))
}

async fn quiz(State(service): State<QuizService>, Path(id): Path<i64>) -> ApiResponse<Json<Quiz>> {
    Ok(Json(service.get(id).await?))
}

async fn quizzes_by_title(
    State(service): State<QuizService>,
    Path(title): Path<String>,
) -> ApiResponse<Json<Vec<Quiz>>> {
    Ok(Json(service.search_by_title(&title).await?))
}

async fn create_quiz(
    State(service): State<QuizService>,
    Payload(payload): Payload<NewQuizPayload>,
) -> ApiResponse<(StatusCode, Json<Quiz>)> {
    let quiz = service.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(quiz)))
}

async fn update_quiz(
    State(service): State<QuizService>,
    Path(id): Path<i64>,
    Payload(changes): Payload<QuizChanges>,
) -> ApiResponse<Json<Quiz>> {
    Ok(Json(service.update(id, changes.into()).await?))
}

async fn delete_quiz(State(service): State<QuizService>, Path(id): Path<i64>) -> ApiResponse<StatusCode> {
    if service.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::not_found(Entity::Quiz, id).into())
    }
}

async fn random_question(
    State(quizzes): State<QuizService>,
    State(questions): State<QuestionService>,
    Path(id): Path<i64>,
) -> ApiResponse<Json<Question>> {
    // unknown quiz and empty quiz both end up as 404
    quizzes.get(id).await?;
    let question = questions.random_question_from_quiz(id).await?;
    RANDOM_QUESTIONS_SERVED.inc();
    Ok(Json(question))
}

pub fn quiz_router(state: AppState) -> Router {
    Router::new()
        .route("/quiz", get(get_quizzes).post(create_quiz))
        .route("/quiz/by_title/{title}", get(quizzes_by_title))
        .route("/quiz/{id}", get(quiz).put(update_quiz).delete(delete_quiz))
        .route("/quiz/{id}/random_question", get(random_question))
        .with_state(state)
}
