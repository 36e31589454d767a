use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::{
    deserialize_number_from_string, deserialize_option_number_from_string,
    deserialize_string_from_number,
};

use crate::{
    db::{Difficulty, NewQuestion, Question, QuestionUpdate},
    error::{Entity, Error},
    server::{
        app::AppState,
        deserializers::{
            deserialize_answer_options, deserialize_optional_answer_options, double_option,
            double_option_number_from_string,
        },
    },
    services::QuestionService,
    telemetry::record_answer_check,
};

use super::{ApiError, ApiResponse, Payload};

// quiz and category ids may arrive as strings from form-like clients
#[derive(Deserialize)]
struct NewQuestionPayload {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    quiz: i64,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    category: Option<i64>,
    #[serde(default)]
    description: Option<String>,
    text: String,
    #[serde(deserialize_with = "deserialize_answer_options")]
    options: String,
    correct_answer: String,
    #[serde(default)]
    explanation: Option<String>,
    difficulty: Difficulty,
}

impl NewQuestionPayload {
    fn split(self) -> (i64, NewQuestion) {
        let question = NewQuestion {
            category: self.category,
            description: self.description,
            text: self.text,
            options: self.options,
            correct_answer: self.correct_answer,
            explanation: self.explanation,
            difficulty: self.difficulty,
        };
        (self.quiz, question)
    }
}

#[derive(Deserialize)]
struct QuestionChanges {
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    quiz: Option<i64>,
    #[serde(default, deserialize_with = "double_option_number_from_string")]
    category: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    description: Option<Option<String>>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_answer_options")]
    options: Option<String>,
    #[serde(default)]
    correct_answer: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    explanation: Option<Option<String>>,
    #[serde(default)]
    difficulty: Option<Difficulty>,
}

impl From<QuestionChanges> for QuestionUpdate {
    fn from(changes: QuestionChanges) -> Self {
        QuestionUpdate {
            quiz: changes.quiz,
            category: changes.category,
            description: changes.description,
            text: changes.text,
            options: changes.options,
            correct_answer: changes.correct_answer,
            explanation: changes.explanation,
            difficulty: changes.difficulty,
        }
    }
}

#[derive(Deserialize)]
struct AnswerPayload {
    #[serde(default, deserialize_with = "deserialize_string_from_number")]
    answer: String,
}

#[derive(Serialize)]
struct AnswerVerdict {
    correct: bool,
}

async fn get_questions(State(service): State<QuestionService>) -> ApiResponse<Json<Vec<Question>>> {
    Ok(Json(service.list().await?))
}

async fn question(
    State(service): State<QuestionService>,
    Path(id): Path<i64>,
) -> ApiResponse<Json<Question>> {
    Ok(Json(service.get(id).await?))
}

async fn questions_by_text(
    State(service): State<QuestionService>,
    Path(text): Path<String>,
) -> ApiResponse<Json<Vec<Question>>> {
    Ok(Json(service.search_by_text(&text).await?))
}

async fn create_question(
    State(service): State<QuestionService>,
    Payload(payload): Payload<NewQuestionPayload>,
) -> ApiResponse<(StatusCode, Json<Question>)> {
    let (quiz_id, new_question) = payload.split();
    let question = service.create(quiz_id, new_question).await?;
    Ok((StatusCode::CREATED, Json(question)))
}

async fn update_question(
    State(service): State<QuestionService>,
    Path(id): Path<i64>,
    Payload(changes): Payload<QuestionChanges>,
) -> ApiResponse<Json<Question>> {
    Ok(Json(service.update(id, changes.into()).await?))
}

async fn delete_question(
    State(service): State<QuestionService>,
    Path(id): Path<i64>,
) -> ApiResponse<StatusCode> {
    if service.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::not_found(Entity::Question, id).into())
    }
}

async fn check_answer(
    State(service): State<QuestionService>,
    Path(id): Path<i64>,
    payload: Result<Payload<AnswerPayload>, ApiError>,
) -> ApiResponse<Json<AnswerVerdict>> {
    // a request without a body checks the empty answer
    let answer = match payload {
        Ok(Payload(payload)) => payload.answer,
        Err(ApiError::Payload(JsonRejection::MissingJsonContentType(_))) => String::new(),
        Err(err) => {
            service.get(id).await?;
            return Err(err);
        }
    };
    let correct = service.check_answer(id, &answer).await?;
    record_answer_check(correct);
    Ok(Json(AnswerVerdict { correct }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/question", get(get_questions).post(create_question))
        .route("/question/by_text/{text}", get(questions_by_text))
        .route(
            "/question/{id}",
            get(question).put(update_question).delete(delete_question),
        )
        .route("/question/{id}/check", post(check_answer))
        .with_state(state)
}
