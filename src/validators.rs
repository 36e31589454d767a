use serde_json::Value;
use thiserror::Error;

use crate::constants::MIN_ANSWER_OPTIONS;
use crate::error::Entity;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("answer options must be a list")]
    OptionsNotAList,

    #[error("question must have at least two possible answers")]
    TooFewOptions,

    #[error("all answers must be numbers or strings")]
    MixedOptions,

    #[error("answer options are not valid JSON: {0}")]
    MalformedOptions(String),

    #[error("{0} must not be blank")]
    Blank(&'static str),

    #[error("{field} must be at most {max} characters long")]
    TooLong { field: &'static str, max: usize },

    #[error("{entity} with title {title:?} already exists")]
    Duplicate { entity: Entity, title: String },

    #[error("referenced quiz or category does not exist")]
    UnknownReference,
}

/// Checks that `options` is a list of at least two answers which are either
/// all numbers or all strings.
pub fn validate_answer_options(options: &Value) -> Result<(), ValidationError> {
    let Value::Array(answers) = options else {
        return Err(ValidationError::OptionsNotAList);
    };

    if answers.len() < MIN_ANSWER_OPTIONS {
        return Err(ValidationError::TooFewOptions);
    }

    if !(answers.iter().all(Value::is_number) || answers.iter().all(Value::is_string)) {
        return Err(ValidationError::MixedOptions);
    }
    Ok(())
}

/// Decodes stored answer options and validates them.
pub fn decode_answer_options(raw: &str) -> Result<Vec<Value>, ValidationError> {
    let options: Value = serde_json::from_str(raw)
        .map_err(|err| ValidationError::MalformedOptions(err.to_string()))?;
    validate_answer_options(&options)?;
    match options {
        Value::Array(answers) => Ok(answers),
        _ => Err(ValidationError::OptionsNotAList),
    }
}

pub fn validate_required_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank(field));
    }
    validate_length(field, value, max)
}

pub fn validate_optional_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), ValidationError> {
    match value {
        Some(value) => validate_length(field, value, max),
        None => Ok(()),
    }
}

fn validate_length(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}
