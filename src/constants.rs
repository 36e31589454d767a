pub const MAX_CATEGORY_TITLE_LENGTH: usize = 256;
pub const MAX_QUIZ_TITLE_LENGTH: usize = 256;
pub const MAX_QUIZ_DESCRIPTION_LENGTH: usize = 1024;
pub const MAX_QUESTION_DESCRIPTION_LENGTH: usize = 1024;
pub const MAX_QUESTION_TEXT_LENGTH: usize = 1024;
pub const MAX_QUESTION_EXPLANATION_LENGTH: usize = 1024;

/// Least number of answer candidates a question may offer.
pub const MIN_ANSWER_OPTIONS: usize = 2;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
