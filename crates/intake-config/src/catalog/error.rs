use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error(transparent)]
    ParseError(#[from] serde_yml::Error),

    #[error(transparent)]
    Loading(#[from] intake_utils::loader::error::LoadingError),

    #[error("duplicate catalog id: {catalog_id}")]
    DuplicateCatalog { catalog_id: String },

    #[error("question {question_id} references unknown module {module_id}")]
    UnknownModule { question_id: String, module_id: String },

    #[error("question {question_id} depends on unknown question {depends_on}")]
    DanglingTrigger { question_id: String, depends_on: String },

    #[error("question {question_id} depends on itself")]
    SelfTrigger { question_id: String },

    #[error("conditional trigger cycle through question {question_id}")]
    TriggerCycle { question_id: String },

    #[error("pattern {pattern_id} references unknown question {question_id}")]
    UnknownPatternQuestion { pattern_id: String, question_id: String },

    #[error("pattern {pattern_id} gate {question_id} must be a yes-no question")]
    InvalidGateQuestion { pattern_id: String, question_id: String },

    #[error("pattern {pattern_id} intensity source {question_id} must be a scale question")]
    InvalidIntensityQuestion { pattern_id: String, question_id: String },

    #[error("pattern {pattern_id} frequency source {question_id} must be a frequency question")]
    InvalidFrequencyQuestion { pattern_id: String, question_id: String },
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("invalid answer type: expected {expected_type}, got {actual_type}")]
    InvalidAnswerType { expected_type: String, actual_type: String },
    #[error("invalid answer value: {value}. min: {min}, max: {max}")]
    AnswerOutOfRange { min: u8, max: u8, value: u8 },
    #[error("invalid option: {value}")]
    InvalidOption { value: String },
    #[error("numeric answer outside the allowed range: {value}")]
    NumericOutOfRange { value: f64 },
    #[error("duration amount must be a finite non-negative number, got {amount}")]
    InvalidDuration { amount: f64 },
}
