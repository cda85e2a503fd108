// Error taxonomy shared by every pipeline stage
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdviceError {
    /// The usage dataset could not be opened or read.
    #[error("usage data source unavailable: {0}")]
    DataSource(String),

    /// A required column is missing or a row holds an invalid value.
    #[error("malformed usage data: {0}")]
    Schema(String),

    /// Aggregates were empty, so no insight can be derived.
    #[error("not enough usage data to analyze: {0}")]
    InsufficientData(&'static str),

    /// A template was rendered without all of its placeholders.
    #[error("prompt template '{template}' is missing context for: {}", .missing.join(", "))]
    MissingContext {
        template: &'static str,
        missing: Vec<String>,
    },

    #[error("question text is empty")]
    EmptyQuestion,

    /// Request body could not be decoded into the expected form.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Network, auth, quota or decoding failure from the text-generation service.
    #[error("advice generation failed: {0}")]
    GenerationService(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl AdviceError {
    /// Short machine-readable kind, used in API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DataSource(_) => "data_source",
            Self::Schema(_) => "schema",
            Self::InsufficientData(_) => "insufficient_data",
            Self::MissingContext { .. } => "missing_context",
            Self::EmptyQuestion => "empty_question",
            Self::InvalidRequest(_) => "invalid_request",
            Self::GenerationService(_) => "generation_service",
            Self::Configuration(_) => "configuration",
        }
    }

    /// Message safe to show the end user.
    pub fn user_message(&self) -> String {
        match self {
            Self::DataSource(_) => {
                "Usage data file not found. Please ensure the file exists and try again.".to_string()
            }
            Self::Schema(detail) | Self::InvalidRequest(detail) => detail.clone(),
            Self::InsufficientData(_) => {
                "There is not enough usage data to analyze yet.".to_string()
            }
            Self::EmptyQuestion => "Please enter a question before submitting.".to_string(),
            Self::GenerationService(_) => {
                "The advice service is unavailable right now. Please try again later.".to_string()
            }
            Self::MissingContext { .. } | Self::Configuration(_) => {
                "An internal error occurred.".to_string()
            }
        }
    }

    /// Internal defects, as opposed to errors the user can recover from.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::MissingContext { .. } | Self::Configuration(_))
    }
}
