use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("Gemini API key is not configured")]
    Unconfigured,

    #[error("Gemini request timed out")]
    Timeout,

    #[error("Gemini request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Gemini returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Gemini response contained no candidate text")]
    EmptyResponse,
}

pub type Result<T> = std::result::Result<T, GeminiError>;
