use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Analytics backend is not reachable at {0}")]
    Connection(String),

    #[error("Backend returned error (status {status}): {body}")]
    BackendStatus { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Parameter encoding error: {0}")]
    ParamEncoding(#[from] serde_json::Error),

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}
